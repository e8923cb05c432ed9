//! Painter's-order rasterization of prepared models.
//!
//! The active stack is split into one contiguous partition per surface
//! buffer and the partitions are drawn concurrently. Each partition keeps
//! stack order inside its own buffer; merging the buffers in index order
//! restores the global back-to-front order.

use log::warn;
use rayon::prelude::*;

use crate::collection::ModelCollectionController;
use crate::core::color::Color;
use crate::core::point::{Point2D, Point3D};
use crate::error::{Graph3dError, Graph3dResult, ResultExt};
use crate::model::{FillType, Polygon3D, PolygonSide, VolumetricModel};

use super::DrawingSurface;

#[derive(Debug, Clone, Copy)]
enum Style {
    ByFillType,
    Fill,
    Outline,
    Cells { color: Option<Color>, line_width: f32 },
}

/// Runs `draw(stack_position, buffer)` for `0..count`, one contiguous
/// partition per surface buffer.
///
/// Partition `p` covers `[p * part, min((p + 1) * part, count))` with
/// `part = ceil(count / buffer_count)`. A surface reporting no buffers is
/// drawn as if it had one.
///
/// # Examples
/// ```
/// use graph3d::surface::{draw_partitioned, RecordingSurface};
/// use parking_lot::Mutex;
/// let surface = RecordingSurface::new(8, 8, 3).unwrap();
/// let seen = Mutex::new(Vec::new());
/// draw_partitioned(&surface, 7, |i, b| {
///     seen.lock().push((i, b));
///     Ok(())
/// })
/// .unwrap();
/// let mut seen = seen.into_inner();
/// seen.sort();
/// assert_eq!(seen, vec![(0, 0), (1, 0), (2, 0), (3, 1), (4, 1), (5, 1), (6, 2)]);
/// ```
pub fn draw_partitioned<F>(surface: &dyn DrawingSurface, count: usize, draw: F) -> Graph3dResult<()>
where
    F: Fn(usize, usize) -> Graph3dResult<()> + Sync,
{
    if count == 0 {
        return Ok(());
    }
    let buffers = match surface.buffer_count() {
        0 => {
            warn!("surface reports no buffers, drawing into buffer 0");
            1
        }
        n => n,
    };
    let part = count.div_ceil(buffers);
    (0..buffers).into_par_iter().try_for_each(|buffer| {
        let start = (buffer * part).min(count);
        let end = ((buffer + 1) * part).min(count);
        (start..end).try_for_each(|i| draw(i, buffer))
    })
}

fn passes(side: PolygonSide) -> &'static [PolygonSide] {
    match side {
        PolygonSide::Auto => &[PolygonSide::RearSide, PolygonSide::FrontSide],
        PolygonSide::AllSides => &[PolygonSide::AllSides],
        PolygonSide::FrontSide => &[PolygonSide::FrontSide],
        PolygonSide::RearSide => &[PolygonSide::RearSide],
    }
}

fn screen_point(screen: &[Point3D], index: usize) -> Graph3dResult<Point2D> {
    screen
        .get(index)
        .map(|p| Point2D::new(p.x, p.y))
        .ok_or(Graph3dError::IndexOutOfRange {
            what: "screen vertex",
            index,
            len: screen.len(),
        })
}

fn draw_polygon(
    surface: &dyn DrawingSurface,
    style: Style,
    polygon: &Polygon3D,
    screen: &[Point3D],
    side: PolygonSide,
    buffer: usize,
) -> Graph3dResult<()> {
    if !polygon.double_sided && side == PolygonSide::RearSide {
        return Ok(());
    }
    let slot = polygon.visible_side();
    match (side, slot) {
        (PolygonSide::FrontSide, 1) | (PolygonSide::RearSide, 0) => return Ok(()),
        _ => {}
    }

    let [a, b, c] = polygon.indices;
    let points = [
        screen_point(screen, a)?,
        screen_point(screen, b)?,
        screen_point(screen, c)?,
    ];
    let color = polygon.lighting_color[slot];

    match style {
        Style::Fill => surface.fill_polygon(color, &points, buffer),
        Style::Outline => surface.draw_polygon(color, &points, buffer),
        Style::Cells {
            color: special,
            line_width,
        } => surface.draw_lines(
            special.unwrap_or(color),
            &[points[2], points[0], points[1]],
            line_width,
            buffer,
        ),
        Style::ByFillType => match polygon.fill_type {
            FillType::Solid => surface.fill_polygon(color, &points, buffer),
            FillType::Wide => surface.draw_polygon(color, &points, buffer),
            FillType::SquareWide => {
                surface.draw_line(color, points[0], points[1], buffer)?;
                surface.draw_line(color, points[2], points[0], buffer)
            }
        },
    }
}

// =============================================================================
// SINGLE MODEL
// =============================================================================

impl VolumetricModel {
    fn show_styled(&self, surface: &dyn DrawingSurface, style: Style, side: PolygonSide) -> Graph3dResult<()> {
        let active = self.active_polygons();
        let polygons = self.polygons();
        let screen = self.vertices().screen();
        for &pass in passes(side) {
            draw_partitioned(surface, active.len(), |i, buffer| {
                draw_polygon(surface, style, &polygons[active[i]], screen, pass, buffer)
            })?;
        }
        Ok(())
    }

    /// Draws the active stack, each polygon in the style of its
    /// [`FillType`].
    ///
    /// `side` selects which faces are drawn: [`PolygonSide::FrontSide`] the
    /// faces turned to the viewer, [`PolygonSide::RearSide`] the turned-away
    /// faces of double-sided polygons, [`PolygonSide::AllSides`] everything
    /// and [`PolygonSide::Auto`] the rear pass followed by the front pass.
    pub fn show_model(&self, surface: &dyn DrawingSurface, side: PolygonSide) -> Graph3dResult<()> {
        self.show_styled(surface, Style::ByFillType, side)
            .context("VolumetricModel", "show_model")
    }

    /// Fills every active polygon regardless of its fill type.
    pub fn show_polygon_model(&self, surface: &dyn DrawingSurface, side: PolygonSide) -> Graph3dResult<()> {
        self.show_styled(surface, Style::Fill, side)
            .context("VolumetricModel", "show_polygon_model")
    }

    /// Outlines every active polygon regardless of its fill type.
    pub fn show_polygon_wide_model(&self, surface: &dyn DrawingSurface, side: PolygonSide) -> Graph3dResult<()> {
        self.show_styled(surface, Style::Outline, side)
            .context("VolumetricModel", "show_polygon_wide_model")
    }

    /// Draws the two grid edges of every active polygon as a poly-line of
    /// `line_width`, in `special` when `use_special` is set and in the lit
    /// colour otherwise.
    pub fn show_wide_only_cell_model(
        &self,
        surface: &dyn DrawingSurface,
        special: Color,
        side: PolygonSide,
        line_width: f32,
        use_special: bool,
    ) -> Graph3dResult<()> {
        let style = Style::Cells {
            color: use_special.then_some(special),
            line_width,
        };
        self.show_styled(surface, style, side)
            .context("VolumetricModel", "show_wide_only_cell_model")
    }
}

// =============================================================================
// COLLECTION
// =============================================================================

impl ModelCollectionController {
    fn show_styled(&self, surface: &dyn DrawingSurface, style: Style, side: PolygonSide) -> Graph3dResult<()> {
        if self.slot_count() == 1 {
            return match self.slot(0) {
                Some(model) => model.show_styled(surface, style, side),
                None => Ok(()),
            };
        }
        let refs = self.active_polygons();
        for &pass in passes(side) {
            draw_partitioned(surface, refs.len(), |i, buffer| match self.polygon(refs[i]) {
                Some((model, polygon)) => {
                    draw_polygon(surface, style, polygon, model.vertices().screen(), pass, buffer)
                }
                None => Ok(()),
            })?;
        }
        Ok(())
    }

    /// Draws the merged stack, each polygon in the style of its fill type.
    /// A single-slot collection draws its model directly.
    pub fn show_model(&self, surface: &dyn DrawingSurface, side: PolygonSide) -> Graph3dResult<()> {
        self.show_styled(surface, Style::ByFillType, side)
            .context("ModelCollectionController", "show_model")
    }

    /// Fills every polygon of the merged stack.
    pub fn show_polygon_model(&self, surface: &dyn DrawingSurface, side: PolygonSide) -> Graph3dResult<()> {
        self.show_styled(surface, Style::Fill, side)
            .context("ModelCollectionController", "show_polygon_model")
    }

    /// Outlines every polygon of the merged stack.
    pub fn show_wide_model(&self, surface: &dyn DrawingSurface, side: PolygonSide) -> Graph3dResult<()> {
        self.show_styled(surface, Style::Outline, side)
            .context("ModelCollectionController", "show_wide_model")
    }
}
