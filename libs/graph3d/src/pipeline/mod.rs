//! Per-frame data flow from camera-space vertices to drawing calls.
//!
//! Callers deform the camera buffers (rotate, move, zoom) and then hand the
//! models to a [`FramePipeline`], which runs, in order:
//!
//! 1. projection at the surface centre
//! 2. screen-space backface signs
//! 3. backface, depth and screen-bounds culling
//! 4. camera-space centres and normals
//! 5. lighting, then optional fog
//! 6. depth sort, farthest first
//! 7. rasterization into the surface buffers
//!
//! Steps that have a parallel form use it when the configuration allows
//! more than one worker.

use log::debug;

use crate::collection::ModelCollectionController;
use crate::config::EngineConfig;
use crate::core::color::Color;
use crate::error::{Graph3dResult, ResultExt};
use crate::lighting::{Fog, Light};
use crate::model::{ActiveIndexes, PolygonSide, VolumetricModel};
use crate::surface::{draw_partitioned, DrawingSurface};
use crate::unit::{filter_units_by_xy_pos, filter_units_by_z_pos, sort_units_by_depth, ShapeModel3D};

/// Polygon counts of one prepared model or collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    /// Polygons left to draw.
    pub drawn: usize,
    /// Polygons removed by culling.
    pub culled: usize,
}

impl std::ops::AddAssign for FrameStats {
    fn add_assign(&mut self, other: Self) {
        self.drawn += other.drawn;
        self.culled += other.culled;
    }
}

/// Runs the frame stages with one configuration.
///
/// # Examples
/// ```
/// use graph3d::config::EngineConfig;
/// use graph3d::core::color::Color;
/// use graph3d::lighting::Light;
/// use graph3d::model::PolygonSide;
/// use graph3d::pipeline::FramePipeline;
/// use graph3d::primitives::Plane3D;
/// use graph3d::surface::RecordingSurface;
///
/// let mut floor = Plane3D::new(8, 50.0, 50.0, 50.0, 50.0, 0.0, 6.0).build().unwrap();
/// floor.vertices_mut().move_by(0.0, 0.0, 200.0);
///
/// let surface = RecordingSurface::new(320, 240, 2).unwrap();
/// let light = Light::Ambient { color: Color::WHITE, power: 1.0 };
/// let stats = FramePipeline::new(EngineConfig::default())
///     .render_model(&mut floor, &[light], &surface, PolygonSide::Auto)
///     .unwrap();
/// assert_eq!(surface.all_commands().len(), stats.drawn);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FramePipeline {
    config: EngineConfig,
    fog: Option<Color>,
}

impl FramePipeline {
    /// Pipeline without fog.
    pub fn new(config: EngineConfig) -> Self {
        Self { config, fog: None }
    }

    /// Enables fog of `color` between the configured fog distances.
    pub fn with_fog(mut self, color: Color) -> Self {
        self.fog = Some(color);
        self
    }

    /// Configuration in use.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn fog(&self) -> Graph3dResult<Option<Fog>> {
        self.fog
            .map(|color| Fog::from_config(color, &self.config))
            .transpose()
    }

    fn center(surface: &dyn DrawingSurface) -> (i32, i32) {
        let half = |v: u32| i32::try_from(v / 2).unwrap_or(i32::MAX);
        (half(surface.width()), -half(surface.height()))
    }

    /// Runs every stage up to, but not including, rasterization.
    pub fn prepare_model(
        &self,
        model: &mut VolumetricModel,
        lights: &[Light],
        surface: &dyn DrawingSurface,
    ) -> Graph3dResult<FrameStats> {
        let cfg = &self.config;
        let (cx, cy) = Self::center(surface);
        let fog = self.fog()?;

        model.reset_active_polygon_indexes();
        let total = model.active_polygons().len();
        model
            .vertices_mut()
            .create_screen_vertex(cfg.perspective_k, cx, cy);
        model.calculate_polygon_normals(true, cfg);

        model.filter_polygon_directed_away_from_scene(PolygonSide::RearSide);
        model.filter_polygon_by_z_pos(cfg.near_z, cfg.far_z);
        model.filter_polygon_by_xy_pos(surface.width() as f32, surface.height() as f32);

        model.calculate_polygon_centers(cfg);
        model.calculate_polygon_normals(false, cfg);

        model.reset_lighting(cfg);
        for light in lights {
            model.add_light(light)?;
        }
        if let Some(fog) = &fog {
            model.apply_fog(fog);
        }

        model.sort_active_polygon_indexes(cfg);
        let drawn = model.active_polygons().len();
        Ok(FrameStats {
            drawn,
            culled: total - drawn,
        })
    }

    /// Prepares and draws one model.
    pub fn render_model(
        &self,
        model: &mut VolumetricModel,
        lights: &[Light],
        surface: &dyn DrawingSurface,
        side: PolygonSide,
    ) -> Graph3dResult<FrameStats> {
        let stats = self
            .prepare_model(model, lights, surface)
            .context("FramePipeline", "render_model")?;
        model
            .show_model(surface, side)
            .context("FramePipeline", "render_model")?;
        debug!(
            "frame: {} polygons drawn, {} culled",
            stats.drawn, stats.culled
        );
        Ok(stats)
    }

    /// Prepares every model of `collection`, merges them and draws the
    /// merged stack.
    pub fn render_collection(
        &self,
        collection: &mut ModelCollectionController,
        lights: &[Light],
        surface: &dyn DrawingSurface,
        side: PolygonSide,
    ) -> Graph3dResult<FrameStats> {
        let mut stats = FrameStats::default();
        for model in collection.models_mut() {
            stats += self
                .prepare_model(model, lights, surface)
                .context("FramePipeline", "render_collection")?;
        }
        collection.create_active_polygon_buffer();
        collection.merge_active_polygon();
        collection
            .show_model(surface, side)
            .context("FramePipeline", "render_collection")?;
        debug!(
            "frame: {} polygons drawn from {} slots, {} culled",
            stats.drawn,
            collection.slot_count(),
            stats.culled
        );
        Ok(stats)
    }

    /// Projects, culls, fogs, depth-sorts and draws circles. Returns the
    /// number drawn.
    pub fn render_shapes(&self, shapes: &mut [ShapeModel3D], surface: &dyn DrawingSurface) -> Graph3dResult<usize> {
        let cfg = &self.config;
        let (cx, cy) = Self::center(surface);
        let fog = self.fog()?;

        for shape in shapes.iter_mut() {
            shape.unit.calculate_screen_values(cfg.perspective_k, cx, cy);
            shape.reset_lighting();
            if let Some(fog) = &fog {
                shape.apply_fog(fog);
            }
        }

        let shapes: &[ShapeModel3D] = shapes;
        let mut active = ActiveIndexes::new(shapes.len());
        filter_units_by_z_pos(shapes, &mut active, cfg.near_z, cfg.far_z);
        filter_units_by_xy_pos(shapes, &mut active, surface.width() as f32, surface.height() as f32);
        sort_units_by_depth(shapes, &mut active);

        let order = active.as_slice();
        draw_partitioned(surface, order.len(), |i, buffer| shapes[order[i]].show(surface, buffer))
            .context("FramePipeline", "render_shapes")?;
        Ok(order.len())
    }
}
