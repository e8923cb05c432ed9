//! Drawing-surface contract and an in-memory recording backend.
//!
//! The engine never rasterizes itself. It hands 2D primitives to a
//! [`DrawingSurface`] that owns one or more independent buffers; draw calls
//! for different buffers may arrive concurrently from different rayon
//! workers, so implementations must be `Sync` and keep buffers independent.
//! [`DrawingSurface::merge_buffers`] composites them once a frame is drawn.

mod render;

use parking_lot::Mutex;

use crate::core::color::Color;
use crate::core::point::Point2D;
use crate::error::{Graph3dError, Graph3dResult};

pub use render::draw_partitioned;

/// Target for rasterized primitives.
///
/// Every drawing call names the buffer it targets and fails with
/// [`Graph3dError::IndexOutOfRange`] for a buffer the surface does not have.
pub trait DrawingSurface: Sync {
    /// Width in pixels.
    fn width(&self) -> u32;

    /// Height in pixels.
    fn height(&self) -> u32;

    /// Number of independent buffers.
    fn buffer_count(&self) -> usize;

    /// Clears every buffer to `color`.
    fn clear_surfaces(&self, color: Color) -> Graph3dResult<()>;

    /// Fills a triangle.
    fn fill_polygon(&self, color: Color, points: &[Point2D; 3], buffer: usize) -> Graph3dResult<()>;

    /// Outlines a triangle.
    fn draw_polygon(&self, color: Color, points: &[Point2D; 3], buffer: usize) -> Graph3dResult<()>;

    /// Draws one segment.
    fn draw_line(&self, color: Color, from: Point2D, to: Point2D, buffer: usize) -> Graph3dResult<()>;

    /// Draws an open poly-line of the given width.
    fn draw_lines(&self, color: Color, points: &[Point2D], width: f32, buffer: usize) -> Graph3dResult<()>;

    /// Fills the ellipse inscribed in a rectangle.
    fn fill_ellipse(&self, color: Color, x: f32, y: f32, width: f32, height: f32, buffer: usize) -> Graph3dResult<()>;

    /// Outlines a rectangle.
    fn draw_rectangle(&self, color: Color, x: f32, y: f32, width: f32, height: f32, buffer: usize) -> Graph3dResult<()>;

    /// Draws text with its top-left corner at `(x, y)`.
    fn draw_text(&self, text: &str, color: Color, x: f32, y: f32, buffer: usize) -> Graph3dResult<()>;

    /// Composites every buffer into the first.
    fn merge_buffers(&self) -> Graph3dResult<()>;

    /// Presents `buffer`.
    fn render(&self, buffer: usize) -> Graph3dResult<()>;
}

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Buffer cleared.
    Clear(Color),
    /// Filled triangle.
    FillPolygon {
        /// Fill colour.
        color: Color,
        /// Corners.
        points: [Point2D; 3],
    },
    /// Triangle outline.
    DrawPolygon {
        /// Line colour.
        color: Color,
        /// Corners.
        points: [Point2D; 3],
    },
    /// Segment.
    Line {
        /// Line colour.
        color: Color,
        /// Start.
        from: Point2D,
        /// End.
        to: Point2D,
    },
    /// Poly-line.
    Lines {
        /// Line colour.
        color: Color,
        /// Vertices in order.
        points: Vec<Point2D>,
        /// Line width.
        width: f32,
    },
    /// Filled ellipse in its bounding rectangle.
    FillEllipse {
        /// Fill colour.
        color: Color,
        /// Left.
        x: f32,
        /// Top.
        y: f32,
        /// Width.
        width: f32,
        /// Height.
        height: f32,
    },
    /// Rectangle outline.
    Rectangle {
        /// Line colour.
        color: Color,
        /// Left.
        x: f32,
        /// Top.
        y: f32,
        /// Width.
        width: f32,
        /// Height.
        height: f32,
    },
    /// Text.
    Text {
        /// Content.
        text: String,
        /// Colour.
        color: Color,
        /// Left.
        x: f32,
        /// Top.
        y: f32,
    },
}

/// Headless surface that records drawing calls per buffer.
///
/// Each buffer sits behind its own lock, so workers drawing into different
/// buffers never contend.
///
/// # Examples
/// ```
/// use graph3d::core::color::Color;
/// use graph3d::surface::{DrawCommand, DrawingSurface, RecordingSurface};
/// let surface = RecordingSurface::new(640, 480, 2).unwrap();
/// surface.fill_ellipse(Color::WHITE, 0.0, 0.0, 4.0, 4.0, 1).unwrap();
/// assert_eq!(surface.commands(1).len(), 1);
/// assert!(surface.draw_text("x", Color::WHITE, 0.0, 0.0, 2).is_err());
/// ```
#[derive(Debug)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    buffers: Vec<Mutex<Vec<DrawCommand>>>,
    presented: Mutex<Vec<usize>>,
}

impl RecordingSurface {
    /// Creates a surface with `buffer_count` empty buffers.
    pub fn new(width: u32, height: u32, buffer_count: usize) -> Graph3dResult<Self> {
        if buffer_count == 0 {
            return Err(Graph3dError::invalid(
                "RecordingSurface",
                "a surface needs at least one buffer",
            ));
        }
        Ok(Self {
            width,
            height,
            buffers: (0..buffer_count).map(|_| Mutex::new(Vec::new())).collect(),
            presented: Mutex::new(Vec::new()),
        })
    }

    /// Snapshot of the commands recorded into `buffer`; empty for an unknown
    /// buffer.
    pub fn commands(&self, buffer: usize) -> Vec<DrawCommand> {
        self.buffers
            .get(buffer)
            .map(|b| b.lock().clone())
            .unwrap_or_default()
    }

    /// Commands of every buffer, in buffer order.
    pub fn all_commands(&self) -> Vec<DrawCommand> {
        self.buffers.iter().flat_map(|b| b.lock().clone()).collect()
    }

    /// Buffers passed to [`DrawingSurface::render`], in call order.
    pub fn presented(&self) -> Vec<usize> {
        self.presented.lock().clone()
    }

    fn record(&self, buffer: usize, command: DrawCommand) -> Graph3dResult<()> {
        let slot = self.buffers.get(buffer).ok_or(Graph3dError::IndexOutOfRange {
            what: "surface buffer",
            index: buffer,
            len: self.buffers.len(),
        })?;
        slot.lock().push(command);
        Ok(())
    }
}

impl DrawingSurface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    fn clear_surfaces(&self, color: Color) -> Graph3dResult<()> {
        for buffer in &self.buffers {
            let mut commands = buffer.lock();
            commands.clear();
            commands.push(DrawCommand::Clear(color));
        }
        Ok(())
    }

    fn fill_polygon(&self, color: Color, points: &[Point2D; 3], buffer: usize) -> Graph3dResult<()> {
        self.record(buffer, DrawCommand::FillPolygon { color, points: *points })
    }

    fn draw_polygon(&self, color: Color, points: &[Point2D; 3], buffer: usize) -> Graph3dResult<()> {
        self.record(buffer, DrawCommand::DrawPolygon { color, points: *points })
    }

    fn draw_line(&self, color: Color, from: Point2D, to: Point2D, buffer: usize) -> Graph3dResult<()> {
        self.record(buffer, DrawCommand::Line { color, from, to })
    }

    fn draw_lines(&self, color: Color, points: &[Point2D], width: f32, buffer: usize) -> Graph3dResult<()> {
        self.record(
            buffer,
            DrawCommand::Lines {
                color,
                points: points.to_vec(),
                width,
            },
        )
    }

    fn fill_ellipse(&self, color: Color, x: f32, y: f32, width: f32, height: f32, buffer: usize) -> Graph3dResult<()> {
        self.record(
            buffer,
            DrawCommand::FillEllipse {
                color,
                x,
                y,
                width,
                height,
            },
        )
    }

    fn draw_rectangle(&self, color: Color, x: f32, y: f32, width: f32, height: f32, buffer: usize) -> Graph3dResult<()> {
        self.record(
            buffer,
            DrawCommand::Rectangle {
                color,
                x,
                y,
                width,
                height,
            },
        )
    }

    fn draw_text(&self, text: &str, color: Color, x: f32, y: f32, buffer: usize) -> Graph3dResult<()> {
        self.record(
            buffer,
            DrawCommand::Text {
                text: text.to_string(),
                color,
                x,
                y,
            },
        )
    }

    fn merge_buffers(&self) -> Graph3dResult<()> {
        let Some((first, rest)) = self.buffers.split_first() else {
            return Ok(());
        };
        let mut target = first.lock();
        for buffer in rest {
            target.append(&mut buffer.lock());
        }
        Ok(())
    }

    fn render(&self, buffer: usize) -> Graph3dResult<()> {
        if buffer >= self.buffers.len() {
            return Err(Graph3dError::IndexOutOfRange {
                what: "surface buffer",
                index: buffer,
                len: self.buffers.len(),
            });
        }
        self.presented.lock().push(buffer);
        Ok(())
    }
}

#[cfg(test)]
mod tests;
