//! Point aliases over `glam` vectors plus distance and index-range helpers.
//!
//! The same `Point3D` type holds rest-pose, camera-space and screen-space
//! coordinates; in screen space `z` carries the rounded depth used for
//! sorting, not a display coordinate.

use std::ops::Range;

pub use glam::Vec2 as Point2D;
pub use glam::Vec3 as Point3D;

/// Inclusive index range over a point or polygon buffer.
///
/// `last: None` means "through the end of the buffer". Resolution never fails:
/// out-of-range bounds are clamped as documented on each resolver.
///
/// # Examples
/// ```
/// use graph3d::core::point::IndexRange;
/// assert_eq!(IndexRange::ALL.resolve(4), 0..4);
/// assert_eq!(IndexRange::new(1, Some(2)).resolve(4), 1..3);
/// assert_eq!(IndexRange::new(9, None).resolve(4), 4..4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndexRange {
    /// First index, inclusive.
    pub first: usize,
    /// Last index, inclusive; `None` for the end of the buffer.
    pub last: Option<usize>,
}

impl IndexRange {
    /// The whole buffer.
    pub const ALL: IndexRange = IndexRange {
        first: 0,
        last: None,
    };

    /// Creates a range from `first` through `last`.
    pub fn new(first: usize, last: Option<usize>) -> Self {
        Self { first, last }
    }

    /// A single index.
    pub fn single(index: usize) -> Self {
        Self {
            first: index,
            last: Some(index),
        }
    }

    fn end(&self, len: usize) -> usize {
        match self.last {
            Some(last) if last < len => last + 1,
            _ => len,
        }
    }

    /// Resolves against `len`; a `first` past the end selects nothing.
    pub fn resolve(&self, len: usize) -> Range<usize> {
        let end = self.end(len);
        self.first.min(end)..end
    }

    /// Resolves against `len`; a `first` past the end is pinned to the last
    /// element.
    pub fn resolve_pinned(&self, len: usize) -> Range<usize> {
        if len == 0 {
            return 0..0;
        }
        let end = self.end(len);
        let first = self.first.min(len - 1);
        first.min(end)..end
    }
}

/// Cosine of the angle between two unit vectors (their dot product).
pub fn cos_angle(a: Point3D, b: Point3D) -> f32 {
    a.x * b.x + a.y * b.y + a.z * b.z
}

/// Distance of a point from the origin.
pub fn distance_from_origin(p: Point3D) -> f32 {
    square_distance_from_origin(p).sqrt()
}

/// Distance between two points.
pub fn distance(a: Point3D, b: Point3D) -> f32 {
    square_distance(a, b).sqrt()
}

/// Squared distance of a point from the origin.
pub fn square_distance_from_origin(p: Point3D) -> f32 {
    p.x * p.x + p.y * p.y + p.z * p.z
}

/// Squared distance between two points.
pub fn square_distance(a: Point3D, b: Point3D) -> f32 {
    let (dx, dy, dz) = (a.x - b.x, a.y - b.y, a.z - b.z);
    dx * dx + dy * dy + dz * dz
}

/// Planar distance of a point from the origin.
pub fn distance_2d_from_origin(p: Point2D) -> f32 {
    (p.x * p.x + p.y * p.y).sqrt()
}

/// Planar distance between two points.
pub fn distance_2d(a: Point2D, b: Point2D) -> f32 {
    distance_2d_from_origin(a - b)
}

/// True when `test` lies inside or on the edge of the triangle `p1 p2 p3`.
///
/// # Examples
/// ```
/// use graph3d::core::point::{point_in_triangle, Point2D};
/// let (a, b, c) = (Point2D::new(0.0, 0.0), Point2D::new(4.0, 0.0), Point2D::new(0.0, 4.0));
/// assert!(point_in_triangle(a, b, c, Point2D::new(1.0, 1.0)));
/// assert!(!point_in_triangle(a, b, c, Point2D::new(3.0, 3.0)));
/// ```
pub fn point_in_triangle(p1: Point2D, p2: Point2D, p3: Point2D, test: Point2D) -> bool {
    let a = (p1.x - test.x) * (p2.y - p1.y) - (p2.x - p1.x) * (p1.y - test.y);
    let b = (p2.x - test.x) * (p3.y - p2.y) - (p3.x - p2.x) * (p2.y - test.y);
    let c = (p3.x - test.x) * (p1.y - p3.y) - (p1.x - p3.x) * (p3.y - test.y);
    (a >= 0.0 && b >= 0.0 && c >= 0.0) || (a <= 0.0 && b <= 0.0 && c <= 0.0)
}
