//! In-place rigid and scaling transforms over point buffers.
//!
//! Rotations use explicit sine/cosine formulas per [`Axis3D`] rather than a
//! matrix, so the sign convention of each plane is visible in one place.

use super::angle::Axis3D;
use super::point::{IndexRange, Point3D};

/// Rotates one point by `angle` radians in the plane selected by `axis`.
///
/// # Examples
/// ```
/// use graph3d::core::angle::{Axis3D, RADIAN_90};
/// use graph3d::core::point::Point3D;
/// use graph3d::core::transform::rotate_point;
/// let mut p = Point3D::new(1.0, 0.0, 0.0);
/// rotate_point(RADIAN_90, Axis3D::OZyx, &mut p);
/// assert!(p.x.abs() < 1e-6 && (p.y + 1.0).abs() < 1e-6);
/// ```
pub fn rotate_point(angle: f32, axis: Axis3D, point: &mut Point3D) {
    let (sin, cos) = angle.sin_cos();
    rotate_with(sin, cos, axis, point);
}

#[inline]
fn rotate_with(sin: f32, cos: f32, axis: Axis3D, p: &mut Point3D) {
    match axis {
        Axis3D::OXyz => {
            let (y, z) = (p.y, p.z);
            p.z = z * cos - y * sin;
            p.y = y * cos + z * sin;
        }
        Axis3D::OYxz => {
            let (x, z) = (p.x, p.z);
            p.x = x * cos - z * sin;
            p.z = z * cos + x * sin;
        }
        Axis3D::OZyx => {
            let (x, y) = (p.x, p.y);
            p.y = y * cos - x * sin;
            p.x = x * cos + y * sin;
        }
    }
}

/// Rotates the points selected by `range`. A `first` past the end is pinned
/// to the last point.
pub fn rotate_points(angle: f32, axis: Axis3D, points: &mut [Point3D], range: IndexRange) {
    let (sin, cos) = angle.sin_cos();
    let span = range.resolve_pinned(points.len());
    for p in &mut points[span] {
        rotate_with(sin, cos, axis, p);
    }
}

/// Translates one point.
pub fn move_point(dx: f32, dy: f32, dz: f32, point: &mut Point3D) {
    point.x += dx;
    point.y += dy;
    point.z += dz;
}

/// Translates the points selected by `range`, pinning `first` like
/// [`rotate_points`].
pub fn move_points(dx: f32, dy: f32, dz: f32, points: &mut [Point3D], range: IndexRange) {
    let span = range.resolve_pinned(points.len());
    for p in &mut points[span] {
        move_point(dx, dy, dz, p);
    }
}

/// Uniformly scales every point about the origin.
pub fn zoom_points(k: f32, points: &mut [Point3D]) {
    for p in points {
        *p *= k;
    }
}

/// Scales every point about the origin with a factor per axis.
pub fn zoom_points_xyz(kx: f32, ky: f32, kz: f32, points: &mut [Point3D]) {
    let k = Point3D::new(kx, ky, kz);
    for p in points {
        *p *= k;
    }
}
