//! Polygon normals and vector normalization.
//!
//! Degenerate input never fails and never yields NaN: vectors below the
//! length guard are scaled by `f32::MAX` instead of divided by their length.
//! Every component of such a vector is itself below the guard, so the result
//! stays finite and the zero vector stays zero.

use ::config::constants::{LIGHT_DISTANCE_EPSILON, NORMAL_LENGTH_EPSILON, NORMAL_Z_EPSILON};

use super::point::Point3D;

/// Normalizes `v` using the polygon-normal guard.
///
/// # Examples
/// ```
/// use graph3d::core::normal::normalize_vector;
/// use graph3d::core::point::Point3D;
/// let n = normalize_vector(Point3D::new(3.0, 0.0, 4.0));
/// assert!((n.length() - 1.0).abs() < 1e-6);
/// assert_eq!(normalize_vector(Point3D::ZERO), Point3D::ZERO);
/// ```
pub fn normalize_vector(v: Point3D) -> Point3D {
    let len = v.length();
    let factor = if len < NORMAL_LENGTH_EPSILON {
        f32::MAX
    } else {
        1.0 / len
    };
    v * factor
}

/// Normalizes `v` given its precomputed length, using the light-vector guard.
pub fn normalize_with_length(v: Point3D, len: f32) -> Point3D {
    let factor = if len < LIGHT_DISTANCE_EPSILON {
        f32::MAX
    } else {
        1.0 / len
    };
    v * factor
}

#[inline]
fn cross(a: Point3D, b: Point3D) -> Point3D {
    Point3D::new(
        -a.z * b.y + a.y * b.z,
        -a.x * b.z + a.z * b.x,
        -a.y * b.x + a.x * b.y,
    )
}

/// Unit normal of the triangle with edges `v12 = p0 - p1` and `v32 = p2 - p1`.
pub fn built_normal(v12: Point3D, v32: Point3D) -> Point3D {
    normalize_vector(cross(v12, v32))
}

/// Sign of the normal's Z component: `1`, `-1`, or `0` when its magnitude is
/// below the guard. Used on screen-space edges for backface tests.
///
/// # Examples
/// ```
/// use graph3d::core::normal::built_normal_z;
/// use graph3d::core::point::Point3D;
/// assert_eq!(built_normal_z(Point3D::X, Point3D::Y), 1.0);
/// assert_eq!(built_normal_z(Point3D::Y, Point3D::X), -1.0);
/// assert_eq!(built_normal_z(Point3D::X, Point3D::X), 0.0);
/// ```
pub fn built_normal_z(v12: Point3D, v32: Point3D) -> f32 {
    let z = -v12.y * v32.x + v12.x * v32.y;
    if z.abs() < NORMAL_Z_EPSILON {
        0.0
    } else {
        z.signum()
    }
}

/// Unit normal of triangle `p0 p1 p2`.
pub fn triangle_normal(p0: Point3D, p1: Point3D, p2: Point3D) -> Point3D {
    built_normal(p0 - p1, p2 - p1)
}

/// Backface sign of triangle `p0 p1 p2`.
pub fn triangle_normal_z(p0: Point3D, p1: Point3D, p2: Point3D) -> f32 {
    built_normal_z(p0 - p1, p2 - p1)
}

#[cfg(test)]
mod tests;
