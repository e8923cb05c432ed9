//! Perspective projection from camera space to screen space.
//!
//! With `scale = k / max(z, 1)`:
//!
//! ```text
//! x' = cx + trunc(x * scale)
//! y' = -cy - trunc(y * scale)
//! z' = round(z)
//! ```
//!
//! Scaled values are clamped to `±MAX_SCREEN_VALUE` before truncation and `k`
//! is raised to at least `MIN_PERSPECTIVE_K`. `cy` enters negated: to land on
//! a surface whose rows grow downwards, pass `cy = -height / 2`, which gives
//! `y' = height / 2 - y * scale`.

use ::config::constants::{MAX_SCREEN_VALUE, MIN_PERSPECTIVE_K, MIN_PROJECTION_DEPTH};

use super::point::{IndexRange, Point3D};
use crate::error::{Graph3dError, Graph3dResult};

#[inline]
fn clamp_screen(value: f32) -> f32 {
    value.clamp(-MAX_SCREEN_VALUE, MAX_SCREEN_VALUE)
}

#[inline]
fn depth_scale(k: f32, z: f32) -> f32 {
    k.max(MIN_PERSPECTIVE_K) / if z <= MIN_PROJECTION_DEPTH { MIN_PROJECTION_DEPTH } else { z }
}

#[inline]
fn projected(p: Point3D, k: f32, cx: i32, cy: i32) -> Point3D {
    let scale = depth_scale(k, p.z);
    Point3D::new(
        cx as f32 + clamp_screen(p.x * scale).trunc(),
        -(cy as f32) - clamp_screen(p.y * scale).trunc(),
        p.z.round(),
    )
}

/// Projects one point in place.
///
/// # Examples
/// ```
/// use graph3d::core::point::Point3D;
/// use graph3d::core::projection::project_point;
/// let mut p = Point3D::new(10.0, 5.0, 100.0);
/// project_point(&mut p, 1000.0, 320, 240);
/// assert_eq!(p, Point3D::new(420.0, -290.0, 100.0));
/// ```
pub fn project_point(point: &mut Point3D, k: f32, cx: i32, cy: i32) {
    *point = projected(*point, k, cx, cy);
}

/// Projects `source` into the front of `destination`.
///
/// Fails with [`Graph3dError::BufferSizeMismatch`] when `destination` is
/// shorter than `source`; nothing is written in that case.
pub fn project_points(
    source: &[Point3D],
    destination: &mut [Point3D],
    k: f32,
    cx: i32,
    cy: i32,
) -> Graph3dResult<()> {
    if destination.len() < source.len() {
        return Err(Graph3dError::BufferSizeMismatch {
            source_len: source.len(),
            destination: destination.len(),
        });
    }
    for (dst, src) in destination.iter_mut().zip(source) {
        *dst = projected(*src, k, cx, cy);
    }
    Ok(())
}

/// Projects the points selected by `range` in place. A `first` past the end
/// projects nothing.
pub fn project_points_in_place(points: &mut [Point3D], k: f32, cx: i32, cy: i32, range: IndexRange) {
    let span = range.resolve(points.len());
    for p in &mut points[span] {
        project_point(p, k, cx, cy);
    }
}

/// Projects the points named by the first `count` entries of `indexes`.
pub fn project_indexed_points(
    points: &mut [Point3D],
    indexes: &[usize],
    count: usize,
    k: f32,
    cx: i32,
    cy: i32,
) -> Graph3dResult<()> {
    let len = points.len();
    for &index in indexes.iter().take(count) {
        let p = points.get_mut(index).ok_or(Graph3dError::IndexOutOfRange {
            what: "point",
            index,
            len,
        })?;
        project_point(p, k, cx, cy);
    }
    Ok(())
}

/// Apparent size of a length `base` seen at depth `z`.
///
/// # Examples
/// ```
/// use graph3d::core::projection::project_value;
/// assert_eq!(project_value(200.0, 10.0, 1000.0), 50.0);
/// assert_eq!(project_value(-5.0, 10.0, 1000.0), 10_000.0);
/// ```
pub fn project_value(z: f32, base: f32, k: f32) -> f32 {
    clamp_screen(base * depth_scale(k, z))
}

/// Replaces each value with its apparent size at the depth of the matching
/// point.
pub fn project_values(points: &[Point3D], values: &mut [f32], k: f32) -> Graph3dResult<()> {
    if values.len() > points.len() {
        return Err(Graph3dError::BufferSizeMismatch {
            source_len: values.len(),
            destination: points.len(),
        });
    }
    for (value, p) in values.iter_mut().zip(points) {
        *value = project_value(p.z, *value, k);
    }
    Ok(())
}
