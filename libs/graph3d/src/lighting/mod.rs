//! Per-polygon lighting.
//!
//! Every light adds to `Polygon3D::lighting_color`, which a frame starts at
//! black via [`reset_lighting`]. Channel contributions are
//! `trunc((material + light) * t)` for a per-light intensity `t`; only positive
//! contributions are added (ambient adds signed), and the result is clamped to
//! `0..=255`. Alpha always comes from the polygon's material colour for that
//! side. Single-sided polygons light only side 0.
//!
//! Directional and point-like lights weigh a diffuse term against a
//! reflected-ray highlight by each side's matte factor, and negate the
//! intensity for the back side.

mod fog;

pub use fog::Fog;

use ::config::constants::SPOT_CONE_EPSILON;
use rayon::prelude::*;

use crate::core::color::{clamp_channel, Color};
use crate::core::normal::normalize_with_length;
use crate::core::point::{cos_angle, Point3D};
use crate::error::{Graph3dError, Graph3dResult};
use crate::model::Polygon3D;

/// Cone parameters shared by the spot light kinds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLight {
    /// Light position in camera space.
    pub position: Point3D,
    /// Unit axis of the cone.
    pub vector: Point3D,
    /// Cosine of the full-intensity half angle.
    pub cos_inner: f32,
    /// Cosine of the cut-off half angle; must not exceed `cos_inner`.
    pub cos_outer: f32,
    /// Light colour.
    pub color: Color,
    /// Intensity; zero or negative lights nothing.
    pub power: f32,
}

/// A light source in camera space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    /// Uniform light from everywhere.
    Ambient {
        /// Light colour.
        color: Color,
        /// Intensity; negative counts as zero.
        power: f32,
    },
    /// Parallel light along a unit vector.
    Directional {
        /// Unit direction.
        vector: Point3D,
        /// Light colour.
        color: Color,
        /// Intensity; negative counts as zero.
        power: f32,
    },
    /// Omnidirectional light with `1/distance` falloff.
    Point {
        /// Light position.
        position: Point3D,
        /// Light colour.
        color: Color,
        /// Intensity; negative counts as zero.
        power: f32,
    },
    /// Cone light evaluated at polygon centres.
    Spot(SpotLight),
    /// Cone light evaluated at each polygon vertex and averaged, softening
    /// the cone edge across large polygons.
    SpotSoft(SpotLight),
}

/// Sets the lit colour of both sides of every polygon to opaque black.
pub fn reset_lighting(polygons: &mut [Polygon3D], parallel: bool) {
    let reset = |p: &mut Polygon3D| p.lighting_color = [Color::BLACK; 2];
    if parallel {
        polygons.par_iter_mut().for_each(reset);
    } else {
        polygons.iter_mut().for_each(reset);
    }
}

/// Adds `light` to the active polygons.
///
/// Point-like lights read polygon centres, so camera-space centres and
/// normals must be current. Spot cones are validated before anything is
/// written.
pub fn apply_light(
    light: &Light,
    polygons: &mut [Polygon3D],
    active: &[usize],
    camera: &[Point3D],
) -> Graph3dResult<()> {
    match light {
        Light::Ambient { color, power } => {
            let t = power.max(0.0) * 0.5;
            for &i in active {
                add_ambient(&mut polygons[i], *color, t);
            }
        }
        Light::Directional {
            vector,
            color,
            power,
        } => {
            let power = power.max(0.0);
            for &i in active {
                let poly = &mut polygons[i];
                let cos = cos_angle(*vector, poly.normal);
                let highlight = (poly.normal.z * cos * 2.0 - vector.z).max(0.0) * 2.0;
                add_sided(poly, *color, cos * power * 0.5, highlight);
            }
        }
        Light::Point {
            position,
            color,
            power,
        } => {
            let power = power.max(0.0);
            for &i in active {
                let poly = &mut polygons[i];
                let (l, dist_k) = incidence(poly.center, *position);
                let cos = cos_angle(l, poly.normal);
                let highlight = (poly.normal.z * cos * 2.0 - l.z).max(0.0) * 3.0;
                add_sided(poly, *color, cos * power * dist_k * 0.5, highlight);
            }
        }
        Light::Spot(spot) => {
            let inv = cone_ramp(spot)?;
            if spot.power <= 0.0 {
                return Ok(());
            }
            for &i in active {
                let poly = &mut polygons[i];
                if let Some((p, highlight)) = spot_intensity(spot, inv, poly.center, poly.normal) {
                    add_sided(poly, spot.color, p, highlight);
                }
            }
        }
        Light::SpotSoft(spot) => {
            let inv = cone_ramp(spot)?;
            if spot.power <= 0.0 {
                return Ok(());
            }
            for &i in active {
                add_spot_soft(&mut polygons[i], spot, inv, camera)?;
            }
        }
    }
    Ok(())
}

/// Normalized light-to-target vector and the `1/distance` factor.
fn incidence(target: Point3D, position: Point3D) -> (Point3D, f32) {
    let l = target - position;
    let dist = l.length();
    let dist_k = if dist > 1.0 { 1.0 / dist } else { 1.0 };
    (normalize_with_length(l, dist), dist_k)
}

/// Validates the cone and returns the reciprocal of its ramp width.
fn cone_ramp(spot: &SpotLight) -> Graph3dResult<f32> {
    if spot.cos_inner < spot.cos_outer {
        return Err(Graph3dError::InvalidLightCone {
            inner: spot.cos_inner,
            outer: spot.cos_outer,
        });
    }
    let delta = spot.cos_inner - spot.cos_outer;
    Ok(if delta > SPOT_CONE_EPSILON {
        1.0 / delta
    } else {
        f32::MAX
    })
}

/// Diffuse intensity and highlight of a spot at `target`, or `None` outside
/// the cone.
fn spot_intensity(spot: &SpotLight, inv: f32, target: Point3D, normal: Point3D) -> Option<(f32, f32)> {
    let (l, dist_k) = incidence(target, spot.position);
    let a = cos_angle(l, spot.vector);
    if a <= spot.cos_outer {
        return None;
    }
    let ramp = if a < spot.cos_inner {
        (a - spot.cos_outer) * inv
    } else {
        1.0
    };
    let cos = cos_angle(l, normal);
    let p = ramp * cos * spot.power * dist_k * 0.5;
    let highlight = ((normal.z * cos * 2.0 - l.z) * 3.0).max(0.0);
    Some((p, highlight))
}

#[inline]
fn channel_delta(material: u8, light: u8, t: f32) -> i32 {
    ((f32::from(material) + f32::from(light)) * t) as i32
}

fn add_ambient(poly: &mut Polygon3D, light: Color, t: f32) {
    for side in 0..poly.side_count() {
        let base = poly.color[side];
        let lit = poly.lighting_color[side];
        poly.lighting_color[side] = Color::from_rgb_clamped(
            base.a,
            i32::from(lit.r) + channel_delta(base.r, light.r, t),
            i32::from(lit.g) + channel_delta(base.g, light.g, t),
            i32::from(lit.b) + channel_delta(base.b, light.b, t),
        );
    }
}

/// Positive per-channel contributions of `light` on `side` at intensity `t`.
fn side_deltas(poly: &Polygon3D, side: usize, light: Color, t: f32) -> [i32; 3] {
    let base = poly.color[side];
    [
        channel_delta(base.r, light.r, t),
        channel_delta(base.g, light.g, t),
        channel_delta(base.b, light.b, t),
    ]
}

fn add_deltas(poly: &mut Polygon3D, side: usize, deltas: [i32; 3]) {
    let lit = poly.lighting_color[side].rgb();
    let mut out = [0_i32; 3];
    for ch in 0..3 {
        out[ch] = lit[ch] + deltas[ch].max(0);
    }
    poly.lighting_color[side] = Color::from_rgb_clamped(poly.color[side].a, out[0], out[1], out[2]);
}

/// Adds diffuse intensity `p` blended with `highlight` by each side's
/// matte, negating `p` for the back side.
fn add_sided(poly: &mut Polygon3D, light: Color, mut p: f32, highlight: f32) {
    for side in 0..poly.side_count() {
        let matte = poly.matte[side];
        let t = p * ((1.0 - matte) * highlight + matte);
        let deltas = side_deltas(poly, side, light, t);
        add_deltas(poly, side, deltas);
        p = -p;
    }
}

fn add_spot_soft(poly: &mut Polygon3D, spot: &SpotLight, inv: f32, camera: &[Point3D]) -> Graph3dResult<()> {
    let mut sum = [[0_i32; 3]; 2];
    let mut count = [[0_i32; 3]; 2];
    for &vi in &poly.indices {
        let vertex = *camera.get(vi).ok_or(Graph3dError::IndexOutOfRange {
            what: "vertex",
            index: vi,
            len: camera.len(),
        })?;
        let Some((mut p, highlight)) = spot_intensity(spot, inv, vertex, poly.normal) else {
            continue;
        };
        for side in 0..poly.side_count() {
            let matte = poly.matte[side];
            let t = p * ((1.0 - matte) * highlight + matte);
            for (ch, delta) in side_deltas(poly, side, spot.color, t).into_iter().enumerate() {
                if delta > 0 {
                    sum[side][ch] += delta;
                    count[side][ch] += 1;
                }
            }
            p = -p;
        }
    }
    for side in 0..poly.side_count() {
        let mut avg = [0_i32; 3];
        for ch in 0..3 {
            avg[ch] = sum[side][ch] / count[side][ch].max(1);
        }
        add_deltas(poly, side, avg);
    }
    Ok(())
}

/// Clamps a floating channel value after truncation.
pub(crate) fn trunc_channel(value: f32) -> u8 {
    clamp_channel(value as i32)
}
