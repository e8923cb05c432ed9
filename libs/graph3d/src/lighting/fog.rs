//! Depth fog blended into lit colours.

use crate::config::EngineConfig;
use crate::core::color::Color;
use crate::error::{Graph3dError, Graph3dResult};
use crate::model::Polygon3D;

use super::trunc_channel;

/// Linear depth fog between two camera-space depths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fog {
    color: Color,
    min_distance: f32,
    full_distance: f32,
}

impl Fog {
    /// Creates fog that starts at `min_distance` and is total from
    /// `full_distance`.
    ///
    /// # Examples
    /// ```
    /// use graph3d::core::color::Color;
    /// use graph3d::lighting::Fog;
    /// assert!(Fog::new(Color::WHITE, 0.0, 100.0).is_ok());
    /// assert!(Fog::new(Color::WHITE, 100.0, 100.0).is_err());
    /// ```
    pub fn new(color: Color, min_distance: f32, full_distance: f32) -> Graph3dResult<Self> {
        if !(full_distance > min_distance) {
            return Err(Graph3dError::invalid(
                "Fog",
                format!("full distance {full_distance} must exceed min distance {min_distance}"),
            ));
        }
        Ok(Self {
            color,
            min_distance,
            full_distance,
        })
    }

    /// Fog using the distances of an engine configuration.
    pub fn from_config(color: Color, config: &EngineConfig) -> Graph3dResult<Self> {
        Self::new(color, config.min_fog_distance, config.full_fog_distance)
    }

    /// Fog colour.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Colour `lit` seen through the fog at depth `z`, with alpha `alpha`, or
    /// `None` in front of the fog.
    pub fn blend(&self, lit: Color, alpha: u8, z: f32) -> Option<Color> {
        if z < self.min_distance {
            return None;
        }
        if z >= self.full_distance {
            return Some(self.color.with_alpha(alpha));
        }
        let d = (z - self.min_distance) / (self.full_distance - self.min_distance);
        let mix = |c: u8, f: u8| trunc_channel(f32::from(c) * (1.0 - d) + f32::from(f) * d);
        Some(Color::from_argb(
            alpha,
            mix(lit.r, self.color.r),
            mix(lit.g, self.color.g),
            mix(lit.b, self.color.b),
        ))
    }

    /// Blends the lit colour of every active polygon by its centre depth.
    pub fn apply(&self, polygons: &mut [Polygon3D], active: &[usize]) {
        for &i in active {
            let poly = &mut polygons[i];
            let z = poly.center.z;
            for side in 0..poly.side_count() {
                if let Some(c) = self.blend(poly.lighting_color[side], poly.color[side].a, z) {
                    poly.lighting_color[side] = c;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::point::Point3D;

    fn fog() -> Fog {
        Fog::new(Color::from_argb(255, 200, 200, 200), 100.0, 200.0).unwrap()
    }

    #[test]
    fn nearer_than_min_is_untouched() {
        assert_eq!(fog().blend(Color::BLACK, 255, 99.9), None);
    }

    #[test]
    fn at_min_keeps_lit_colour() {
        let c = Color::from_argb(255, 10, 20, 30);
        assert_eq!(fog().blend(c, 7, 100.0), Some(c.with_alpha(7)));
    }

    #[test]
    fn at_and_beyond_full_is_fog_colour_with_material_alpha() {
        let f = fog();
        assert_eq!(f.blend(Color::BLACK, 40, 200.0), Some(Color::from_argb(40, 200, 200, 200)));
        assert_eq!(f.blend(Color::BLACK, 40, 1.0e6), Some(Color::from_argb(40, 200, 200, 200)));
    }

    #[test]
    fn midway_is_linear() {
        let c = fog().blend(Color::from_argb(255, 0, 100, 200), 255, 150.0).unwrap();
        assert_eq!((c.r, c.g, c.b), (100, 150, 200));
    }

    #[test]
    fn apply_skips_inactive_polygons() {
        let mut polys = vec![Polygon3D::new([0, 1, 2]); 2];
        polys[0].center = Point3D::new(0.0, 0.0, 500.0);
        polys[1].center = Point3D::new(0.0, 0.0, 500.0);
        fog().apply(&mut polys, &[1]);
        assert_eq!(polys[0].lighting_color[0], Color::BLACK);
        assert_eq!(polys[1].lighting_color[0], Color::from_argb(255, 200, 200, 200));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let err = Fog::new(Color::WHITE, 10.0, 5.0).unwrap_err();
        assert!(matches!(err, Graph3dError::InvalidParameter { component: "Fog", .. }));
    }
}
