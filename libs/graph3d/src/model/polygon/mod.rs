//! Triangle records and their per-side material properties.

use ::config::constants::DEFAULT_MATTE;

use crate::core::color::Color;
use crate::core::point::Point3D;

/// How a polygon is rasterized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FillType {
    /// Filled triangle.
    #[default]
    Solid,
    /// Triangle outline.
    Wide,
    /// Two of the three edges, so adjacent triangle pairs draw as a quad
    /// outline.
    SquareWide,
}

impl FillType {
    /// Numeric code used by the mesh text format.
    pub fn code(self) -> i32 {
        match self {
            FillType::Solid => 0,
            FillType::Wide => 1,
            FillType::SquareWide => 2,
        }
    }

    /// Fill type for a numeric code.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(FillType::Solid),
            1 => Some(FillType::Wide),
            2 => Some(FillType::SquareWide),
            _ => None,
        }
    }
}

/// Which polygon sides an operation addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolygonSide {
    /// Both sides.
    AllSides,
    /// Side 0, facing the viewer when `normal_z <= 0`.
    FrontSide,
    /// Side 1.
    RearSide,
    /// Rendering picks the order; property setters treat it as both sides.
    Auto,
}

impl PolygonSide {
    /// Numeric code of this side selector.
    pub fn code(self) -> i32 {
        match self {
            PolygonSide::AllSides => 0,
            PolygonSide::FrontSide => 1,
            PolygonSide::RearSide => 2,
            PolygonSide::Auto => 3,
        }
    }

    /// Side slots (0 front, 1 back) addressed by a property setter.
    pub fn slots(self) -> &'static [usize] {
        match self {
            PolygonSide::FrontSide => &[0],
            PolygonSide::RearSide => &[1],
            PolygonSide::AllSides | PolygonSide::Auto => &[0, 1],
        }
    }
}

/// One triangle of a mesh.
///
/// Index `0` of each per-side array is the front side, index `1` the back.
/// `normal` is in camera space; `normal_z` is the sign of the screen-space
/// normal; `center` is either camera- or screen-space depending on which
/// centre pass ran last.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Polygon3D {
    /// Vertex indices.
    pub indices: [usize; 3],
    /// Material colour per side.
    pub color: [Color; 2],
    /// Lit colour per side, rebuilt every frame.
    pub lighting_color: [Color; 2],
    /// Diffuse/specular blend per side, `0..=1`.
    pub matte: [f32; 2],
    /// Unit normal.
    pub normal: Point3D,
    /// Screen normal sign: `-1`, `0` or `1`.
    pub normal_z: f32,
    /// Centroid.
    pub center: Point3D,
    /// Whether both sides are drawn.
    pub double_sided: bool,
    /// Rasterization style.
    pub fill_type: FillType,
}

impl Polygon3D {
    /// Creates a polygon with default properties: white, matte 0.5, solid,
    /// single-sided.
    pub fn new(indices: [usize; 3]) -> Self {
        Self {
            indices,
            color: [Color::WHITE; 2],
            lighting_color: [Color::BLACK; 2],
            matte: [DEFAULT_MATTE; 2],
            normal: Point3D::ZERO,
            normal_z: 0.0,
            center: Point3D::ZERO,
            double_sided: false,
            fill_type: FillType::Solid,
        }
    }

    /// Copies the material properties (colours, matte, sidedness, fill)
    /// onto `other`, leaving its indices and per-frame data alone.
    pub fn copy_properties_to(&self, other: &mut Polygon3D) {
        other.color = self.color;
        other.matte = self.matte;
        other.double_sided = self.double_sided;
        other.fill_type = self.fill_type;
    }

    /// Side slot facing the viewer for this polygon's screen normal.
    pub fn visible_side(&self) -> usize {
        if self.normal_z <= 0.0 {
            0
        } else {
            1
        }
    }

    /// Number of sides that take part in lighting.
    pub fn side_count(&self) -> usize {
        if self.double_sided {
            2
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests;
