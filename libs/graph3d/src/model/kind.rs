//! Model kind tags and the shape-builder seam.

use crate::core::point::Point3D;
use crate::error::Graph3dResult;

use super::{Polygon3D, VolumetricModel};

/// Numeric tag identifying the generator a model came from.
///
/// The codes are the ones written to the `#ModelType#` section of the mesh
/// text format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
    /// Flat elliptic fan.
    Plane3D,
    /// Flat rectangular grid.
    CellPlane3D,
    /// Cylinder.
    Cylinder3D,
    /// Ellipsoid.
    Ellipse3D,
    /// Torus.
    Tor3D,
    /// Prism.
    Prism3D,
    /// Extruded polygon.
    Poly3D,
    /// Surface with a hole.
    SurfaceHole3D,
    /// Grid border.
    CellBorder3D,
    /// Poly-line tube.
    PolyLine3D,
    /// Rail line.
    RailLine3D,
    /// Merged composite of other models.
    ComplexModel3D,
    /// Any code this crate does not generate itself.
    Other(i32),
}

impl ModelKind {
    /// Numeric code of this kind.
    pub fn code(self) -> i32 {
        match self {
            ModelKind::Plane3D => 0,
            ModelKind::CellPlane3D => 1,
            ModelKind::Cylinder3D => 2,
            ModelKind::Ellipse3D => 3,
            ModelKind::Tor3D => 4,
            ModelKind::Prism3D => 5,
            ModelKind::Poly3D => 6,
            ModelKind::SurfaceHole3D => 7,
            ModelKind::CellBorder3D => 8,
            ModelKind::PolyLine3D => 100,
            ModelKind::RailLine3D => 101,
            ModelKind::ComplexModel3D => 1000,
            ModelKind::Other(code) => code,
        }
    }

    /// Kind for a numeric code; unknown codes map to [`ModelKind::Other`].
    ///
    /// # Examples
    /// ```
    /// use graph3d::model::ModelKind;
    /// assert_eq!(ModelKind::from_code(1000), ModelKind::ComplexModel3D);
    /// assert_eq!(ModelKind::from_code(42).code(), 42);
    /// ```
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => ModelKind::Plane3D,
            1 => ModelKind::CellPlane3D,
            2 => ModelKind::Cylinder3D,
            3 => ModelKind::Ellipse3D,
            4 => ModelKind::Tor3D,
            5 => ModelKind::Prism3D,
            6 => ModelKind::Poly3D,
            7 => ModelKind::SurfaceHole3D,
            8 => ModelKind::CellBorder3D,
            100 => ModelKind::PolyLine3D,
            101 => ModelKind::RailLine3D,
            1000 => ModelKind::ComplexModel3D,
            other => ModelKind::Other(other),
        }
    }
}

/// A parametric shape generator.
///
/// Implementors validate their parameters in [`ShapeBuilder::build_vertices`];
/// a failure there means no model is produced.
pub trait ShapeBuilder {
    /// Tag stored on built models.
    fn kind(&self) -> ModelKind;

    /// Rest-pose vertices.
    fn build_vertices(&self) -> Graph3dResult<Vec<Point3D>>;

    /// Vertex index triples of every polygon.
    fn build_polygon_map(&self) -> Vec<[usize; 3]>;

    /// Whether the built mesh encloses a volume.
    fn closed_surface(&self) -> bool {
        false
    }

    /// Builds a fresh model with default polygon properties.
    fn build_model(&self) -> Graph3dResult<VolumetricModel> {
        let vertices = self.build_vertices()?;
        let polygons = self
            .build_polygon_map()
            .into_iter()
            .map(Polygon3D::new)
            .collect();
        VolumetricModel::from_parts(self.kind(), vertices, polygons, self.closed_surface())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for kind in [
            ModelKind::Plane3D,
            ModelKind::CellPlane3D,
            ModelKind::CellBorder3D,
            ModelKind::RailLine3D,
            ModelKind::ComplexModel3D,
        ] {
            assert_eq!(ModelKind::from_code(kind.code()), kind);
        }
        assert_eq!(ModelKind::from_code(-3), ModelKind::Other(-3));
    }
}
