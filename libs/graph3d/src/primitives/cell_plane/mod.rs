//! Flat rectangular grid in the XZ plane.

use crate::core::point::Point3D;
use crate::error::{Graph3dError, Graph3dResult, ResultExt};
use crate::model::{ModelKind, ShapeBuilder, VolumetricModel};

use super::{float, property, Properties};

/// A grid of `nx` × `nz` vertices spanning `width_x` × `width_z`, centred on
/// the origin at `y = 0`.
///
/// Vertex `j * nx + i` sits at column `i`, row `j`. Every cell is split into
/// two triangles.
///
/// # Examples
/// ```
/// use graph3d::primitives::CellPlane3D;
/// let grid = CellPlane3D::new(3, 4, 20.0, 30.0).build().unwrap();
/// assert_eq!(grid.vertices().vertex_count(), 12);
/// assert_eq!(grid.polygons().len(), 2 * 2 * 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellPlane3D {
    /// Vertices along X, at least 2.
    pub nx: usize,
    /// Vertices along Z, at least 2.
    pub nz: usize,
    /// Extent along X.
    pub width_x: f32,
    /// Extent along Z.
    pub width_z: f32,
}

impl Default for CellPlane3D {
    fn default() -> Self {
        Self::new(2, 2, 100.0, 100.0)
    }
}

impl CellPlane3D {
    /// Collects the parameters; nothing is checked until a build.
    pub fn new(nx: usize, nz: usize, width_x: f32, width_z: f32) -> Self {
        Self {
            nx,
            nz,
            width_x,
            width_z,
        }
    }

    /// Builds a fresh grid.
    pub fn build(&self) -> Graph3dResult<VolumetricModel> {
        self.build_model().context("CellPlane3D", "build")
    }

    /// Regenerates `model` from these parameters, keeping the material of
    /// its first polygon.
    pub fn rebuild(&self, model: &mut VolumetricModel) -> Graph3dResult<()> {
        model.rebuild_polygon_map(self).context("CellPlane3D", "rebuild")
    }

    /// Parameters as `key=value` properties.
    pub fn properties(&self) -> Properties {
        vec![
            ("Nx".to_string(), self.nx.to_string()),
            ("Nz".to_string(), self.nz.to_string()),
            ("WidthX".to_string(), float(self.width_x)),
            ("WidthZ".to_string(), float(self.width_z)),
        ]
    }

    /// Reads parameters from properties; missing keys keep their defaults.
    pub fn from_properties(props: &[(String, String)]) -> Graph3dResult<Self> {
        const C: &str = "CellPlane3D";
        let d = Self::default();
        Ok(Self {
            nx: property(props, C, "Nx")?.unwrap_or(d.nx),
            nz: property(props, C, "Nz")?.unwrap_or(d.nz),
            width_x: property(props, C, "WidthX")?.unwrap_or(d.width_x),
            width_z: property(props, C, "WidthZ")?.unwrap_or(d.width_z),
        })
    }
}

impl ShapeBuilder for CellPlane3D {
    fn kind(&self) -> ModelKind {
        ModelKind::CellPlane3D
    }

    fn build_vertices(&self) -> Graph3dResult<Vec<Point3D>> {
        let (nx, nz) = (self.nx, self.nz);
        if nx < 2 || nz < 2 {
            return Err(Graph3dError::invalid(
                "CellPlane3D",
                format!("each side needs at least 2 points, got {nx}x{nz}"),
            ));
        }
        let step_x = self.width_x / (nx - 1) as f32;
        let step_z = self.width_z / (nz - 1) as f32;
        let mut vertices = Vec::with_capacity(nx * nz);
        for j in 0..nz {
            for i in 0..nx {
                vertices.push(Point3D::new(
                    i as f32 * step_x - self.width_x / 2.0,
                    0.0,
                    j as f32 * step_z - self.width_z / 2.0,
                ));
            }
        }
        Ok(vertices)
    }

    fn build_polygon_map(&self) -> Vec<[usize; 3]> {
        let nx = self.nx;
        let mut map = Vec::with_capacity(2 * self.nx.saturating_sub(1) * self.nz.saturating_sub(1));
        for i in 1..self.nx {
            for j in 1..self.nz {
                map.push([j * nx + i - 1, j * nx + i, (j - 1) * nx + i - 1]);
                map.push([(j - 1) * nx + i, (j - 1) * nx + i - 1, j * nx + i]);
            }
        }
        map
    }
}
