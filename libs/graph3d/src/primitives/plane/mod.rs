//! Flat elliptic fan.

use log::debug;

use crate::core::angle::RADIAN_360;
use crate::core::point::Point3D;
use crate::error::{Graph3dError, Graph3dResult, ResultExt};
use crate::model::{ModelKind, ShapeBuilder, VolumetricModel};

use super::{float, property, Properties};

/// A fan of `n` triangles in the XY plane around a centre vertex.
///
/// Ring vertex `i` sits at angle `angle_start + i * step` with
/// `step = (angle_finish - angle_start) / (n - 1)`. Each quadrant of the
/// ring has its own radius: positive cosines scale by `rx_plus`, negative
/// ones by `rx_minus`, and likewise for sines with `ry_plus` and `ry_minus`.
/// The centre is vertex `n`; polygon `i` is `[i, n, i + 1]`, so the last
/// polygon repeats the centre and is degenerate.
///
/// # Examples
/// ```
/// use graph3d::primitives::Plane3D;
/// let model = Plane3D::new(4, 10.0, 10.0, 10.0, 10.0, 0.0, std::f32::consts::PI).build().unwrap();
/// assert_eq!(model.vertices().vertex_count(), 5);
/// assert_eq!(model.polygons().len(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane3D {
    /// Ring vertex count, at least 3.
    pub n: usize,
    /// Radius along +X.
    pub rx_plus: f32,
    /// Radius along -X.
    pub rx_minus: f32,
    /// Radius along +Y.
    pub ry_plus: f32,
    /// Radius along -Y.
    pub ry_minus: f32,
    /// Angle of the first ring vertex.
    pub angle_start: f32,
    /// Angle of the last ring vertex.
    pub angle_finish: f32,
}

impl Default for Plane3D {
    fn default() -> Self {
        Self::new(4, 10.0, 10.0, 10.0, 10.0, 0.0, RADIAN_360)
    }
}

impl Plane3D {
    /// Collects the parameters; nothing is checked until a build.
    pub fn new(
        n: usize,
        rx_plus: f32,
        rx_minus: f32,
        ry_plus: f32,
        ry_minus: f32,
        angle_start: f32,
        angle_finish: f32,
    ) -> Self {
        Self {
            n,
            rx_plus,
            rx_minus,
            ry_plus,
            ry_minus,
            angle_start,
            angle_finish,
        }
    }

    /// Builds a fresh model.
    pub fn build(&self) -> Graph3dResult<VolumetricModel> {
        self.build_model().context("Plane3D", "build")
    }

    /// Regenerates `model` from these parameters, keeping the material of
    /// its first polygon. On failure the model is left as it was.
    pub fn rebuild(&self, model: &mut VolumetricModel) -> Graph3dResult<()> {
        debug!("rebuilding plane with {} ring points", self.n);
        model.rebuild_polygon_map(self).context("Plane3D", "rebuild")
    }

    /// Parameters as `key=value` properties.
    pub fn properties(&self) -> Properties {
        vec![
            ("N".to_string(), self.n.to_string()),
            ("RxPlus".to_string(), float(self.rx_plus)),
            ("RxMinus".to_string(), float(self.rx_minus)),
            ("RyPlus".to_string(), float(self.ry_plus)),
            ("RyMinus".to_string(), float(self.ry_minus)),
            ("AngleStart".to_string(), float(self.angle_start)),
            ("AngleFinish".to_string(), float(self.angle_finish)),
        ]
    }

    /// Reads parameters from properties; missing keys keep their defaults.
    pub fn from_properties(props: &[(String, String)]) -> Graph3dResult<Self> {
        const C: &str = "Plane3D";
        let d = Self::default();
        Ok(Self {
            n: property(props, C, "N")?.unwrap_or(d.n),
            rx_plus: property(props, C, "RxPlus")?.unwrap_or(d.rx_plus),
            rx_minus: property(props, C, "RxMinus")?.unwrap_or(d.rx_minus),
            ry_plus: property(props, C, "RyPlus")?.unwrap_or(d.ry_plus),
            ry_minus: property(props, C, "RyMinus")?.unwrap_or(d.ry_minus),
            angle_start: property(props, C, "AngleStart")?.unwrap_or(d.angle_start),
            angle_finish: property(props, C, "AngleFinish")?.unwrap_or(d.angle_finish),
        })
    }
}

impl ShapeBuilder for Plane3D {
    fn kind(&self) -> ModelKind {
        ModelKind::Plane3D
    }

    fn build_vertices(&self) -> Graph3dResult<Vec<Point3D>> {
        let n = self.n;
        if n < 3 {
            return Err(Graph3dError::invalid(
                "Plane3D",
                format!("need at least 3 ring points, got {n}"),
            ));
        }
        let step = (self.angle_finish - self.angle_start) / (n - 1) as f32;
        let mut vertices: Vec<Point3D> = (0..n)
            .map(|i| {
                let (sin, cos) = (self.angle_start + step * i as f32).sin_cos();
                let x = if cos >= 0.0 { self.rx_plus } else { self.rx_minus } * cos;
                let y = if sin >= 0.0 { self.ry_plus } else { self.ry_minus } * sin;
                Point3D::new(x, y, 0.0)
            })
            .collect();
        vertices.push(Point3D::ZERO);
        Ok(vertices)
    }

    fn build_polygon_map(&self) -> Vec<[usize; 3]> {
        let n = self.n;
        (0..n).map(|i| [i, n, i + 1]).collect()
    }
}
