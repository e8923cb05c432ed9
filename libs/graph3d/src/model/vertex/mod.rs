//! The three vertex buffers of a model.
//!
//! `main` is the rest pose and only changes through explicit saves or loads.
//! Per frame the camera buffer is reset from it, transformed, and projected
//! into the screen buffer. All three buffers always have the same length.

use log::debug;

use crate::core::angle::Axis3D;
use crate::core::point::{distance_from_origin, IndexRange, Point3D};
use crate::core::projection::project_point;
use crate::core::transform;
use crate::error::{Graph3dError, Graph3dResult};

/// Which vertex buffer a statistic reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexSource {
    /// Rest pose.
    Main,
    /// Camera space.
    Camera,
    /// Screen space.
    Screen,
}

/// Rest-pose, camera-space and screen-space vertex buffers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexModel {
    main: Vec<Point3D>,
    camera: Vec<Point3D>,
    screen: Vec<Point3D>,
}

impl VertexModel {
    /// Creates the buffers from rest-pose points; the camera buffer starts as
    /// a copy of them.
    pub fn from_main(points: Vec<Point3D>) -> Self {
        let camera = points.clone();
        let screen = vec![Point3D::ZERO; points.len()];
        Self {
            main: points,
            camera,
            screen,
        }
    }

    /// Rest-pose vertices.
    pub fn main(&self) -> &[Point3D] {
        &self.main
    }

    /// Camera-space vertices.
    pub fn camera(&self) -> &[Point3D] {
        &self.camera
    }

    /// Mutable camera-space vertices, for callers running their own deform.
    pub fn camera_mut(&mut self) -> &mut [Point3D] {
        &mut self.camera
    }

    /// Screen-space vertices.
    pub fn screen(&self) -> &[Point3D] {
        &self.screen
    }

    /// Number of vertices in each buffer.
    pub fn vertex_count(&self) -> usize {
        self.main.len()
    }

    fn source(&self, source: VertexSource) -> &[Point3D] {
        match source {
            VertexSource::Main => &self.main,
            VertexSource::Camera => &self.camera,
            VertexSource::Screen => &self.screen,
        }
    }

    /// Copies the rest pose into the camera buffer.
    pub fn reset_camera_model(&mut self) {
        self.camera.copy_from_slice(&self.main);
    }

    /// Makes the current camera-space pose the new rest pose.
    pub fn save_camera_model_to_main(&mut self) {
        self.main.copy_from_slice(&self.camera);
    }

    /// Rotates every camera-space vertex.
    pub fn rotate(&mut self, angle: f32, axis: Axis3D) {
        transform::rotate_points(angle, axis, &mut self.camera, IndexRange::ALL);
    }

    /// Rotates a range of camera-space vertices.
    pub fn rotate_range(&mut self, angle: f32, axis: Axis3D, range: IndexRange) {
        transform::rotate_points(angle, axis, &mut self.camera, range);
    }

    /// Translates every camera-space vertex.
    pub fn move_by(&mut self, dx: f32, dy: f32, dz: f32) {
        transform::move_points(dx, dy, dz, &mut self.camera, IndexRange::ALL);
    }

    /// Translates a range of camera-space vertices.
    pub fn move_range(&mut self, dx: f32, dy: f32, dz: f32, range: IndexRange) {
        transform::move_points(dx, dy, dz, &mut self.camera, range);
    }

    /// Scales camera space uniformly.
    pub fn zoom(&mut self, k: f32) {
        transform::zoom_points(k, &mut self.camera);
    }

    /// Scales camera space per axis.
    pub fn zoom_xyz(&mut self, kx: f32, ky: f32, kz: f32) {
        transform::zoom_points_xyz(kx, ky, kz, &mut self.camera);
    }

    /// Projects the camera buffer into the screen buffer.
    pub fn create_screen_vertex(&mut self, k: f32, cx: i32, cy: i32) {
        for (dst, src) in self.screen.iter_mut().zip(&self.camera) {
            *dst = *src;
            project_point(dst, k, cx, cy);
        }
    }

    /// Replaces the rest pose. The camera buffer is reset to it; camera and
    /// screen storage is reallocated only when the vertex count changes.
    /// Callers must replace the polygons of the owning model in the same step.
    pub(crate) fn replace_main(&mut self, points: Vec<Point3D>) {
        if points.len() != self.main.len() {
            debug!(
                "reallocating vertex buffers: {} -> {} vertices",
                self.main.len(),
                points.len()
            );
            self.camera = vec![Point3D::ZERO; points.len()];
            self.screen = vec![Point3D::ZERO; points.len()];
        }
        self.main = points;
        self.reset_camera_model();
    }

    /// Copy of the rest pose.
    pub fn save_main_vertex_buffer(&self) -> Vec<Point3D> {
        self.main.clone()
    }

    /// Restores a rest pose saved with [`VertexModel::save_main_vertex_buffer`].
    pub fn load_main_vertex_buffer(&mut self, saved: &[Point3D]) -> Graph3dResult<()> {
        if saved.len() != self.main.len() {
            return Err(Graph3dError::BufferSizeMismatch {
                source_len: saved.len(),
                destination: self.main.len(),
            });
        }
        self.main.copy_from_slice(saved);
        Ok(())
    }

    /// Component-wise minimum and maximum, `None` for an empty model.
    pub fn min_max(&self, source: VertexSource) -> Option<(Point3D, Point3D)> {
        let points = self.source(source);
        let first = *points.first()?;
        Some(
            points
                .iter()
                .fold((first, first), |(lo, hi), p| (lo.min(*p), hi.max(*p))),
        )
    }

    /// Mean of all vertices.
    pub fn average(&self, source: VertexSource) -> Option<Point3D> {
        let points = self.source(source);
        if points.is_empty() {
            return None;
        }
        let sum = points.iter().fold(Point3D::ZERO, |acc, p| acc + *p);
        Some(sum / points.len() as f32)
    }

    /// Centre of the bounding box.
    ///
    /// # Examples
    /// ```
    /// use graph3d::core::point::Point3D;
    /// use graph3d::model::{VertexModel, VertexSource};
    /// let v = VertexModel::from_main(vec![Point3D::ZERO, Point3D::new(4.0, 2.0, -2.0), Point3D::X]);
    /// assert_eq!(v.center(VertexSource::Main), Some(Point3D::new(2.0, 1.0, -1.0)));
    /// ```
    pub fn center(&self, source: VertexSource) -> Option<Point3D> {
        self.min_max(source).map(|(lo, hi)| (lo + hi) * 0.5)
    }

    /// Largest rest-pose distance from the origin.
    pub fn max_radius(&self) -> f32 {
        self.main
            .iter()
            .map(|p| distance_from_origin(*p))
            .fold(0.0, f32::max)
    }
}
