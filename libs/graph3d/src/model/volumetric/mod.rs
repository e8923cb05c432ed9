//! A renderable triangle mesh and its per-frame polygon passes.
//!
//! Frame order for a single model:
//!
//! 1. reset the camera buffer, deform it, project it to the screen buffer
//! 2. Z-only normals from the screen buffer, then the cull filters
//! 3. camera-space centres and full normals of the survivors
//! 4. lighting reset, lights, optional fog
//! 5. depth sort, then draw (see `surface`)
//!
//! Passes with a `&EngineConfig` run their parallel variant when the config
//! allows more than one worker.

use log::{debug, trace};
use rayon::prelude::*;

use crate::config::EngineConfig;
use crate::core::color::Color;
use crate::core::normal::{triangle_normal, triangle_normal_z};
use crate::core::point::{IndexRange, Point3D};
use crate::error::{Graph3dError, Graph3dResult};
use crate::lighting::{self, Fog, Light};
use crate::sort;

use super::{ActiveIndexes, FillType, ModelKind, Polygon3D, PolygonSide, ShapeBuilder, VertexModel};

/// Triangle mesh with vertex buffers and an active-polygon stack.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumetricModel {
    kind: ModelKind,
    vertices: VertexModel,
    polygons: Vec<Polygon3D>,
    active: ActiveIndexes,
    closed_surface: bool,
}

impl VolumetricModel {
    /// Assembles a model, checking every polygon index against the vertex
    /// count.
    pub fn from_parts(
        kind: ModelKind,
        vertices: Vec<Point3D>,
        polygons: Vec<Polygon3D>,
        closed_surface: bool,
    ) -> Graph3dResult<Self> {
        check_indices(&polygons, vertices.len())?;
        debug!(
            "building {kind:?} model: {} vertices, {} polygons",
            vertices.len(),
            polygons.len()
        );
        let active = ActiveIndexes::new(polygons.len());
        Ok(Self {
            kind,
            vertices: VertexModel::from_main(vertices),
            polygons,
            active,
            closed_surface,
        })
    }

    /// A new model with the rest pose, polygon properties and closed flag of
    /// `other`. Per-frame state starts fresh.
    pub fn from_template(other: &VolumetricModel) -> Self {
        let polygons = other
            .polygons
            .iter()
            .map(|p| {
                let mut copy = Polygon3D::new(p.indices);
                p.copy_properties_to(&mut copy);
                copy
            })
            .collect::<Vec<_>>();
        Self {
            kind: other.kind,
            vertices: VertexModel::from_main(other.vertices.main().to_vec()),
            active: ActiveIndexes::new(polygons.len()),
            polygons,
            closed_surface: other.closed_surface,
        }
    }

    /// Generator tag.
    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    /// Overrides the generator tag.
    pub fn set_kind(&mut self, kind: ModelKind) {
        self.kind = kind;
    }

    /// Vertex buffers.
    pub fn vertices(&self) -> &VertexModel {
        &self.vertices
    }

    /// Mutable vertex buffers for deformation. The public vertex API keeps
    /// the vertex count fixed; use [`VolumetricModel::rebuild_polygon_map`]
    /// or [`VolumetricModel::append`] to change it.
    pub fn vertices_mut(&mut self) -> &mut VertexModel {
        &mut self.vertices
    }

    /// All polygons.
    pub fn polygons(&self) -> &[Polygon3D] {
        &self.polygons
    }

    /// Runs `edit` over the polygons, then checks every index triple against
    /// the vertex count.
    ///
    /// When a triple is out of range the previous triples are restored and
    /// the error is returned; other edits made by `edit` are kept.
    ///
    /// # Examples
    /// ```
    /// use graph3d::core::point::Point3D;
    /// use graph3d::model::{ModelKind, Polygon3D, VolumetricModel};
    /// let mut m = VolumetricModel::from_parts(
    ///     ModelKind::Other(-1),
    ///     vec![Point3D::ZERO, Point3D::X, Point3D::Y],
    ///     vec![Polygon3D::new([0, 1, 2])],
    ///     false,
    /// )
    /// .unwrap();
    /// m.edit_polygons(|p| p[0].double_sided = true).unwrap();
    /// assert!(m.edit_polygons(|p| p[0].indices = [0, 1, 3]).is_err());
    /// assert_eq!(m.polygons()[0].indices, [0, 1, 2]);
    /// ```
    pub fn edit_polygons<R>(&mut self, edit: impl FnOnce(&mut [Polygon3D]) -> R) -> Graph3dResult<R> {
        let saved: Vec<[usize; 3]> = self.polygons.iter().map(|p| p.indices).collect();
        let result = edit(&mut self.polygons);
        if let Err(e) = check_indices(&self.polygons, self.vertices.vertex_count()) {
            for (p, indices) in self.polygons.iter_mut().zip(saved) {
                p.indices = indices;
            }
            return Err(e);
        }
        Ok(result)
    }

    /// Active-polygon stack.
    pub fn active(&self) -> &ActiveIndexes {
        &self.active
    }

    /// Live active indexes.
    pub fn active_polygons(&self) -> &[usize] {
        self.active.as_slice()
    }

    /// Whether the mesh encloses a volume.
    pub fn closed_surface(&self) -> bool {
        self.closed_surface
    }

    /// Sets the closed-surface flag.
    pub fn set_closed_surface(&mut self, closed: bool) {
        self.closed_surface = closed;
    }

    /// Checks that every polygon index addresses a vertex.
    pub fn validate(&self) -> Graph3dResult<()> {
        check_indices(&self.polygons, self.vertices.vertex_count())
    }

    /// Marks every polygon active again, in index order.
    pub fn reset_active_polygon_indexes(&mut self) {
        if self.active.capacity() == self.polygons.len() {
            self.active.reset_identity();
        } else {
            self.active.reset(self.polygons.len());
        }
    }

    /// Replaces the mesh with a freshly generated one. Material properties of
    /// the current first polygon are applied to every new polygon.
    pub fn rebuild_polygon_map(&mut self, builder: &dyn ShapeBuilder) -> Graph3dResult<()> {
        let vertices = builder.build_vertices()?;
        let map = builder.build_polygon_map();
        let template = self.polygons.first().copied();
        let polygons = map
            .into_iter()
            .map(|indices| {
                let mut p = Polygon3D::new(indices);
                if let Some(t) = &template {
                    t.copy_properties_to(&mut p);
                }
                p
            })
            .collect::<Vec<_>>();
        check_indices(&polygons, vertices.len())?;
        debug!(
            "rebuilding {:?} model: {} -> {} polygons",
            builder.kind(),
            self.polygons.len(),
            polygons.len()
        );
        self.vertices.replace_main(vertices);
        self.polygons = polygons;
        self.active.reset(self.polygons.len());
        self.kind = builder.kind();
        self.closed_surface = builder.closed_surface();
        Ok(())
    }

    /// Appends `other`'s rest-pose vertices and polygons, offsetting its
    /// indices. The closed flag becomes the conjunction of both.
    pub fn append(&mut self, other: &VolumetricModel) {
        let offset = self.vertices.vertex_count();
        let mut main = self.vertices.save_main_vertex_buffer();
        main.extend_from_slice(other.vertices.main());
        self.polygons.extend(other.polygons.iter().map(|p| {
            let mut q = Polygon3D::new(p.indices.map(|i| i + offset));
            p.copy_properties_to(&mut q);
            q
        }));
        self.vertices.replace_main(main);
        self.active.reset(self.polygons.len());
        self.closed_surface &= other.closed_surface;
    }

    /// Replaces rest pose and polygons in one step after checking them.
    pub(crate) fn replace_mesh(&mut self, vertices: Vec<Point3D>, polygons: Vec<Polygon3D>) -> Graph3dResult<()> {
        check_indices(&polygons, vertices.len())?;
        self.vertices.replace_main(vertices);
        self.polygons = polygons;
        self.active.reset(self.polygons.len());
        Ok(())
    }

    // =========================================================================
    // NORMALS AND CENTRES
    // =========================================================================

    /// Computes normals of the active polygons.
    ///
    /// With `z_only` the backface sign is taken from the screen buffer into
    /// `normal_z`; otherwise unit normals are taken from the camera buffer.
    pub fn calculate_polygon_normals(&mut self, z_only: bool, config: &EngineConfig) {
        if config.is_parallel() {
            self.calculate_polygon_normals_parallel(z_only);
        } else {
            self.calculate_polygon_normals_serial(z_only);
        }
    }

    /// Normals on the calling thread.
    pub fn calculate_polygon_normals_serial(&mut self, z_only: bool) {
        self.update_normals(z_only, false);
    }

    /// Normals computed on the rayon pool.
    pub fn calculate_polygon_normals_parallel(&mut self, z_only: bool) {
        self.update_normals(z_only, true);
    }

    fn update_normals(&mut self, z_only: bool, parallel: bool) {
        if z_only {
            let screen = self.vertices.screen();
            update_active(&mut self.polygons, self.active.as_slice(), parallel, |p| {
                let [a, b, c] = p.indices;
                triangle_normal_z(screen[a], screen[b], screen[c])
            }, |p, z| p.normal_z = z);
        } else {
            let camera = self.vertices.camera();
            update_active(&mut self.polygons, self.active.as_slice(), parallel, |p| {
                let [a, b, c] = p.indices;
                triangle_normal(camera[a], camera[b], camera[c])
            }, |p, n| p.normal = n);
        }
    }

    /// Camera-space centroids of the active polygons.
    pub fn calculate_polygon_centers(&mut self, config: &EngineConfig) {
        let camera = self.vertices.camera();
        update_active(
            &mut self.polygons,
            self.active.as_slice(),
            config.is_parallel(),
            |p| centroid(camera, p.indices),
            |p, c| p.center = c,
        );
    }

    /// Screen-space centroids of the active polygons.
    pub fn calculate_polygon_screen_centers(&mut self) {
        let screen = self.vertices.screen();
        update_active(
            &mut self.polygons,
            self.active.as_slice(),
            false,
            |p| centroid(screen, p.indices),
            |p, c| p.center = c,
        );
    }

    // =========================================================================
    // FILTERS
    // =========================================================================

    /// Removes single-sided polygons showing `side` to the viewer.
    ///
    /// `RearSide` drops those with `normal_z >= 0` and `FrontSide` those with
    /// `normal_z <= 0`. `AllSides` removes everything and `Auto` nothing.
    /// Returns the number removed.
    pub fn filter_polygon_directed_away_from_scene(&mut self, side: PolygonSide) -> usize {
        let polygons = &self.polygons;
        let removed = match side {
            PolygonSide::AllSides => {
                let n = self.active.len();
                self.active.clear();
                n
            }
            PolygonSide::Auto => 0,
            PolygonSide::RearSide => self
                .active
                .retain_by(|i| polygons[i].double_sided || polygons[i].normal_z < 0.0),
            PolygonSide::FrontSide => self
                .active
                .retain_by(|i| polygons[i].double_sided || polygons[i].normal_z > 0.0),
        };
        trace!("backface filter {side:?}: removed {removed}");
        removed
    }

    /// Removes polygons entirely at or in front of `min_z`, and when
    /// `max_z > min_z` those entirely at or beyond `max_z`, by screen depth.
    pub fn filter_polygon_by_z_pos(&mut self, min_z: f32, max_z: f32) -> usize {
        let polygons = &self.polygons;
        let screen = self.vertices.screen();
        let far = max_z > min_z;
        let removed = self.active.retain_by(|i| {
            let [a, b, c] = polygons[i].indices.map(|v| screen[v].z);
            let too_near = a <= min_z && b <= min_z && c <= min_z;
            let too_far = far && a >= max_z && b >= max_z && c >= max_z;
            !(too_near || too_far)
        });
        trace!("depth filter [{min_z}, {max_z}]: removed {removed}");
        removed
    }

    /// Removes polygons entirely outside the `width` × `height` screen.
    pub fn filter_polygon_by_xy_pos(&mut self, width: f32, height: f32) -> usize {
        let polygons = &self.polygons;
        let screen = self.vertices.screen();
        let removed = self.active.retain_by(|i| {
            let pts = polygons[i].indices.map(|v| screen[v]);
            let outside = pts.iter().all(|p| p.x <= 0.0)
                || pts.iter().all(|p| p.y <= 0.0)
                || pts.iter().all(|p| p.x >= width)
                || pts.iter().all(|p| p.y >= height);
            !outside
        });
        trace!("screen filter {width}x{height}: removed {removed}");
        removed
    }

    // =========================================================================
    // SORTING
    // =========================================================================

    /// Orders the active polygons by descending centre depth, farthest first.
    pub fn sort_active_polygon_indexes(&mut self, config: &EngineConfig) {
        let polygons = &self.polygons;
        let key = |i: usize| polygons[i].center.z;
        if config.is_parallel() {
            sort::group_sort_descending_parallel(self.active.as_mut_slice(), key);
        } else {
            sort::group_sort_descending(self.active.as_mut_slice(), key);
        }
    }

    // =========================================================================
    // MATERIAL SETTERS
    // =========================================================================

    /// Sets the material colour of `side` on the polygons in `range`.
    pub fn set_color(&mut self, color: Color, range: IndexRange, side: PolygonSide) {
        let span = range.resolve(self.polygons.len());
        for p in &mut self.polygons[span] {
            for &s in side.slots() {
                p.color[s] = color;
            }
        }
    }

    /// Sets the matte factor, clamped to `0..=1`.
    pub fn set_matte(&mut self, matte: f32, range: IndexRange, side: PolygonSide) {
        let matte = matte.clamp(0.0, 1.0);
        let span = range.resolve(self.polygons.len());
        for p in &mut self.polygons[span] {
            for &s in side.slots() {
                p.matte[s] = matte;
            }
        }
    }

    /// Sets the double-sided flag.
    pub fn set_double_sided(&mut self, double_sided: bool, range: IndexRange) {
        let span = range.resolve(self.polygons.len());
        for p in &mut self.polygons[span] {
            p.double_sided = double_sided;
        }
    }

    /// Sets the fill type.
    pub fn set_fill_type(&mut self, fill: FillType, range: IndexRange) {
        let span = range.resolve(self.polygons.len());
        for p in &mut self.polygons[span] {
            p.fill_type = fill;
        }
    }

    // =========================================================================
    // LIGHTING
    // =========================================================================

    /// Resets the lit colour of every polygon to black.
    pub fn reset_lighting(&mut self, config: &EngineConfig) {
        lighting::reset_lighting(&mut self.polygons, config.is_parallel());
    }

    /// Adds one light to the active polygons.
    pub fn add_light(&mut self, light: &Light) -> Graph3dResult<()> {
        lighting::apply_light(
            light,
            &mut self.polygons,
            self.active.as_slice(),
            self.vertices.camera(),
        )
    }

    /// Blends fog into the active polygons by centre depth.
    pub fn add_fog(&mut self, color: Color, min_distance: f32, full_distance: f32) -> Graph3dResult<()> {
        let fog = Fog::new(color, min_distance, full_distance)?;
        self.apply_fog(&fog);
        Ok(())
    }

    /// Blends prepared fog into the active polygons.
    pub fn apply_fog(&mut self, fog: &Fog) {
        fog.apply(&mut self.polygons, self.active.as_slice());
    }
}

fn check_indices(polygons: &[Polygon3D], vertex_count: usize) -> Graph3dResult<()> {
    for p in polygons {
        if let Some(&bad) = p.indices.iter().find(|&&i| i >= vertex_count) {
            return Err(Graph3dError::IndexOutOfRange {
                what: "vertex",
                index: bad,
                len: vertex_count,
            });
        }
    }
    Ok(())
}

fn centroid(points: &[Point3D], [a, b, c]: [usize; 3]) -> Point3D {
    (points[a] + points[b] + points[c]) / 3.0
}

/// Computes a value per active polygon, optionally on the rayon pool, then
/// writes the results back serially.
fn update_active<T, C, A>(polygons: &mut [Polygon3D], active: &[usize], parallel: bool, compute: C, apply: A)
where
    T: Send,
    C: Fn(&Polygon3D) -> T + Sync,
    A: Fn(&mut Polygon3D, T),
{
    let results: Vec<T> = {
        let shared: &[Polygon3D] = polygons;
        if parallel {
            active.par_iter().map(|&i| compute(&shared[i])).collect()
        } else {
            active.iter().map(|&i| compute(&shared[i])).collect()
        }
    };
    for (&i, value) in active.iter().zip(results) {
        apply(&mut polygons[i], value);
    }
}

#[cfg(test)]
mod tests;
