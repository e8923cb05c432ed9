//! Composite models assembled from other models.

use log::debug;

use crate::core::point::{square_distance, Point3D};
use crate::error::{Graph3dError, Graph3dResult};
use crate::model::{ModelKind, Polygon3D, VolumetricModel};

/// Appends `other` to `model` and tags the result as a composite.
///
/// Polygon materials are kept; the composite is closed only when both parts
/// were.
///
/// # Examples
/// ```
/// use graph3d::model::ModelKind;
/// use graph3d::primitives::{merge_object, CellPlane3D, Plane3D};
/// let mut scene = Plane3D::default().build().unwrap();
/// merge_object(&mut scene, &CellPlane3D::default().build().unwrap());
/// assert_eq!(scene.kind(), ModelKind::ComplexModel3D);
/// assert_eq!(scene.polygons().len(), 6);
/// ```
pub fn merge_object(model: &mut VolumetricModel, other: &VolumetricModel) {
    model.append(other);
    model.set_kind(ModelKind::ComplexModel3D);
}

/// Welds rest-pose vertices closer than `min_distance` to an earlier
/// vertex, then drops polygons that collapsed onto fewer than three distinct
/// vertices. Returns the number of vertices removed.
///
/// Fails, leaving the model untouched, when no polygon survives.
pub fn merge_near_vertex(model: &mut VolumetricModel, min_distance: f32) -> Graph3dResult<usize> {
    let limit = min_distance * min_distance;
    let main = model.vertices().main();

    let mut kept: Vec<Point3D> = Vec::with_capacity(main.len());
    let mut remap = Vec::with_capacity(main.len());
    for &p in main {
        let near = kept.iter().position(|&q| square_distance(q, p) <= limit);
        remap.push(near.unwrap_or_else(|| {
            kept.push(p);
            kept.len() - 1
        }));
    }

    let polygons: Vec<Polygon3D> = model
        .polygons()
        .iter()
        .filter_map(|p| {
            let [a, b, c] = p.indices.map(|i| remap[i]);
            (a != b && a != c && b != c).then(|| Polygon3D { indices: [a, b, c], ..*p })
        })
        .collect();
    if polygons.is_empty() {
        return Err(Graph3dError::invalid(
            "ComplexModel3D",
            "welding collapsed every polygon",
        ));
    }

    let removed = main.len() - kept.len();
    debug!(
        "welded {removed} vertices, {} of {} polygons left",
        polygons.len(),
        model.polygons().len()
    );
    model.replace_mesh(kept, polygons)?;
    Ok(removed)
}
