//! Tests for the model collection.

use super::*;
use crate::config::EngineConfig;
use crate::core::point::Point3D;
use crate::model::{ModelKind, Polygon3D};

/// One triangle per depth, projected, sorted and with camera-space centres.
fn model_at(depths: &[f32], closed: bool) -> VolumetricModel {
    let mut vertices = Vec::new();
    let mut polygons = Vec::new();
    for (i, &z) in depths.iter().enumerate() {
        vertices.extend([
            Point3D::new(0.0, 0.0, z),
            Point3D::new(1.0, 0.0, z),
            Point3D::new(0.0, 1.0, z),
        ]);
        polygons.push(Polygon3D::new([3 * i, 3 * i + 1, 3 * i + 2]));
    }
    let mut m = VolumetricModel::from_parts(ModelKind::Other(-1), vertices, polygons, closed).unwrap();
    let cfg = EngineConfig::default().serial();
    m.vertices_mut().create_screen_vertex(100.0, 0, 0);
    m.calculate_polygon_centers(&cfg);
    m.sort_active_polygon_indexes(&cfg);
    m
}

fn depth(c: &ModelCollectionController, r: PolygonRef) -> f32 {
    c.polygon(r).map(|(_, p)| p.center.z).unwrap()
}

#[test]
fn set_slot_bounds_and_replacement() {
    let mut c = ModelCollectionController::new(2).unwrap();
    assert!(c.set_slot(0, Some(model_at(&[1.0], true))).unwrap().is_none());
    assert!(c.set_slot(0, Some(model_at(&[2.0], true))).unwrap().is_some());
    let err = c.set_slot(2, None).unwrap_err();
    assert!(matches!(err, Graph3dError::IndexOutOfRange { what: "slot", index: 2, len: 2 }));
    assert!(c.slot(1).is_none());
    assert!(c.slot(7).is_none());
    assert!(c.slot_mut(0).is_some());
}

#[test]
fn two_models_interleave_by_depth() {
    let mut c = ModelCollectionController::new(2).unwrap();
    c.set_slot(0, Some(model_at(&[5.0], true))).unwrap();
    c.set_slot(1, Some(model_at(&[10.0], true))).unwrap();
    c.create_active_polygon_buffer();
    c.merge_active_polygon();
    assert_eq!(c.active_polygon_count(), 2);
    let merged = c.active_polygons();
    assert_eq!(merged[0], PolygonRef { model_index: 1, polygon_index: 0 });
    assert_eq!(merged[1], PolygonRef { model_index: 0, polygon_index: 0 });
    assert!(c.closed_surface());
}

#[test]
fn merged_buffer_is_descending_across_models() {
    let mut c = ModelCollectionController::new(3).unwrap();
    c.set_slot(0, Some(model_at(&[3.0, 40.0, 12.0, 7.0], true))).unwrap();
    c.set_slot(2, Some(model_at(&[50.0, 1.0, 12.0, 30.0, 8.0, 9.0], false))).unwrap();
    c.create_active_polygon_buffer();
    c.merge_active_polygon();
    assert_eq!(c.active_polygon_count(), 10);
    let depths: Vec<f32> = c.active_polygons().iter().map(|&r| depth(&c, r)).collect();
    assert!(depths.windows(2).all(|w| w[0] >= w[1]), "{depths:?}");
    assert!(!c.closed_surface());
    assert!(c.active_polygons().iter().all(|r| r.model_index != 1));
}

#[test]
fn filtered_polygons_stay_out_of_the_merge() {
    let mut c = ModelCollectionController::new(2).unwrap();
    c.set_slot(0, Some(model_at(&[3.0, 4.0], true))).unwrap();
    c.set_slot(1, Some(model_at(&[6.0], true))).unwrap();
    if let Some(m) = c.slot_mut(0) {
        m.filter_polygon_by_z_pos(3.5, 0.0);
    }
    c.create_active_polygon_buffer();
    c.merge_active_polygon();
    let depths: Vec<f32> = c.active_polygons().iter().map(|&r| depth(&c, r)).collect();
    assert_eq!(depths, vec![6.0, 4.0]);
}

#[test]
fn single_slot_uses_model_stack_directly() {
    let mut c = ModelCollectionController::new(1).unwrap();
    c.set_slot(0, Some(model_at(&[1.0, 2.0, 3.0], false))).unwrap();
    c.create_active_polygon_buffer();
    assert_eq!(c.active_polygon_count(), 3);
    c.merge_active_polygon();
    assert_eq!(c.active_polygon_count(), 3);
    assert!(c.active_polygons().is_empty());
    assert!(!c.closed_surface());
}

#[test]
fn empty_collection_merges_to_nothing() {
    let mut c = ModelCollectionController::new(2).unwrap();
    c.create_active_polygon_buffer();
    c.merge_active_polygon();
    assert_eq!(c.active_polygon_count(), 0);
    assert!(c.closed_surface());
}
