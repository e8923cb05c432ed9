//! Tests for the volumetric model passes.

use super::*;
use approx::assert_abs_diff_eq;

fn quad() -> VolumetricModel {
    VolumetricModel::from_parts(
        ModelKind::Other(-1),
        vec![
            Point3D::new(-1.0, -1.0, 10.0),
            Point3D::new(1.0, -1.0, 10.0),
            Point3D::new(1.0, 1.0, 10.0),
            Point3D::new(-1.0, 1.0, 10.0),
        ],
        vec![Polygon3D::new([0, 1, 2]), Polygon3D::new([0, 2, 3])],
        false,
    )
    .unwrap()
}

/// Three separate triangles at depths 5, 20 and 10.
fn layered() -> VolumetricModel {
    let mut vertices = Vec::new();
    let mut polygons = Vec::new();
    for (i, z) in [5.0_f32, 20.0, 10.0].into_iter().enumerate() {
        vertices.push(Point3D::new(0.0, 0.0, z));
        vertices.push(Point3D::new(1.0, 0.0, z));
        vertices.push(Point3D::new(0.0, 1.0, z));
        polygons.push(Polygon3D::new([3 * i, 3 * i + 1, 3 * i + 2]));
    }
    VolumetricModel::from_parts(ModelKind::Other(-1), vertices, polygons, false).unwrap()
}

fn serial() -> EngineConfig {
    EngineConfig::default().serial()
}

fn parallel() -> EngineConfig {
    EngineConfig {
        worker_count: 4,
        ..EngineConfig::default()
    }
}

fn projected_quad() -> VolumetricModel {
    let mut m = quad();
    m.vertices_mut().create_screen_vertex(100.0, 50, -50);
    m
}

/// Fan of `n` triangles around vertex 0.
struct Fan(usize);

impl ShapeBuilder for Fan {
    fn kind(&self) -> ModelKind {
        ModelKind::Other(77)
    }

    fn build_vertices(&self) -> Graph3dResult<Vec<Point3D>> {
        if self.0 == 0 {
            return Err(Graph3dError::invalid("Fan", "empty fan"));
        }
        Ok((0..self.0 + 2).map(|i| Point3D::new(i as f32, (i % 2) as f32, 1.0)).collect())
    }

    fn build_polygon_map(&self) -> Vec<[usize; 3]> {
        (0..self.0).map(|i| [0, i + 1, i + 2]).collect()
    }
}

// =============================================================================
// CONSTRUCTION
// =============================================================================

#[test]
fn out_of_range_indices_are_rejected() {
    let err = VolumetricModel::from_parts(
        ModelKind::Other(0),
        vec![Point3D::ZERO; 2],
        vec![Polygon3D::new([0, 1, 2])],
        true,
    )
    .unwrap_err();
    assert!(matches!(err, Graph3dError::IndexOutOfRange { index: 2, len: 2, .. }));
}

#[test]
fn polygon_edits_cannot_escape_the_vertex_buffer() {
    let mut m = quad();
    let err = m
        .edit_polygons(|p| {
            p[0].fill_type = FillType::Wide;
            p[1].indices = [0, 2, 4];
        })
        .unwrap_err();
    assert!(matches!(err, Graph3dError::IndexOutOfRange { index: 4, len: 4, .. }));
    assert_eq!(m.polygons()[1].indices, [0, 2, 3]);
    assert_eq!(m.polygons()[0].fill_type, FillType::Wide);

    // Every pass still indexes safely after the rejected edit.
    m.calculate_polygon_centers(&serial());
    assert!(m.validate().is_ok());

    assert_eq!(m.edit_polygons(|p| p.len()).unwrap(), 2);
}

#[test]
fn template_copies_materials_not_frame_state() {
    let mut src = quad();
    src.set_color(Color::from_argb(255, 1, 2, 3), IndexRange::ALL, PolygonSide::AllSides);
    src.set_closed_surface(true);
    src.edit_polygons(|p| p[0].lighting_color = [Color::WHITE; 2]).unwrap();
    src.filter_polygon_directed_away_from_scene(PolygonSide::AllSides);

    let copy = VolumetricModel::from_template(&src);
    assert_eq!(copy.polygons()[1].color[0], Color::from_argb(255, 1, 2, 3));
    assert_eq!(copy.polygons()[0].lighting_color, [Color::BLACK; 2]);
    assert!(copy.closed_surface());
    assert_eq!(copy.active_polygons().len(), 2);
    assert_eq!(copy.vertices().main(), src.vertices().main());
}

// =============================================================================
// NORMALS AND CENTRES
// =============================================================================

#[test]
fn screen_normal_signs() {
    for cfg in [serial(), parallel()] {
        let mut m = projected_quad();
        m.calculate_polygon_normals(true, &cfg);
        assert_eq!(m.polygons()[0].normal_z, 1.0);
        assert_eq!(m.polygons()[1].normal_z, 1.0);
    }
}

#[test]
fn camera_normals_are_unit() {
    for cfg in [serial(), parallel()] {
        let mut m = quad();
        m.calculate_polygon_normals(false, &cfg);
        for p in m.polygons() {
            assert_abs_diff_eq!(p.normal.z, -1.0, epsilon = 1e-6);
            assert_abs_diff_eq!(p.normal.length(), 1.0, epsilon = 1e-6);
        }
    }
}

#[test]
fn normals_skip_inactive_polygons() {
    let mut m = projected_quad();
    m.active.retain_by(|i| i == 1);
    m.calculate_polygon_normals_serial(true);
    assert_eq!(m.polygons()[0].normal_z, 0.0);
    assert_eq!(m.polygons()[1].normal_z, 1.0);
}

#[test]
fn centres_in_camera_and_screen_space() {
    let mut m = projected_quad();
    m.calculate_polygon_centers(&serial());
    assert_abs_diff_eq!(m.polygons()[0].center.x, 1.0 / 3.0, epsilon = 1e-6);
    assert_abs_diff_eq!(m.polygons()[0].center.y, -1.0 / 3.0, epsilon = 1e-6);
    assert_eq!(m.polygons()[0].center.z, 10.0);
    m.calculate_polygon_screen_centers();
    assert_abs_diff_eq!(m.polygons()[0].center.x, 160.0 / 3.0, epsilon = 1e-4);
}

// =============================================================================
// FILTERS
// =============================================================================

#[test]
fn backface_filter_sides() {
    let mut m = projected_quad();
    m.calculate_polygon_normals_serial(true);

    let mut front = m.clone();
    assert_eq!(front.filter_polygon_directed_away_from_scene(PolygonSide::FrontSide), 0);

    let mut rear = m.clone();
    assert_eq!(rear.filter_polygon_directed_away_from_scene(PolygonSide::RearSide), 2);

    let mut auto = m.clone();
    assert_eq!(auto.filter_polygon_directed_away_from_scene(PolygonSide::Auto), 0);

    m.set_double_sided(true, IndexRange::single(0));
    assert_eq!(m.filter_polygon_directed_away_from_scene(PolygonSide::RearSide), 1);
    assert_eq!(m.active_polygons(), &[0]);
    assert_eq!(m.filter_polygon_directed_away_from_scene(PolygonSide::AllSides), 1);
    assert!(m.active().is_empty());
}

#[test]
fn depth_filter() {
    let mut near = projected_quad();
    assert_eq!(near.filter_polygon_by_z_pos(10.0, 0.0), 2);

    let mut far = projected_quad();
    assert_eq!(far.filter_polygon_by_z_pos(5.0, 8.0), 2);

    let mut disabled_far = projected_quad();
    assert_eq!(disabled_far.filter_polygon_by_z_pos(5.0, 5.0), 0);
}

#[test]
fn screen_filter() {
    let mut inside = projected_quad();
    assert_eq!(inside.filter_polygon_by_xy_pos(100.0, 100.0), 0);

    let mut right_of_screen = projected_quad();
    assert_eq!(right_of_screen.filter_polygon_by_xy_pos(30.0, 100.0), 2);

    let mut below_screen = projected_quad();
    assert_eq!(below_screen.filter_polygon_by_xy_pos(100.0, 40.0), 2);
}

#[test]
fn reset_restores_filtered_polygons() {
    let mut m = projected_quad();
    m.filter_polygon_by_z_pos(100.0, 0.0);
    assert!(m.active().is_empty());
    m.reset_active_polygon_indexes();
    assert_eq!(m.active_polygons(), &[0, 1]);
}

// =============================================================================
// SORTING
// =============================================================================

#[test]
fn sort_is_farthest_first() {
    for cfg in [serial(), parallel()] {
        let mut m = layered();
        m.calculate_polygon_centers(&cfg);
        m.sort_active_polygon_indexes(&cfg);
        assert_eq!(m.active_polygons(), &[1, 2, 0]);
    }
}

// =============================================================================
// SETTERS
// =============================================================================

#[test]
fn setters_respect_ranges_and_sides() {
    let mut m = layered();
    let red = Color::from_argb(255, 255, 0, 0);
    m.set_color(red, IndexRange::single(1), PolygonSide::RearSide);
    assert_eq!(m.polygons()[1].color, [Color::WHITE, red]);
    assert_eq!(m.polygons()[0].color, [Color::WHITE; 2]);

    m.set_matte(2.0, IndexRange::new(1, None), PolygonSide::FrontSide);
    assert_eq!(m.polygons()[2].matte, [1.0, 0.5]);
    m.set_matte(-1.0, IndexRange::ALL, PolygonSide::Auto);
    assert_eq!(m.polygons()[0].matte, [0.0, 0.0]);

    m.set_fill_type(FillType::Wide, IndexRange::new(9, None));
    assert!(m.polygons().iter().all(|p| p.fill_type == FillType::Solid));
    m.set_fill_type(FillType::SquareWide, IndexRange::new(0, Some(1)));
    assert_eq!(m.polygons()[1].fill_type, FillType::SquareWide);
    assert_eq!(m.polygons()[2].fill_type, FillType::Solid);
}

// =============================================================================
// REBUILD AND MERGE
// =============================================================================

#[test]
fn rebuild_reapplies_first_polygon_properties() {
    let mut m = Fan(2).build_model().unwrap();
    m.set_color(Color::from_argb(255, 9, 9, 9), IndexRange::single(0), PolygonSide::AllSides);
    m.set_double_sided(true, IndexRange::single(0));
    m.rebuild_polygon_map(&Fan(5)).unwrap();
    assert_eq!(m.polygons().len(), 5);
    assert_eq!(m.vertices().vertex_count(), 7);
    assert_eq!(m.active().capacity(), 5);
    assert!(m.polygons().iter().all(|p| p.double_sided && p.color[0].r == 9));
    assert!(m.validate().is_ok());
}

#[test]
fn failed_rebuild_leaves_model_alone() {
    let mut m = Fan(2).build_model().unwrap();
    assert!(m.rebuild_polygon_map(&Fan(0)).is_err());
    assert_eq!(m.polygons().len(), 2);
}

#[test]
fn append_offsets_indices() {
    let mut a = quad();
    a.set_closed_surface(true);
    let b = layered();
    a.append(&b);
    assert_eq!(a.vertices().vertex_count(), 13);
    assert_eq!(a.polygons().len(), 5);
    assert_eq!(a.polygons()[2].indices, [4, 5, 6]);
    assert!(!a.closed_surface());
    assert!(a.validate().is_ok());
}

// =============================================================================
// LIGHTING
// =============================================================================

#[test]
fn lighting_runs_over_active_polygons() {
    let mut m = quad();
    let cfg = serial();
    m.calculate_polygon_normals(false, &cfg);
    m.calculate_polygon_centers(&cfg);
    m.reset_lighting(&cfg);
    m.add_light(&Light::Directional {
        vector: -Point3D::Z,
        color: Color::BLACK,
        power: 2.0,
    })
    .unwrap();
    assert_eq!(m.polygons()[0].lighting_color[0].r, 127);
    m.add_fog(Color::WHITE, 0.0, 10.0).unwrap();
    assert_eq!(m.polygons()[0].lighting_color[0], Color::WHITE);
    assert!(m.add_fog(Color::WHITE, 10.0, 0.0).is_err());
}
