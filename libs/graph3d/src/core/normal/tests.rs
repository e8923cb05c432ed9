//! Tests for normals.

use super::*;
use approx::assert_abs_diff_eq;

#[test]
fn normalized_vectors_have_unit_length() {
    for v in [
        Point3D::new(1.0, 2.0, 3.0),
        Point3D::new(-0.01, 0.0, 0.002),
        Point3D::new(1.0e4, -3.0e4, 7.0),
    ] {
        assert_abs_diff_eq!(normalize_vector(v).length(), 1.0, epsilon = 1e-5);
    }
}

#[test]
fn tiny_vectors_stay_finite() {
    let n = normalize_vector(Point3D::new(1.0e-30, 0.0, 0.0));
    assert!(n.is_finite());
    let zero = normalize_with_length(Point3D::ZERO, 0.0);
    assert_eq!(zero, Point3D::ZERO);
    assert!(!zero.is_nan());
}

#[test]
fn light_guard_is_tighter() {
    let v = Point3D::new(0.0005, 0.0, 0.0);
    let n = normalize_with_length(v, v.length());
    assert_abs_diff_eq!(n.x, 1.0, epsilon = 1e-5);
}

#[test]
fn normal_follows_edge_order() {
    // Counter-clockwise in XY seen from +Z.
    let p0 = Point3D::new(0.0, 1.0, 0.0);
    let p1 = Point3D::new(0.0, 0.0, 0.0);
    let p2 = Point3D::new(1.0, 0.0, 0.0);
    let n = triangle_normal(p0, p1, p2);
    assert_abs_diff_eq!(n.z, -1.0, epsilon = 1e-6);
    assert_eq!(triangle_normal_z(p0, p1, p2), -1.0);
    assert_eq!(triangle_normal_z(p2, p1, p0), 1.0);
}

#[test]
fn normal_z_matches_full_normal_sign() {
    let a = Point3D::new(3.0, -1.0, 2.0);
    let b = Point3D::new(0.5, 4.0, -1.0);
    let full = built_normal(a, b);
    assert_eq!(built_normal_z(a, b), full.z.signum());
}

#[test]
fn collinear_edges_give_zero_normal() {
    let n = built_normal(Point3D::X, Point3D::X * 2.0);
    assert_eq!(n, Point3D::ZERO);
    assert_eq!(built_normal_z(Point3D::X, Point3D::X * 2.0), 0.0);
}
