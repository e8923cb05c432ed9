//! Tests for polygon records.

use super::*;

#[test]
fn defaults() {
    let p = Polygon3D::new([0, 1, 2]);
    assert_eq!(p.color, [Color::WHITE; 2]);
    assert_eq!(p.matte, [0.5; 2]);
    assert_eq!(p.fill_type, FillType::Solid);
    assert!(!p.double_sided);
    assert_eq!(p.side_count(), 1);
}

#[test]
fn copy_properties_keeps_indices() {
    let mut src = Polygon3D::new([0, 1, 2]);
    src.color[1] = Color::from_argb(10, 20, 30, 40);
    src.matte = [0.1, 0.9];
    src.double_sided = true;
    src.fill_type = FillType::SquareWide;
    let mut dst = Polygon3D::new([5, 6, 7]);
    src.copy_properties_to(&mut dst);
    assert_eq!(dst.indices, [5, 6, 7]);
    assert_eq!(dst.color, src.color);
    assert_eq!(dst.matte, src.matte);
    assert!(dst.double_sided);
    assert_eq!(dst.fill_type, FillType::SquareWide);
}

#[test]
fn visible_side_from_normal_sign() {
    let mut p = Polygon3D::new([0, 1, 2]);
    p.normal_z = -1.0;
    assert_eq!(p.visible_side(), 0);
    p.normal_z = 0.0;
    assert_eq!(p.visible_side(), 0);
    p.normal_z = 1.0;
    assert_eq!(p.visible_side(), 1);
}

#[test]
fn codes() {
    for fill in [FillType::Solid, FillType::Wide, FillType::SquareWide] {
        assert_eq!(FillType::from_code(fill.code()), Some(fill));
    }
    assert_eq!(FillType::from_code(9), None);
    assert_eq!(PolygonSide::RearSide.code(), 2);
    assert_eq!(PolygonSide::FrontSide.slots(), &[0]);
    assert_eq!(PolygonSide::Auto.slots(), &[0, 1]);
}
