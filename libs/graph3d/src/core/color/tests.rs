//! Tests for colours.

use super::*;

#[test]
fn constants_are_opaque() {
    assert_eq!(Color::BLACK.a, 255);
    assert_eq!(Color::WHITE, Color::from_argb(255, 255, 255, 255));
    assert_eq!(Color::default(), Color::WHITE);
}

#[test]
fn clamped_constructor_saturates_both_ends() {
    let c = Color::from_rgb_clamped(10, -1, 256, 42);
    assert_eq!(c, Color::from_argb(10, 0, 255, 42));
}

#[test]
fn rgb_and_alpha_helpers() {
    let c = Color::from_argb(1, 2, 3, 4);
    assert_eq!(c.rgb(), [2, 3, 4]);
    assert_eq!(c.with_alpha(200).a, 200);
    assert_eq!(clamp_channel(i32::MIN), 0);
    assert_eq!(clamp_channel(i32::MAX), 255);
}
