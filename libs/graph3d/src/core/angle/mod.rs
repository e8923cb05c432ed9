//! Euler angles and rotation axes.

use std::f32::consts::PI;

/// Degrees per radian.
pub const RADIAN_DEGREES: f32 = 180.0 / PI;
/// A quarter turn in radians.
pub const RADIAN_90: f32 = PI / 2.0;
/// A half turn in radians.
pub const RADIAN_180: f32 = PI;
/// Three quarter turns in radians.
pub const RADIAN_270: f32 = PI * 1.5;
/// A full turn in radians.
pub const RADIAN_360: f32 = PI * 2.0;

/// Rotation plane selector.
///
/// The variant name lists the axis first, then the two coordinates it mixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis3D {
    /// Rotation about X; mixes Y and Z.
    OXyz,
    /// Rotation about Y; mixes X and Z.
    OYxz,
    /// Rotation about Z; mixes X and Y.
    OZyx,
}

/// Three Euler angles, one per axis. Units are whatever the caller keeps them
/// in; [`Angle3D::to_radians`] and [`Angle3D::to_degrees`] convert.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Angle3D {
    /// Angle about X.
    pub alpha: f32,
    /// Angle about Y.
    pub betta: f32,
    /// Angle about Z.
    pub gamma: f32,
}

impl Angle3D {
    /// Creates an angle triple.
    pub fn new(alpha: f32, betta: f32, gamma: f32) -> Self {
        Self {
            alpha,
            betta,
            gamma,
        }
    }

    /// Interprets the triple as degrees and converts it to radians.
    ///
    /// # Examples
    /// ```
    /// use graph3d::core::angle::{Angle3D, RADIAN_180};
    /// let a = Angle3D::new(180.0, 0.0, 90.0).to_radians();
    /// assert!((a.alpha - RADIAN_180).abs() < 1e-6);
    /// ```
    pub fn to_radians(self) -> Self {
        Self::new(
            self.alpha / RADIAN_DEGREES,
            self.betta / RADIAN_DEGREES,
            self.gamma / RADIAN_DEGREES,
        )
    }

    /// Interprets the triple as radians and converts it to degrees.
    pub fn to_degrees(self) -> Self {
        Self::new(
            self.alpha * RADIAN_DEGREES,
            self.betta * RADIAN_DEGREES,
            self.gamma * RADIAN_DEGREES,
        )
    }

    /// Each component rounded to the nearest integer.
    pub fn rounded(self) -> Self {
        Self::new(self.alpha.round(), self.betta.round(), self.gamma.round())
    }

    /// Rounds every component in place.
    pub fn round_in_place(&mut self) {
        *self = self.rounded();
    }
}

/// Wraps an angle in radians by whole turns.
///
/// Any angle above `-2π` lands in `[0, 2π)`.
///
/// # Examples
/// ```
/// use graph3d::core::angle::{normalize_radians, RADIAN_360};
/// assert!((normalize_radians(RADIAN_360 + 1.0) - 1.0).abs() < 1e-5);
/// ```
pub fn normalize_radians(angle: f32) -> f32 {
    let turns = (angle / RADIAN_360 + 1.0).trunc() - 1.0;
    angle - turns * RADIAN_360
}
