//! ARGB colour quad.

/// 8-bit-per-channel ARGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Alpha.
    pub a: u8,
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
}

impl Color {
    /// Opaque black, the lighting accumulator's starting value.
    pub const BLACK: Color = Color::from_argb(255, 0, 0, 0);
    /// Opaque white, the default polygon colour.
    pub const WHITE: Color = Color::from_argb(255, 255, 255, 255);

    /// Creates a colour from its four channels.
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    /// Creates a colour from wide channel values, clamping each to `0..=255`.
    ///
    /// # Examples
    /// ```
    /// use graph3d::core::color::Color;
    /// let c = Color::from_rgb_clamped(255, 300, -20, 128);
    /// assert_eq!(c, Color::from_argb(255, 255, 0, 128));
    /// ```
    pub fn from_rgb_clamped(a: u8, r: i32, g: i32, b: i32) -> Self {
        Self {
            a,
            r: clamp_channel(r),
            g: clamp_channel(g),
            b: clamp_channel(b),
        }
    }

    /// Red, green and blue as wide integers.
    pub fn rgb(self) -> [i32; 3] {
        [i32::from(self.r), i32::from(self.g), i32::from(self.b)]
    }

    /// Same colour with a different alpha.
    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

/// Clamps a wide channel value into the `u8` range.
pub fn clamp_channel(value: i32) -> u8 {
    value.clamp(0, 255) as u8
}

#[cfg(test)]
mod tests;
