//! Packed 24-bit RGB colors.

use serde::{Deserialize, Serialize};

/// A `0xRRGGBB` color, serialized as its packed integer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    /// Pure white.
    pub const WHITE: Self = Self(0xFF_FF_FF);

    /// Color from a packed `0xRRGGBB` value. Bits above 24 are dropped.
    #[must_use]
    pub const fn from_hex(hex: u32) -> Self {
        Self(hex & 0xFF_FF_FF)
    }

    /// The packed `0xRRGGBB` value.
    #[must_use]
    pub const fn hex(self) -> u32 {
        self.0
    }

    /// Channel values in [0, 1].
    #[must_use]
    pub fn to_rgb(self) -> [f32; 3] {
        let r = (self.0 >> 16) & 0xFF;
        let g = (self.0 >> 8) & 0xFF;
        let b = self.0 & 0xFF;
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0]
    }

    /// CSS-style `#rrggbb` string.
    #[must_use]
    pub fn to_css(self) -> String {
        format!("#{:06x}", self.0 & 0xFF_FF_FF)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_channels() {
        let c = Color::from_hex(0xFF_80_00);
        let [r, g, b] = c.to_rgb();
        assert_eq!(r, 1.0);
        assert!((g - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(b, 0.0);
    }

    #[test]
    fn css_string_is_zero_padded() {
        assert_eq!(Color::from_hex(0x0000FF).to_css(), "#0000ff");
        assert_eq!(Color::WHITE.to_css(), "#ffffff");
    }

    #[test]
    fn from_hex_masks_high_bits() {
        assert_eq!(Color::from_hex(0xAB_12_34_56).hex(), 0x12_34_56);
    }
}
