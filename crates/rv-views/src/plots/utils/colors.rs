//! Color handling for plot scenes

use serde::{Deserialize, Serialize};

/// 8-bit RGBA color used by scene primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Fully opaque color from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with the alpha channel set from an opacity in `[0, 1]`.
    pub fn with_opacity(self, opacity: f32) -> Self {
        let a = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self { a, ..self }
    }
}

/// Default fill for box plots, also the regression line color.
pub const INDIGO: Color = Color::rgb(0x4f, 0x46, 0xe5);

/// Default fill for scatter points and violin silhouettes.
pub const PERIWINKLE: Color = Color::rgb(0x88, 0x84, 0xd8);

/// Selection and tracked-variant emphasis.
pub const ACCENT_RED: Color = Color::rgb(0xff, 0x00, 0x00);

/// Mean markers and mean value labels.
pub const MEAN_ORANGE: Color = Color::rgb(0xff, 0x73, 0x00);

pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);

/// Muted gray for secondary annotations such as count labels.
pub const TEXT_MUTED: Color = Color::rgb(0x66, 0x66, 0x66);

/// Faint gridlines behind the data marks.
pub const GRID: Color = Color::rgba(0x00, 0x00, 0x00, 51);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_opacity() {
        let c = INDIGO.with_opacity(0.6);
        assert_eq!(c.r, 0x4f);
        assert_eq!(c.a, 153);
    }

    #[test]
    fn test_opacity_clamped() {
        assert_eq!(BLACK.with_opacity(2.0).a, 255);
        assert_eq!(BLACK.with_opacity(-1.0).a, 0);
    }
}
