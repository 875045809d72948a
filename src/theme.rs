use serde::{Deserialize, Serialize};

/// Straight-alpha RGBA color, components in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// From a `0xRRGGBB` literal.
    pub fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as f32 / 255.0,
            g: ((rgb >> 8) & 0xff) as f32 / 255.0,
            b: (rgb & 0xff) as f32 / 255.0,
            a: 1.0,
        }
    }

    pub fn alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Componentwise linear interpolation, `t` clamped to `0.0..=1.0`.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let mix = |a: f32, b: f32| a + (b - a) * t;
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }

    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);
    pub const BLUE: Self = Self::rgba(0.0, 0.0, 1.0, 1.0);
    pub const RED: Self = Self::rgba(1.0, 0.0, 0.0, 1.0);
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartTheme {
    pub background: Color,
    pub axis_line: Color,
    pub axis_label: Color,
    pub axis_label_size: f32,
    pub table_text: Color,
    pub table_stripe: Color,
    pub fps_good: Color,
    pub fps_fair: Color,
    pub fps_poor: Color,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            background: Color::hex(0x111827),
            axis_line: Color::hex(0x666666),
            axis_label: Color::hex(0x666666),
            axis_label_size: 12.0,
            table_text: Color::hex(0xe5e7eb),
            table_stripe: Color::WHITE.alpha(0.04),
            fps_good: Color::hex(0x10b981),
            fps_fair: Color::hex(0xf59e0b),
            fps_poor: Color::hex(0xef4444),
        }
    }
}
