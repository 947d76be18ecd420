use serde::{Deserialize, Serialize};

/// Straight-alpha RGBA colour with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::from_rgb8(0xff, 0xff, 0xff);
    pub const BLACK: Color = Color::from_rgb8(0x00, 0x00, 0x00);
    pub const SLATE_50: Color = Color::from_rgb8(0xf8, 0xfa, 0xfc);
    pub const SLATE_500: Color = Color::from_rgb8(0x64, 0x74, 0x8b);
    pub const SLATE_800: Color = Color::from_rgb8(0x1e, 0x29, 0x3b);
    pub const GRAY_300: Color = Color::from_rgb8(0xd1, 0xd5, 0xdb);
    pub const BLUE_500: Color = Color::from_rgb8(0x3b, 0x82, 0xf6);
    pub const BLUE_600: Color = Color::from_rgb8(0x25, 0x63, 0xeb);
    pub const RED_500: Color = Color::from_rgb8(0xef, 0x44, 0x44);
    pub const GREEN_500: Color = Color::from_rgb8(0x10, 0xb9, 0x81);
    pub const AMBER_500: Color = Color::from_rgb8(0xf5, 0x9e, 0x0b);
    pub const VIOLET_500: Color = Color::from_rgb8(0x8b, 0x5c, 0xf6);
    pub const INDIGO_400: Color = Color::from_rgb8(0x66, 0x7e, 0xea);
    pub const PURPLE_700: Color = Color::from_rgb8(0x76, 0x4b, 0xa2);

    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub fn white_alpha(a: f32) -> Self {
        Self::WHITE.with_alpha(a)
    }

    /// CSS-style `hsl(hue, saturation%, lightness%)`; hue in degrees,
    /// saturation and lightness in percent.
    pub fn hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        let h = hue.rem_euclid(360.0) / 360.0;
        let s = (saturation / 100.0).clamp(0.0, 1.0);
        let l = (lightness / 100.0).clamp(0.0, 1.0);

        if s == 0.0 {
            return Self { r: l, g: l, b: l, a: 1.0 };
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        Self {
            r: hue_to_channel(p, q, h + 1.0 / 3.0),
            g: hue_to_channel(p, q, h),
            b: hue_to_channel(p, q, h - 1.0 / 3.0),
            a: 1.0,
        }
    }

    /// Heat-map hue for metrics where a high reading is bad: blue (low) to red (high).
    pub fn heat(intensity: f32) -> Self {
        let intensity = intensity.clamp(0.0, 1.0);
        Self::hsl((1.0 - intensity) * 240.0, 100.0, intensity * 50.0 + 10.0)
    }

    /// Red (low) to green (high) for metrics where a high reading is good.
    pub fn quality(ratio: f32) -> Self {
        Self::hsl(ratio.clamp(0.0, 1.0) * 120.0, 70.0, 50.0)
    }

    pub fn to_hex(&self) -> String {
        let channel = |value: f32| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hsl_primaries() {
        assert_eq!(Color::hsl(0.0, 100.0, 50.0).to_hex(), "#ff0000");
        assert_eq!(Color::hsl(120.0, 100.0, 50.0).to_hex(), "#00ff00");
        assert_eq!(Color::hsl(240.0, 100.0, 50.0).to_hex(), "#0000ff");
    }

    #[test]
    fn hsl_follows_css_wrapping_and_greys() {
        assert_eq!(Color::hsl(360.0, 100.0, 50.0).to_hex(), "#ff0000");
        assert_eq!(Color::hsl(-120.0, 100.0, 50.0).to_hex(), "#0000ff");
        assert_eq!(Color::hsl(200.0, 0.0, 50.0).to_hex(), "#808080");
        assert_eq!(Color::hsl(30.0, 150.0, 50.0), Color::hsl(30.0, 100.0, 50.0));
        assert_eq!(Color::quality(0.5).to_hex(), "#d9d926");
    }

    #[test]
    fn heat_runs_blue_to_red() {
        let low = Color::heat(0.0);
        let high = Color::heat(1.0);
        assert!(low.b > low.r);
        assert!(high.r > high.b);
    }

    #[test]
    fn hex_constants_round_trip() {
        assert_eq!(Color::INDIGO_400.to_hex(), "#667eea");
        assert_eq!(Color::RED_500.to_hex(), "#ef4444");
    }
}
