//! RGBA colors shared by sand fills, the frame and the particle sprite
//!
//! Serialized as `#RRGGBBAA` hex strings so settings files stay readable.

use serde::{Deserialize, Serialize};

/// Straight (non-premultiplied) RGBA color, components in 0-1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const CLEAR: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);
    /// Default sand color (the platform "system red")
    pub const SYSTEM_RED: Color = Color::rgba(1.0, 59.0 / 255.0, 48.0 / 255.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build a color from a `0xRRGGBB` integer and an alpha
    pub fn from_hex(hex: u32, alpha: f32) -> Self {
        let red = ((hex & 0xFF0000) >> 16) as f32 / 255.0;
        let green = ((hex & 0xFF00) >> 8) as f32 / 255.0;
        let blue = (hex & 0xFF) as f32 / 255.0;
        Self::rgba(red, green, blue, alpha.clamp(0.0, 1.0))
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (leading `#` optional)
    pub fn parse_hex(s: &str) -> Option<Self> {
        let digits = s.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match digits.len() {
            6 => {
                let rgb = u32::from_str_radix(digits, 16).ok()?;
                Some(Self::from_hex(rgb, 1.0))
            }
            8 => {
                let rgba = u32::from_str_radix(digits, 16).ok()?;
                Some(Self::from_hex(rgba >> 8, (rgba & 0xFF) as f32 / 255.0))
            }
            _ => None,
        }
    }

    /// Format as `#RRGGBBAA`
    pub fn to_hex_string(&self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        format!("#{:02X}{:02X}{:02X}{:02X}", r, g, b, a)
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a: a.clamp(0.0, 1.0), ..self }
    }

    /// Components as an array (vertex color layout)
    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Quantize to 8-bit straight RGBA
    pub fn to_rgba8(&self) -> [u8; 4] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::SYSTEM_RED
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex_string()
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Color::parse_hex(&s).ok_or_else(|| format!("expected #RRGGBB or #RRGGBBAA, got {:?}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        let c = Color::from_hex(0xFF8000, 0.5);
        assert_eq!(c.r, 1.0);
        assert!((c.g - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.b, 0.0);
        assert_eq!(c.a, 0.5);
    }

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(Color::parse_hex("#FFFFFF"), Some(Color::WHITE));
        assert_eq!(Color::parse_hex("ffffffff"), Some(Color::WHITE));
        assert_eq!(Color::parse_hex("#00000000"), Some(Color::CLEAR));
        assert!(Color::parse_hex("#FFF").is_none());
        assert!(Color::parse_hex("#GGGGGG").is_none());
    }

    #[test]
    fn test_hex_string_survives_serde() {
        let c = Color::from_hex(0xF0F0F2, 0.5);
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, "\"#F0F0F280\"");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back.to_rgba8(), c.to_rgba8());
    }

    #[test]
    fn test_bad_color_string_is_rejected() {
        assert!(serde_json::from_str::<Color>("\"orange\"").is_err());
    }
}
