//! Widget settings
//!
//! Loaded from a JSON document; every field is optional and falls back to the
//! sample widget's look.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::color::Color;
use crate::consts::{
    ARC_SEGMENTS_PER_RADIAN, DEFAULT_LINE_WIDTH, DEFAULT_SPRITE_SCALE, DRIVER_INTERVAL_MS,
    DRIVER_STEP,
};
use crate::emitter::EmitterCell;
use crate::error::{Result, SandglassError};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum software particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 64,
            QualityPreset::Medium => 256,
            QualityPreset::High => 1024,
        }
    }

    /// Arc flattening density when tessellating
    pub fn segments_per_radian(&self) -> f32 {
        match self {
            QualityPreset::Low => ARC_SEGMENTS_PER_RADIAN / 2.0,
            QualityPreset::Medium => ARC_SEGMENTS_PER_RADIAN,
            QualityPreset::High => ARC_SEGMENTS_PER_RADIAN * 2.0,
        }
    }
}

/// Widget settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Tessellation / particle quality
    pub quality: QualityPreset,

    // === Look ===
    /// Frame stroke width (also shapes the sand and the hole)
    pub line_width: f32,
    /// Sand, hole and particle color
    pub sand_color: Color,
    /// Translucent frame tint drawn over a white base
    pub frame_stroke_color: Color,
    /// Particle sprite pixels per point
    pub sprite_scale: f32,

    // === Falling sand ===
    /// Software particles on/off
    pub particles: bool,
    /// Seed for the software particle system
    pub emitter_seed: u64,
    /// Per-particle template
    pub emitter_cell: EmitterCell,

    // === Demo driver ===
    /// Progress increment per tick
    pub driver_step: f32,
    /// Milliseconds between ticks
    pub driver_interval_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,

            line_width: DEFAULT_LINE_WIDTH,
            sand_color: Color::from_hex(0xFF8000, 0.5),
            frame_stroke_color: Color::from_hex(0xF0F0F2, 0.5),
            sprite_scale: DEFAULT_SPRITE_SCALE,

            particles: true,
            emitter_seed: 0x5A4D,
            emitter_cell: EmitterCell::default(),

            driver_step: DRIVER_STEP,
            driver_interval_ms: DRIVER_INTERVAL_MS,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset (applies preset defaults)
    pub fn from_preset(preset: QualityPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a quality preset (updates quality-dependent settings)
    pub fn apply_preset(&mut self, preset: QualityPreset) {
        self.quality = preset;

        // Low preset skips software particles entirely
        if preset == QualityPreset::Low {
            self.particles = false;
        }
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    pub fn driver_interval(&self) -> Duration {
        Duration::from_millis(self.driver_interval_ms)
    }

    /// Reject values the widget cannot draw with
    pub fn validate(&self) -> Result<()> {
        if !self.line_width.is_finite() || self.line_width < 0.0 {
            return Err(SandglassError::InvalidSetting(format!(
                "line_width must be a non-negative number, got {}",
                self.line_width
            )));
        }
        if !self.sprite_scale.is_finite() || self.sprite_scale <= 0.0 {
            return Err(SandglassError::InvalidSetting(format!(
                "sprite_scale must be positive, got {}",
                self.sprite_scale
            )));
        }
        if !self.driver_step.is_finite() || self.driver_step <= 0.0 {
            return Err(SandglassError::InvalidSetting(format!(
                "driver_step must be positive, got {}",
                self.driver_step
            )));
        }
        if self.driver_interval_ms == 0 {
            return Err(SandglassError::InvalidSetting(
                "driver_interval_ms must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }

    /// Save settings to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings = Settings::from_json(r##"{ "line_width": 3.0, "sand_color": "#336699" }"##)
            .unwrap();
        assert_eq!(settings.line_width, 3.0);
        assert_eq!(settings.sand_color, Color::from_hex(0x336699, 1.0));
        assert_eq!(settings.driver_interval_ms, DRIVER_INTERVAL_MS);
        assert_eq!(settings.emitter_cell, EmitterCell::default());
    }

    #[test]
    fn test_partial_emitter_cell() {
        let settings = Settings::from_json(r#"{ "emitter_cell": { "birth_rate": 60.0 } }"#).unwrap();
        let expected = EmitterCell {
            birth_rate: 60.0,
            ..EmitterCell::default()
        };
        assert_eq!(settings.emitter_cell, expected);
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings::from_preset(QualityPreset::High);
        let json = settings.to_json().unwrap();
        let back = Settings::from_json(&json).unwrap();
        assert_eq!(back.quality, QualityPreset::High);
        assert_eq!(back.sand_color.to_rgba8(), settings.sand_color.to_rgba8());
        assert_eq!(back.emitter_seed, settings.emitter_seed);
    }

    #[test]
    fn test_malformed_json() {
        let err = Settings::from_json("{ line_width: ").unwrap_err();
        assert!(matches!(err, SandglassError::Json(_)));
    }

    #[test]
    fn test_invalid_values() {
        let err = Settings::from_json(r#"{ "line_width": -1.0 }"#).unwrap_err();
        assert!(matches!(err, SandglassError::InvalidSetting(_)));
        let err = Settings::from_json(r#"{ "driver_interval_ms": 0 }"#).unwrap_err();
        assert!(matches!(err, SandglassError::InvalidSetting(_)));
    }

    #[test]
    fn test_low_preset_disables_particles() {
        let settings = Settings::from_preset(QualityPreset::Low);
        assert_eq!(settings.max_particles(), 0);
        assert_eq!(Settings::default().max_particles(), 256);
    }

    #[test]
    fn test_preset_parse() {
        assert_eq!(QualityPreset::from_str("MED"), Some(QualityPreset::Medium));
        assert_eq!(QualityPreset::from_str("ultra"), None);
        assert_eq!(QualityPreset::High.as_str(), "High");
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("sandglass-settings-{}.json", std::process::id()));
        let mut settings = Settings::default();
        settings.line_width = 7.5;
        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded.line_width, 7.5);
        std::fs::remove_file(&path).unwrap();

        let missing = Settings::load_or_default(&path);
        assert_eq!(missing, Settings::default());
    }
}
