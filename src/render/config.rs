//! Render and avatar configuration
//!
//! `AvatarConfig` bundles the palette and render settings and can be
//! loaded from a JSON file. Missing fields fall back to defaults.

use crate::dna::Palette;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Edge length of the reference drawing; all geometry is defined at this size
pub const REFERENCE_SIZE: f64 = 200.0;

/// How wound and scar jitter is sourced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScarMode {
    /// Drawn from the caller's random source; re-renders differ
    #[default]
    Random,
    /// Seeded from the DNA fingerprint; a token always looks the same
    Stable,
}

/// Settings for a single render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Output width and height in pixels
    pub size: f64,
    pub scars: ScarMode,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            size: REFERENCE_SIZE,
            scars: ScarMode::Random,
        }
    }
}

impl RenderConfig {
    pub fn with_size(size: f64) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(ConfigError::InvalidSize(self.size));
        }
        Ok(())
    }

    /// Size actually used for drawing; bad sizes fall back to the reference
    pub(crate) fn effective_size(&self) -> f64 {
        if self.validate().is_ok() {
            self.size
        } else {
            REFERENCE_SIZE
        }
    }
}

/// Full avatar generator configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvatarConfig {
    pub palette: Palette,
    pub render: RenderConfig,
}

impl AvatarConfig {
    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path.as_ref())?;
        let config: AvatarConfig = serde_json::from_str(&data)?;
        config.validate()?;
        log::debug!("Loaded avatar config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Check the render size and that every palette entry is a hex color
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.render.validate()?;
        let p = &self.palette;
        for color in [&p.skin, &p.hair, &p.eyes, &p.clothes, &p.blood].into_iter().flatten() {
            if !is_hex_color(color) {
                return Err(ConfigError::InvalidColor(color.clone()));
            }
        }
        Ok(())
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// `#RGB` or `#RRGGBB`
fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .map(|hex| matches!(hex.len(), 3 | 6) && hex.bytes().all(|b| b.is_ascii_hexdigit()))
        .unwrap_or(false)
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Image size must be a positive finite number, got {0}")]
    InvalidSize(f64),

    #[error("Palette color must be #RGB or #RRGGBB, got {0:?}")]
    InvalidColor(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AvatarConfig::default();
        assert_eq!(config.render.size, REFERENCE_SIZE);
        assert_eq!(config.render.scars, ScarMode::Random);
        assert_eq!(config.palette, Palette::default());
    }

    #[test]
    fn test_validate_size() {
        assert!(RenderConfig::with_size(64.0).validate().is_ok());
        for bad in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            assert!(RenderConfig::with_size(bad).validate().is_err());
            assert_eq!(RenderConfig::with_size(bad).effective_size(), REFERENCE_SIZE);
        }
    }

    #[test]
    fn test_load_partial_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("avatar.json");
        std::fs::write(&path, r#"{ "render": { "size": 120, "scars": "stable" } }"#).unwrap();

        let config = AvatarConfig::load(&path).unwrap();
        assert_eq!(config.render.size, 120.0);
        assert_eq!(config.render.scars, ScarMode::Stable);
        assert_eq!(config.palette, Palette::default());
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("avatar.json");
        let mut config = AvatarConfig::default();
        config.palette.blood[0] = "#123456".into();
        config.save(&path).unwrap();
        assert_eq!(AvatarConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_load_rejects_bad_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("avatar.json");
        std::fs::write(&path, r#"{ "render": { "size": -1 } }"#).unwrap();
        assert!(matches!(AvatarConfig::load(&path), Err(ConfigError::InvalidSize(_))));
        assert!(matches!(
            AvatarConfig::load(dir.path().join("missing.json")),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_hex_colors() {
        assert!(is_hex_color("#fff"));
        assert!(is_hex_color("#8B4513"));
        for bad in ["red", "#12", "#1234567", "#GGGGGG", "8B4513", r#"red" onload="x"#] {
            assert!(!is_hex_color(bad), "{bad:?}");
        }
    }

    #[test]
    fn test_load_rejects_non_hex_palette_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("avatar.json");
        let mut config = AvatarConfig::default();
        config.palette.skin[2] = r#"red" onload="alert(1)"#.into();
        config.save(&path).unwrap();

        match AvatarConfig::load(&path) {
            Err(ConfigError::InvalidColor(color)) => assert_eq!(color, config.palette.skin[2]),
            other => panic!("expected InvalidColor, got {other:?}"),
        }
        assert!(AvatarConfig::default().validate().is_ok());
    }
}
