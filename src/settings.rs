//! Stage settings and preferences
//!
//! Presentation toggles plus the parameters of the headless demo run. Loaded
//! from a JSON file; every field falls back to its default when missing.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Settings file could not be read
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    /// Settings file is not valid JSON for [`Settings`]
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    /// Parsed, but a value is unusable
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Parameters of the autoplay demo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoSettings {
    /// Seed for the demo archer
    pub seed: u64,
    /// Give up after this many arrows
    pub max_launches: u32,
    /// Blessings carried into the stage (display only)
    pub bonus: u32,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            seed: 0x5EED_D055,
            max_launches: 40,
            bonus: 0,
        }
    }
}

/// Stage settings/preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Reduced motion (no shaking effigy while it burns)
    pub reduced_motion: bool,
    /// Show the carried-over blessings next to the hit counter
    pub show_bonus: bool,
    pub demo: DemoSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reduced_motion: false,
            show_bonus: true,
            demo: DemoSettings::default(),
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON text
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings if a path is given, falling back to defaults on any error
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.demo.max_launches == 0 {
            return Err(SettingsError::Invalid(
                "demo.max_launches must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_gives_defaults() {
        let settings = Settings::from_json("{}").expect("empty object parses");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_json() {
        let settings =
            Settings::from_json(r#"{"reduced_motion": true, "demo": {"seed": 7}}"#).unwrap();
        assert!(settings.reduced_motion);
        assert!(settings.show_bonus);
        assert_eq!(settings.demo.seed, 7);
        assert_eq!(settings.demo.max_launches, DemoSettings::default().max_launches);
    }

    #[test]
    fn test_json_round_trip() {
        let mut settings = Settings::default();
        settings.show_bonus = false;
        settings.demo.bonus = 12;
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_rejects_zero_launches() {
        let err = Settings::from_json(r#"{"demo": {"max_launches": 0}}"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Settings::from_json("{ reduced_motion: ").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let path = Path::new("/nonexistent/ravan-archery/settings.json");
        assert!(matches!(Settings::load(path), Err(SettingsError::Io(_))));
        assert_eq!(Settings::load_or_default(Some(path)), Settings::default());
        assert_eq!(Settings::load_or_default(None), Settings::default());
    }
}
