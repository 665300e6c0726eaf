//! Pad configuration
//!
//! A small JSON file under the platform config directory. Missing fields
//! take their defaults, so older files keep loading as fields are added.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pitch::PitchClass;

pub const MIN_CELL_RADIUS: f32 = 12.0;
pub const MAX_CELL_RADIUS: f32 = 160.0;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PadConfig {
    /// Key of the grid's center cell
    pub key: PitchClass,
    pub cell_radius: f32,
    pub window_width: f32,
    pub window_height: f32,
    /// `tracing` filter used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for PadConfig {
    fn default() -> Self {
        Self {
            key: PitchClass::C,
            cell_radius: 48.0,
            window_width: 640.0,
            window_height: 520.0,
            log_filter: "info".to_string(),
        }
    }
}

impl PadConfig {
    /// Default location: `<config dir>/config.json`.
    pub fn default_path() -> PathBuf {
        config_dir("combpad").join("config.json")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        Ok(config.sanitized())
    }

    /// Load, falling back to defaults when the file is missing or broken.
    /// A missing file is the first run and not an error; any other failure
    /// comes back next to the defaults so the caller can report it once
    /// logging is up.
    pub fn load_or_default(path: &Path) -> (Self, Option<ConfigError>) {
        match Self::load(path) {
            Ok(config) => (config, None),
            Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                (Self::default(), None)
            }
            Err(e) => (Self::default(), Some(e)),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Clamp values into usable ranges.
    pub fn sanitized(mut self) -> Self {
        self.cell_radius = if self.cell_radius.is_finite() {
            self.cell_radius.clamp(MIN_CELL_RADIUS, MAX_CELL_RADIUS)
        } else {
            Self::default().cell_radius
        };
        if !self.window_width.is_finite() || self.window_width < 1.0 {
            self.window_width = Self::default().window_width;
        }
        if !self.window_height.is_finite() || self.window_height < 1.0 {
            self.window_height = Self::default().window_height;
        }
        self
    }
}

/// Config directory for an app, or `.` if the platform has none.
pub fn config_dir(app_name: &str) -> PathBuf {
    directories::ProjectDirs::from("co", "combpad", app_name)
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("combpad-test-{}-{}", std::process::id(), name))
            .join("config.json")
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let config: PadConfig = serde_json::from_str(r#"{ "key": "F#" }"#).unwrap();
        assert_eq!(config.key, PitchClass::FSharp);
        assert_eq!(config.cell_radius, 48.0);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_unknown_key_is_a_json_error() {
        let path = temp_path("badkey");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, r#"{ "key": "Bb" }"#).unwrap();
        assert!(matches!(PadConfig::load(&path), Err(ConfigError::Json(_))));
        let (config, err) = PadConfig::load_or_default(&path);
        assert_eq!(config, PadConfig::default());
        assert!(matches!(err, Some(ConfigError::Json(_))));
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("save");
        let config = PadConfig {
            key: PitchClass::D,
            cell_radius: 30.0,
            ..PadConfig::default()
        };
        config.save(&path).unwrap();
        assert_eq!(PadConfig::load(&path).unwrap(), config);
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_missing_file_is_default() {
        let path = temp_path("absent");
        let (config, err) = PadConfig::load_or_default(&path);
        assert_eq!(config, PadConfig::default());
        assert!(err.is_none());
    }

    #[test]
    fn test_sanitize_clamps_radius() {
        let big = PadConfig {
            cell_radius: 1000.0,
            ..PadConfig::default()
        }
        .sanitized();
        assert_eq!(big.cell_radius, MAX_CELL_RADIUS);
        let nan = PadConfig {
            cell_radius: f32::NAN,
            window_width: -3.0,
            ..PadConfig::default()
        }
        .sanitized();
        assert_eq!(nan.cell_radius, 48.0);
        assert_eq!(nan.window_width, 640.0);
    }
}
