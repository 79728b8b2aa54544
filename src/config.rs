use crate::error::ConfigError;
use crate::eye::theme;
use crate::surface::Rgb;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const MIN_SIZE: i32 = 50;
const MAX_FRAME_INTERVAL_MS: u32 = 1000;

/// Optional startup overrides read from JSON. Never written back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_x")]
    pub x: i32,
    #[serde(default = "default_y")]
    pub y: i32,
    /// Edge length of the square eye window
    #[serde(default = "default_size")]
    pub size: i32,
    #[serde(default = "default_iris_color")]
    pub iris_color: Rgb,
    /// Gaze refresh cadence
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u32,
}

fn default_x() -> i32 {
    theme::WINDOW_X
}

fn default_y() -> i32 {
    theme::WINDOW_Y
}

fn default_size() -> i32 {
    theme::WINDOW_SIZE
}

fn default_iris_color() -> Rgb {
    theme::CLR_IRIS
}

fn default_frame_interval_ms() -> u32 {
    16
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            x: default_x(),
            y: default_y(),
            size: default_size(),
            iris_color: default_iris_color(),
            frame_interval_ms: default_frame_interval_ms(),
        }
    }
}

impl AppConfig {
    /// Clamp values that would make the eye undrawable
    pub fn sanitized(mut self) -> Self {
        self.size = self.size.max(MIN_SIZE);
        self.frame_interval_ms = self.frame_interval_ms.clamp(1, MAX_FRAME_INTERVAL_MS);
        self
    }
}

pub fn config_path() -> PathBuf {
    let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("VagueReminder").join("config.json")
}

/// A missing file yields the defaults; a broken one is an error.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let data = fs::read_to_string(path)?;
    let cfg: AppConfig = serde_json::from_str(&data)?;
    Ok(cfg.sanitized())
}

pub fn load_config() -> AppConfig {
    let path = config_path();
    match load_config_from(&path) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Ignoring config file, using defaults");
            AppConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let cfg = load_config_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!((cfg.x, cfg.y, cfg.size), (100, 100, 150));
        assert_eq!(cfg.iris_color, Rgb::new(100, 150, 220));
        assert_eq!(cfg.frame_interval_ms, 16);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "x": 400, "iris_color": { "r": 200, "g": 10, "b": 10 } }"#).unwrap();

        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.x, 400);
        assert_eq!(cfg.y, 100);
        assert_eq!(cfg.iris_color, Rgb::new(200, 10, 10));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_config_from(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_sanitized_clamps_values() {
        let cfg = AppConfig {
            size: 3,
            frame_interval_ms: 0,
            ..AppConfig::default()
        }
        .sanitized();
        assert_eq!(cfg.size, 50);
        assert_eq!(cfg.frame_interval_ms, 1);

        let slow = AppConfig {
            frame_interval_ms: 60_000,
            ..AppConfig::default()
        }
        .sanitized();
        assert_eq!(slow.frame_interval_ms, 1000);
    }
}
