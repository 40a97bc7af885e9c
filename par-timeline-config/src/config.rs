//! The top-level `Config` struct and its YAML persistence.
//!
//! Covers:
//! - `load` / `save` against the XDG-style default path
//! - `load_from` / `save_to` for explicit paths (atomic write)
//! - `validate` for values serde cannot reject on its own

use crate::error::ConfigError;
use crate::types::{ColorConfig, LogLevel, MediaConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Attachment download settings
    #[serde(default = "crate::defaults::media")]
    pub media: MediaConfig,

    /// Timeline text and label colors
    #[serde(default = "crate::defaults::colors")]
    pub colors: ColorConfig,

    /// Seconds a non-empty status message stays visible before it is cleared
    #[serde(default = "crate::defaults::status_clear_secs")]
    pub status_clear_secs: u64,

    /// Verbosity of the debug log file
    #[serde(default = "crate::defaults::log_level")]
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            media: crate::defaults::media(),
            colors: crate::defaults::colors(),
            status_clear_secs: crate::defaults::status_clear_secs(),
            log_level: crate::defaults::log_level(),
        }
    }
}

impl Config {
    /// Load configuration from the default path, creating it if missing
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();
        log::info!("Config path: {:?}", config_path);

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            log::info!(
                "Config file not found, creating default at {:?}",
                config_path
            );
            let config = Self::default();
            if let Err(e) = config.save() {
                log::error!("Failed to save default config: {}", e);
                return Err(e);
            }
            Ok(config)
        }
    }

    /// Load and validate configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        log::info!("Loading config from {:?}", path);
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        let config: Config =
            serde_yaml_ng::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| ConfigError::io(parent, e))?;
        }

        let yaml = serde_yaml_ng::to_string(self).map_err(ConfigError::Serialize)?;

        // Atomic save: write to temp file then rename to prevent corruption on crash
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml).map_err(|e| ConfigError::io(&temp_path, e))?;
        fs::rename(&temp_path, path).map_err(|e| ConfigError::io(path, e))?;

        Ok(())
    }

    /// Reject values that deserialize fine but cannot be used
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.colors.label_palette.is_empty() {
            return Err(ConfigError::Validation(
                "colors.label_palette must contain at least one color".to_string(),
            ));
        }
        if self.status_clear_secs == 0 {
            return Err(ConfigError::Validation(
                "status_clear_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// How long a non-empty status message stays up
    pub fn status_clear_after(&self) -> Duration {
        Duration::from_secs(self.status_clear_secs)
    }

    /// Get the configuration file path (using XDG convention)
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Get the configuration directory path (using XDG convention)
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("par-timeline")
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            // ~/.config/par-timeline on every unix, macOS included
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join("par-timeline")
            } else {
                PathBuf::from(".")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: Config = serde_yaml_ng::from_str("status_clear_secs: 7\n").unwrap();
        assert_eq!(config.status_clear_secs, 7);
        assert_eq!(config.media, MediaConfig::default());
        assert_eq!(config.colors, ColorConfig::default());
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_validate_rejects_empty_palette() {
        let mut config = Config::default();
        config.colors.label_palette.clear();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(msg)) if msg.contains("label_palette")
        ));
    }

    #[test]
    fn test_validate_rejects_zero_clear_time() {
        let config = Config {
            status_clear_secs: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_attachment_dir_is_under_temp() {
        let media = MediaConfig::default();
        assert_eq!(
            media.resolved_attachment_dir(),
            std::env::temp_dir().join("par-timeline")
        );
        assert_eq!(media.http_timeout(), None);
    }

    #[test]
    fn test_config_path_layout() {
        let path = Config::config_path();
        assert!(path.ends_with("par-timeline/config.yaml"));
        #[cfg(not(target_os = "windows"))]
        {
            if let Some(home) = dirs::home_dir() {
                assert_eq!(path, home.join(".config/par-timeline/config.yaml"));
            }
        }
    }
}
