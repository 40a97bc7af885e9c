//! Typed error variants for the par-timeline-config crate.
//!
//! Callers at the crate boundary can match on specific failure modes instead
//! of opaque strings.
//!
//! # Example
//!
//! ```rust,no_run
//! use par_timeline_config::{Config, ConfigError};
//!
//! match Config::load() {
//!     Ok(config) => println!("loaded, palette has {} colors", config.colors.label_palette.len()),
//!     Err(ConfigError::Parse { path, .. }) => eprintln!("fix the YAML in {}", path.display()),
//!     Err(e) => eprintln!("config error: {e}"),
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading, saving or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An I/O error occurred reading or writing the config file.
    #[error("I/O error on config file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file contained invalid YAML that could not be parsed.
    #[error("YAML parse error in config '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },

    /// The config could not be serialized back to YAML.
    #[error("Failed to serialize config: {0}")]
    Serialize(#[source] serde_yaml_ng::Error),

    /// A field value failed semantic validation.
    ///
    /// The inner string describes which field is invalid and why.
    #[error("Config validation error: {0}")]
    Validation(String),
}

impl ConfigError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::Io {
            path: path.into(),
            source,
        }
    }
}
