//! Configuration system for the par-timeline terminal timeline client.
//!
//! This crate provides configuration loading, saving, and default values.
//! It includes:
//!
//! - The top-level [`Config`] struct and its YAML persistence
//! - Media download settings ([`MediaConfig`])
//! - Timeline color settings ([`ColorConfig`]) and the RGB [`Color`] type
//! - Typed errors for config I/O and validation ([`ConfigError`])

pub mod color;
pub mod config;
pub mod defaults;
pub mod error;
mod types;

// Re-export main types for convenience
pub use color::Color;
pub use config::Config;
pub use error::ConfigError;
pub use types::{ATTACHMENT_DIR_NAME, ColorConfig, LogLevel, MediaConfig};
