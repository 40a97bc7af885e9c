//! Default value functions for configuration.
//!
//! Each function is used as a `#[serde(default = "crate::defaults::...")]`
//! attribute so that partially written config files still load.

use crate::color::Color;
use crate::types::{ColorConfig, LogLevel, MediaConfig};

// ── Top level ──────────────────────────────────────────────────────────────

pub fn status_clear_secs() -> u64 {
    3
}

pub fn log_level() -> LogLevel {
    LogLevel::Info
}

pub fn media() -> MediaConfig {
    MediaConfig::default()
}

pub fn colors() -> ColorConfig {
    ColorConfig::default()
}

// ── Media ──────────────────────────────────────────────────────────────────

pub fn open_interval_ms() -> u64 {
    10
}

/// 50 MB, the same ceiling used for any other file download.
pub fn max_download_bytes() -> u64 {
    50 * 1024 * 1024
}

pub fn user_agent() -> String {
    format!("par-timeline/{}", env!("CARGO_PKG_VERSION"))
}

// ── Colors ─────────────────────────────────────────────────────────────────

pub fn foreground() -> Color {
    Color::new(0xd0, 0xd0, 0xd0)
}

pub fn background() -> Color {
    Color::new(0x1c, 0x1c, 0x1c)
}

pub fn mention_background() -> Color {
    Color::new(0x44, 0x44, 0x44)
}

pub fn hashtag_foreground() -> Color {
    Color::new(0x5f, 0x87, 0xff)
}

pub fn label_palette() -> Vec<Color> {
    vec![
        Color::new(0xd7, 0x5f, 0x5f),
        Color::new(0x87, 0xaf, 0x5f),
        Color::new(0xd7, 0xaf, 0x5f),
        Color::new(0x5f, 0x87, 0xd7),
        Color::new(0xaf, 0x87, 0xd7),
        Color::new(0x5f, 0xaf, 0xaf),
        Color::new(0xff, 0x87, 0x00),
        Color::new(0xff, 0x5f, 0xaf),
    ]
}
