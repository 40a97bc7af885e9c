//! Configuration section types and enums.

use crate::color::Color;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Name of the directory (under the OS temp dir) that holds downloaded attachments.
pub const ATTACHMENT_DIR_NAME: &str = "par-timeline";

// ============================================================================
// Logging
// ============================================================================

/// Log level for debug logging to file.
///
/// `RUST_LOG` and the `--log-level` CLI flag take precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// No logging (log file not created)
    Off,
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    #[default]
    Info,
    /// Debug messages
    Debug,
    /// Most verbose
    Trace,
}

impl LogLevel {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

// ============================================================================
// Media
// ============================================================================

/// Settings for attachment downloads and the external viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Where downloaded attachments are stored.
    /// `None` means `<os temp dir>/par-timeline`.
    #[serde(default)]
    pub attachment_dir: Option<PathBuf>,

    /// Pause between two viewer launches, in milliseconds.
    #[serde(default = "crate::defaults::open_interval_ms")]
    pub open_interval_ms: u64,

    /// Whole-request HTTP timeout. `None` waits forever.
    #[serde(default)]
    pub http_timeout_secs: Option<u64>,

    /// Upper bound on a single attachment body.
    #[serde(default = "crate::defaults::max_download_bytes")]
    pub max_download_bytes: u64,

    /// `User-Agent` header sent with every download.
    #[serde(default = "crate::defaults::user_agent")]
    pub user_agent: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            attachment_dir: None,
            open_interval_ms: crate::defaults::open_interval_ms(),
            http_timeout_secs: None,
            max_download_bytes: crate::defaults::max_download_bytes(),
            user_agent: crate::defaults::user_agent(),
        }
    }
}

impl MediaConfig {
    /// Directory attachments are written to, resolving the default.
    pub fn resolved_attachment_dir(&self) -> PathBuf {
        self.attachment_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join(ATTACHMENT_DIR_NAME))
    }

    pub fn open_interval(&self) -> Duration {
        Duration::from_millis(self.open_interval_ms)
    }

    pub fn http_timeout(&self) -> Option<Duration> {
        self.http_timeout_secs.map(Duration::from_secs)
    }
}

// ============================================================================
// Colors
// ============================================================================

/// Colors used when drawing timeline text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorConfig {
    /// Default text color
    #[serde(default = "crate::defaults::foreground")]
    pub foreground: Color,

    /// Default background color
    #[serde(default = "crate::defaults::background")]
    pub background: Color,

    /// Background behind `@mention` spans
    #[serde(default = "crate::defaults::mention_background")]
    pub mention_background: Color,

    /// Text color of `#hashtag` spans
    #[serde(default = "crate::defaults::hashtag_foreground")]
    pub hashtag_foreground: Color,

    /// Colors handed out to user labels, one per user id
    #[serde(default = "crate::defaults::label_palette")]
    pub label_palette: Vec<Color>,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            foreground: crate::defaults::foreground(),
            background: crate::defaults::background(),
            mention_background: crate::defaults::mention_background(),
            hashtag_foreground: crate::defaults::hashtag_foreground(),
            label_palette: crate::defaults::label_palette(),
        }
    }
}
