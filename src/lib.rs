//! par-timeline: rendering support and attachment handling for a terminal
//! social timeline client.
//!
//! - `highlight`: mention/hashtag highlighting and row drawing helpers
//! - `label_color`: stable per-user label colors
//! - `lock`: fast-fail busy flag for user-triggered operations
//! - `status`: ordered status-line messages with auto-clear
//! - `actions`: favorite/unfavorite/retweet with status reporting
//! - `post_text`: entity unescaping and link expansion for display
//! - `terminal`: process-wide terminal size
//! - `ansi`: printing highlighted rows outside the full-screen UI
//!
//! Attachment downloads live in `par-timeline-media`, configuration in
//! `par-timeline-config`; both are re-exported here.

pub mod actions;
pub mod ansi;
pub mod cli;
pub mod debug;
pub mod highlight;
pub mod label_color;
pub mod lock;
pub mod post_text;
pub mod status;
pub mod terminal;

pub use par_timeline_config as config;
pub use par_timeline_media as media;

/// Version of the root crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
