//! Attachment handling for par-timeline.
//!
//! Provides:
//! - `source`: the `AttachmentSource` abstraction over "GET this URL"
//! - `http`: the production source built on ureq with native-tls
//! - `attachment`: local path derivation and the per-file download step
//! - `fetcher`: parallel download fan-out, progress fan-in and ordered viewer opens
//! - `viewer`: launching the platform's default viewer for a file

pub mod attachment;
pub mod error;
pub mod fetcher;
pub mod http;
pub mod source;
pub mod viewer;

pub use attachment::{Attachment, DownloadState, attachment_file_name};
pub use error::FetchError;
pub use fetcher::{
    FetchOutcome, FetchSettings, FetchSummary, MediaFetcher, ProgressSink, progress_message,
};
pub use http::UreqSource;
pub use source::{AttachmentSource, SourceResponse};
pub use viewer::{SystemViewer, ViewerLauncher};
