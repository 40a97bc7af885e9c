//! Typed errors for attachment downloads.
//!
//! These never leave a download task: the fetcher logs them and reduces each
//! one to a [`crate::FetchOutcome::Failure`].

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    /// The URL is malformed or uses a scheme other than http/https.
    #[error("Refusing to download '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// DNS, connection, TLS or body read failure.
    #[error("Failed to download '{url}': {reason}")]
    Network { url: String, reason: String },

    /// The server answered with something other than 200.
    #[error("Download of '{url}' returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// Creating the attachment directory or writing the file failed.
    #[error("Failed to {action} '{}': {source}", path.display())]
    Filesystem {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    pub(crate) fn network(url: &str, reason: impl std::fmt::Display) -> Self {
        FetchError::Network {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn filesystem(
        action: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        FetchError::Filesystem {
            action,
            path: path.into(),
            source,
        }
    }
}
