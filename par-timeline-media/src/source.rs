//! The network side of a download, kept behind a trait so the fetcher can be
//! driven by canned responses in tests.

use crate::error::FetchError;

/// Status line and body of a completed GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl SourceResponse {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }
}

/// Fetches the bytes behind a URL.
///
/// Called from the blocking thread pool, one call per attachment, possibly
/// many at once. A non-200 status is returned as a response, not an error;
/// `Err` is reserved for transport failures.
pub trait AttachmentSource: Send + Sync {
    fn get(&self, url: &str) -> Result<SourceResponse, FetchError>;
}
