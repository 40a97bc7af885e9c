//! HTTP attachment source with native-tls support.

use crate::error::FetchError;
use crate::source::{AttachmentSource, SourceResponse};
use par_timeline_config::MediaConfig;
use std::time::Duration;
use ureq::Agent;
use ureq::tls::{RootCerts, TlsConfig, TlsProvider};

/// Validate that a URL is something we are willing to fetch.
///
/// Only `http` and `https` are accepted; `file://` and friends would let a
/// crafted post read local files into the attachment directory.
pub fn validate_attachment_url(url: &str) -> Result<(), FetchError> {
    let parsed = url::Url::parse(url).map_err(|e| FetchError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(FetchError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme '{}'", scheme),
        }),
    }
}

/// Create a new HTTP agent configured with native-tls.
///
/// Non-2xx responses are handed back as responses so the caller decides what
/// counts as a failure. `timeout` of `None` leaves requests unbounded.
pub fn agent(timeout: Option<Duration>) -> Agent {
    let tls_config = TlsConfig::builder()
        .provider(TlsProvider::NativeTls)
        .root_certs(RootCerts::PlatformVerifier)
        .build();

    Agent::config_builder()
        .tls_config(tls_config)
        .timeout_global(timeout)
        .http_status_as_error(false)
        .build()
        .into()
}

/// [`AttachmentSource`] backed by a shared ureq agent.
pub struct UreqSource {
    agent: Agent,
    user_agent: String,
    max_body: u64,
}

impl UreqSource {
    pub fn new(config: &MediaConfig) -> Self {
        Self {
            agent: agent(config.http_timeout()),
            user_agent: config.user_agent.clone(),
            max_body: config.max_download_bytes,
        }
    }
}

impl AttachmentSource for UreqSource {
    fn get(&self, url: &str) -> Result<SourceResponse, FetchError> {
        validate_attachment_url(url)?;

        let response = self
            .agent
            .get(url)
            .header("User-Agent", self.user_agent.as_str())
            .call()
            .map_err(|e| FetchError::network(url, e))?;

        let status = response.status().as_u16();
        if status != 200 {
            log::debug!("GET {} answered {}", url, status);
            return Ok(SourceResponse {
                status,
                body: Vec::new(),
            });
        }

        let body = response
            .into_body()
            .with_config()
            .limit(self.max_body)
            .read_to_vec()
            .map_err(|e| FetchError::network(url, e))?;

        Ok(SourceResponse { status, body })
    }
}
