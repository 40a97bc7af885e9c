//! Parallel attachment downloads with ordered post-processing.
//!
//! `MediaFetcher::fetch_and_open` runs in three phases:
//!
//! 1. **Fan-out**: one tokio task per URL. Each task does its blocking HTTP and
//!    filesystem work on the blocking pool and sends exactly one
//!    [`FetchOutcome`] over a channel sized to the URL count, so no sender
//!    ever waits for capacity.
//! 2. **Fan-in**: a single collector task drains `n` outcomes, publishing
//!    `Downloading...(k/n)` after every success and counting failures.
//! 3. **Open**: once every download task *and* the collector have finished,
//!    the URLs are walked in reverse and each file that exists is handed to
//!    the viewer, one at a time with a short pause in between.
//!
//! Nothing here can be cancelled. A request that never completes holds its
//! own task (and therefore the whole call) but does not slow the others.

use crate::attachment::{Attachment, DownloadState, download_attachment};
use crate::http::UreqSource;
use crate::source::AttachmentSource;
use crate::viewer::{SystemViewer, ViewerLauncher};
use par_timeline_config::MediaConfig;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

/// Status text when exactly one download failed.
pub const SINGLE_FAILURE_MESSAGE: &str = "Err:media download failed";
/// Status text when every download failed.
pub const ALL_FAILED_MESSAGE: &str = "Err:all media downloads failed";
/// Status text when some, but not all and not exactly one, downloads failed.
pub const SOME_FAILED_MESSAGE: &str = "Err:some media downloads failed";

/// Receives human-readable status updates in the order they are published.
pub trait ProgressSink: Send + Sync {
    /// Publish a status line. An empty string clears the status.
    fn publish(&self, message: String);
}

/// Result of one download task, all error detail stripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Success,
    Failure,
}

/// `Downloading...(k/n)`
pub fn progress_message(done: usize, total: usize) -> String {
    format!("Downloading...({}/{})", done, total)
}

/// Counts from a finished `fetch_and_open` run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchSummary {
    /// Number of URLs requested
    pub total: usize,
    /// Number of download tasks that reported failure
    pub failures: usize,
    /// Number of files handed to the viewer
    pub opened: usize,
}

impl FetchSummary {
    /// Final status line for the run. Empty means "clear the status".
    pub fn status_message(&self) -> &'static str {
        match self.failures {
            0 => "",
            1 => SINGLE_FAILURE_MESSAGE,
            f if f == self.total => ALL_FAILED_MESSAGE,
            _ => SOME_FAILED_MESSAGE,
        }
    }
}

/// Where attachments go and how fast they are opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSettings {
    pub attachment_dir: PathBuf,
    pub open_interval: Duration,
}

impl FetchSettings {
    pub fn from_config(config: &MediaConfig) -> Self {
        Self {
            attachment_dir: config.resolved_attachment_dir(),
            open_interval: config.open_interval(),
        }
    }
}

/// Downloads attachments in parallel and opens them in order.
pub struct MediaFetcher {
    source: Arc<dyn AttachmentSource>,
    viewer: Arc<dyn ViewerLauncher>,
    progress: Arc<dyn ProgressSink>,
    settings: FetchSettings,
}

impl MediaFetcher {
    pub fn new(
        source: Arc<dyn AttachmentSource>,
        viewer: Arc<dyn ViewerLauncher>,
        progress: Arc<dyn ProgressSink>,
        settings: FetchSettings,
    ) -> Self {
        Self {
            source,
            viewer,
            progress,
            settings,
        }
    }

    /// Production wiring: ureq downloads, system viewer.
    pub fn from_config(config: &MediaConfig, progress: Arc<dyn ProgressSink>) -> Self {
        Self::new(
            Arc::new(UreqSource::new(config)),
            Arc::new(SystemViewer),
            progress,
            FetchSettings::from_config(config),
        )
    }

    pub fn settings(&self) -> &FetchSettings {
        &self.settings
    }

    /// Download every URL, then open the results newest-request-first.
    pub async fn fetch_and_open<S: AsRef<str>>(&self, urls: &[S]) -> FetchSummary {
        let attachments: Vec<Attachment> = urls
            .iter()
            .map(|url| Attachment::new(url.as_ref(), &self.settings.attachment_dir))
            .collect();
        let total = attachments.len();

        if total == 0 {
            self.progress.publish(String::new());
            return FetchSummary {
                total: 0,
                failures: 0,
                opened: 0,
            };
        }

        log::info!(
            "Fetching {} attachment(s) into {:?}",
            total,
            self.settings.attachment_dir
        );
        self.progress.publish(progress_message(0, total));

        let (tx, rx) = mpsc::channel::<FetchOutcome>(total);
        let collector = tokio::spawn(collect_outcomes(rx, total, Arc::clone(&self.progress)));

        let mut downloads = JoinSet::new();
        for attachment in &attachments {
            downloads.spawn(run_download(
                Arc::clone(&self.source),
                attachment.clone(),
                tx.clone(),
            ));
        }
        // Only the tasks hold senders now; if they all vanish the collector sees
        // the channel close instead of waiting forever.
        drop(tx);

        while let Some(joined) = downloads.join_next().await {
            if let Err(e) = joined {
                log::error!("Attachment download task panicked: {}", e);
            }
        }
        let failures = match collector.await {
            Ok(failures) => failures,
            Err(e) => {
                log::error!("Download progress collector panicked: {}", e);
                total
            }
        };

        let opened = self.open_present(&attachments).await;

        let summary = FetchSummary {
            total,
            failures,
            opened,
        };
        log::info!(
            "Attachment fetch finished: {} of {} failed, {} opened",
            summary.failures,
            summary.total,
            summary.opened
        );
        self.progress.publish(summary.status_message().to_string());
        summary
    }

    /// Open each downloaded file, last requested first.
    async fn open_present(&self, attachments: &[Attachment]) -> usize {
        let mut opened = 0;
        for attachment in attachments.iter().rev() {
            if !attachment.is_present() {
                continue;
            }
            if opened > 0 {
                tokio::time::sleep(self.settings.open_interval).await;
            }

            let viewer = Arc::clone(&self.viewer);
            let path = attachment.local_path.clone();
            match tokio::task::spawn_blocking(move || viewer.open(&path)).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => log::warn!("Failed to open {:?}: {}", attachment.local_path, e),
                Err(e) => log::error!(
                    "Viewer launch panicked for {:?}: {}",
                    attachment.local_path,
                    e
                ),
            }
            opened += 1;
        }
        opened
    }
}

/// One download task: do the blocking work, report a bare outcome.
async fn run_download(
    source: Arc<dyn AttachmentSource>,
    attachment: Attachment,
    tx: mpsc::Sender<FetchOutcome>,
) {
    let url = attachment.source_url.clone();
    let result =
        tokio::task::spawn_blocking(move || download_attachment(source.as_ref(), &attachment))
            .await;

    let outcome = match result {
        Ok(Ok(DownloadState::AlreadyPresent)) => {
            log::debug!("{} already downloaded, skipping", url);
            FetchOutcome::Success
        }
        Ok(Ok(DownloadState::Downloaded { bytes })) => {
            log::debug!("Downloaded {} ({} bytes)", url, bytes);
            FetchOutcome::Success
        }
        Ok(Err(e)) => {
            log::warn!("{}", e);
            FetchOutcome::Failure
        }
        Err(e) => {
            log::error!("Download of {} panicked: {}", url, e);
            FetchOutcome::Failure
        }
    };

    // Capacity equals the task count, so this never waits.
    if tx.send(outcome).await.is_err() {
        log::warn!("Progress collector gone before {} reported", url);
    }
}

/// Drain exactly `total` outcomes; returns the failure count.
async fn collect_outcomes(
    mut rx: mpsc::Receiver<FetchOutcome>,
    total: usize,
    progress: Arc<dyn ProgressSink>,
) -> usize {
    let mut succeeded = 0;
    let mut failed = 0;
    while succeeded + failed < total {
        match rx.recv().await {
            Some(FetchOutcome::Success) => {
                succeeded += 1;
                progress.publish(progress_message(succeeded, total));
            }
            Some(FetchOutcome::Failure) => failed += 1,
            None => {
                // Every sender dropped early; whatever never reported failed.
                log::warn!(
                    "Outcome channel closed after {} of {} results",
                    succeeded + failed,
                    total
                );
                return total - succeeded;
            }
        }
    }
    failed
}
