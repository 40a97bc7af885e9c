//! Shared fakes for the fetcher integration tests.
//!
//! Include with `mod common;` at the top of a test file. The
//! `#[allow(dead_code)]` keeps files that use a subset of helpers quiet.

#![allow(dead_code)]

use par_timeline_media::{
    AttachmentSource, FetchError, FetchSettings, MediaFetcher, ProgressSink, SourceResponse,
    ViewerLauncher,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Barrier};
use std::time::{Duration, Instant};
use tempfile::TempDir;

/// Canned answer for one URL.
#[derive(Clone)]
pub enum Reply {
    Body(&'static [u8]),
    Status(u16),
    TransportError,
    /// Block for the given time, then answer with the body.
    Slow(Duration, &'static [u8]),
}

/// Source that answers from a table and records every URL it was asked for.
#[derive(Default)]
pub struct FakeSource {
    replies: HashMap<String, Reply>,
    gate: Option<Arc<Barrier>>,
    pub requested: Mutex<Vec<String>>,
    /// When each `get` returned, in completion order.
    pub answered: Mutex<Vec<(String, Instant)>>,
}

impl FakeSource {
    pub fn with(mut self, url: &str, reply: Reply) -> Self {
        self.replies.insert(url.to_string(), reply);
        self
    }

    /// Hold every `get` until `gate` releases it.
    pub fn gated(mut self, gate: Arc<Barrier>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn answered_at(&self, url: &str) -> Option<Instant> {
        self.answered
            .lock()
            .iter()
            .find(|(answered, _)| answered == url)
            .map(|&(_, at)| at)
    }

    pub fn requested_sorted(&self) -> Vec<String> {
        let mut urls = self.requested.lock().clone();
        urls.sort();
        urls
    }

    fn reply(&self, url: &str) -> Result<SourceResponse, FetchError> {
        match self.replies.get(url) {
            Some(Reply::Body(body)) => Ok(SourceResponse::ok(*body)),
            Some(Reply::Slow(delay, body)) => {
                std::thread::sleep(*delay);
                Ok(SourceResponse::ok(*body))
            }
            Some(Reply::Status(status)) => Ok(SourceResponse {
                status: *status,
                body: Vec::new(),
            }),
            Some(Reply::TransportError) | None => Err(FetchError::Network {
                url: url.to_string(),
                reason: "connection refused".to_string(),
            }),
        }
    }
}

impl AttachmentSource for FakeSource {
    fn get(&self, url: &str) -> Result<SourceResponse, FetchError> {
        self.requested.lock().push(url.to_string());
        if let Some(gate) = &self.gate {
            gate.wait();
        }
        let reply = self.reply(url);
        self.answered.lock().push((url.to_string(), Instant::now()));
        reply
    }
}

/// Viewer that only remembers what it was asked to open, and when.
#[derive(Default)]
pub struct RecordingViewer {
    pub opened: Mutex<Vec<PathBuf>>,
    pub opened_at: Mutex<Vec<Instant>>,
}

impl ViewerLauncher for RecordingViewer {
    fn open(&self, path: &Path) -> io::Result<()> {
        self.opened_at.lock().push(Instant::now());
        self.opened.lock().push(path.to_path_buf());
        Ok(())
    }
}

/// Progress sink that keeps every message in order.
#[derive(Default)]
pub struct RecordingSink {
    pub messages: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn last(&self) -> Option<String> {
        self.messages.lock().last().cloned()
    }
}

impl ProgressSink for RecordingSink {
    fn publish(&self, message: String) {
        self.messages.lock().push(message);
    }
}

/// A fetcher writing into a fresh temp dir, plus handles to its fakes.
pub struct Harness {
    pub fetcher: MediaFetcher,
    pub source: Arc<FakeSource>,
    pub viewer: Arc<RecordingViewer>,
    pub sink: Arc<RecordingSink>,
    pub temp_dir: TempDir,
}

impl Harness {
    pub fn new(source: FakeSource) -> Self {
        Self::with_open_interval(source, Duration::from_millis(1))
    }

    pub fn with_open_interval(source: FakeSource, open_interval: Duration) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let source = Arc::new(source);
        let viewer = Arc::new(RecordingViewer::default());
        let sink = Arc::new(RecordingSink::default());
        let settings = FetchSettings {
            attachment_dir: temp_dir.path().join("attachments"),
            open_interval,
        };
        let fetcher = MediaFetcher::new(source.clone(), viewer.clone(), sink.clone(), settings);
        Self {
            fetcher,
            source,
            viewer,
            sink,
            temp_dir,
        }
    }

    pub fn attachment_dir(&self) -> PathBuf {
        self.fetcher.settings().attachment_dir.clone()
    }

    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.attachment_dir().join(file_name)
    }

    pub fn opened(&self) -> Vec<PathBuf> {
        self.viewer.opened.lock().clone()
    }

    pub fn opened_at(&self) -> Vec<Instant> {
        self.viewer.opened_at.lock().clone()
    }
}

pub fn url(file_name: &str) -> String {
    format!("https://media.example.com/img/{file_name}")
}
