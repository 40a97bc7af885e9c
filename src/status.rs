//! Status line shown at the bottom of the timeline.
//!
//! Any part of the client may post a status message through a cloned
//! [`StatusSender`]; exactly one [`StatusBar`] owns the receiving end and
//! decides what is currently displayed. Messages from one sender arrive in
//! the order they were sent, so progress updates never go backwards.
//!
//! Non-empty messages clear themselves after the configured delay. Posting
//! an empty message clears the line immediately.

use par_timeline_media::ProgressSink;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// One posted status update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    /// Text to display; empty clears the line
    pub text: String,
    /// Clear the text again after this long
    pub clear_after: Option<Duration>,
}

/// Cloneable posting handle for the status line.
#[derive(Debug, Clone)]
pub struct StatusSender {
    tx: mpsc::UnboundedSender<StatusMessage>,
    clear_after: Duration,
}

impl StatusSender {
    /// Post `text`, auto-clearing it after the default delay when non-empty.
    pub fn set(&self, text: impl Into<String>) {
        let text = text.into();
        let clear_after = (!text.is_empty()).then_some(self.clear_after);
        self.send(StatusMessage { text, clear_after });
    }

    /// Post a message that stays until something replaces it.
    pub fn set_sticky(&self, text: impl Into<String>) {
        self.send(StatusMessage {
            text: text.into(),
            clear_after: None,
        });
    }

    pub fn clear(&self) {
        self.set(String::new());
    }

    fn send(&self, message: StatusMessage) {
        if self.tx.send(message).is_err() {
            log::debug!("Status bar dropped; discarding status update");
        }
    }
}

impl ProgressSink for StatusSender {
    fn publish(&self, message: String) {
        self.set(message);
    }
}

/// Receiving end: holds what the status line currently shows.
#[derive(Debug)]
pub struct StatusBar {
    rx: mpsc::UnboundedReceiver<StatusMessage>,
    text: String,
    clear_at: Option<Instant>,
}

impl StatusBar {
    /// Create a status bar and its first sender.
    pub fn channel(clear_after: Duration) -> (StatusSender, StatusBar) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            StatusSender { tx, clear_after },
            StatusBar {
                rx,
                text: String::new(),
                clear_at: None,
            },
        )
    }

    /// Currently displayed text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Apply everything posted so far and expire a stale message.
    ///
    /// Returns `true` when the displayed text changed. Call once per frame.
    pub fn pump(&mut self, now: Instant) -> bool {
        let mut changed = false;
        while let Ok(message) = self.rx.try_recv() {
            changed |= self.apply(message, now);
        }
        if let Some(deadline) = self.clear_at
            && now >= deadline
        {
            self.clear_at = None;
            if !self.text.is_empty() {
                self.text.clear();
                changed = true;
            }
        }
        changed
    }

    /// Wait for the next posted message and apply it.
    ///
    /// Returns `None` once every sender is gone.
    pub async fn next(&mut self) -> Option<&str> {
        let message = self.rx.recv().await?;
        self.apply(message, Instant::now());
        Some(self.text.as_str())
    }

    fn apply(&mut self, message: StatusMessage, now: Instant) -> bool {
        let changed = self.text != message.text;
        self.clear_at = message.clear_after.map(|delay| now + delay);
        self.text = message.text;
        changed
    }
}
