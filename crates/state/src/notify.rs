//! Transient user-facing notifications backed by a `tokio::sync::broadcast`
//! channel.
//!
//! Stores publish a [`Notification`] after every user-initiated mutation;
//! any number of front ends (the CLI, a TUI, a test) can subscribe.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Error,
}

/// A short message shown once to the user.
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub level: Level,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Level::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Level::Error, message)
    }

    fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == Level::Error
    }
}

const DEFAULT_CAPACITY: usize = 256;

/// Fan-out notification channel, shared via `Arc<Notifier>`.
pub struct Notifier {
    sender: broadcast::Sender<Notification>,
}

impl Notifier {
    /// When the buffer is full the oldest messages are dropped and slow
    /// receivers observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish to all current subscribers. Dropped if nobody listens.
    pub fn publish(&self, notification: Notification) {
        tracing::debug!(level = ?notification.level, message = %notification.message, "Notification");
        let _ = self.sender.send(notification);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
