//! Transient user-facing notifications.
//!
//! Failures that are shown to the user and then dropped (a rejected search
//! term, a failed request) go through a [`Notifier`]. The UI layer decides
//! how to render them.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub text: String,
}

pub trait Notifier: Send + Sync + 'static {
    fn notify(&self, notification: Notification);

    fn error(&self, text: &str) {
        self.notify(Notification {
            level: NotificationLevel::Error,
            text: text.to_owned(),
        });
    }

    fn info(&self, text: &str) {
        self.notify(Notification {
            level: NotificationLevel::Info,
            text: text.to_owned(),
        });
    }
}

/// Writes notifications to the log. Used when no UI is attached.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Info => tracing::info!(text = %notification.text, "notification"),
            NotificationLevel::Error => tracing::warn!(text = %notification.text, "notification"),
        }
    }
}

/// Forwards notifications to a receiver owned by the UI.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notification: Notification) {
        // A closed receiver means the UI is gone; nothing left to show.
        if self.tx.send(notification).is_err() {
            tracing::debug!("notification receiver dropped");
        }
    }
}
