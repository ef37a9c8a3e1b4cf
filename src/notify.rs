//! Desktop notifications for newly discovered articles.

use notify_rust::{Notification, Timeout};
use thiserror::Error;

/// Title of every new-article notification.
pub const NOTIFICATION_TITLE: &str = concat!(env!("CARGO_PKG_NAME"), " - New Article(s)");

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Desktop notification failed: {0}")]
    Desktop(#[from] notify_rust::error::Error),
}

/// Capability for showing a user-visible notification outside the TUI.
///
/// Implementations block; the dispatcher calls them from `spawn_blocking`.
pub trait Notifier: Send + Sync {
    fn send(&self, title: &str, message: &str) -> Result<(), NotifyError>;
}

/// Native notification via the platform notification daemon.
#[derive(Debug, Clone, Default)]
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn send(&self, title: &str, message: &str) -> Result<(), NotifyError> {
        Notification::new()
            .appname("feedwatch")
            .summary(title)
            .body(message)
            .timeout(Timeout::Milliseconds(5000))
            .show()?;
        tracing::debug!(title = %title, "Sent desktop notification");
        Ok(())
    }
}

/// Swallows notifications (headless runs, tests).
#[derive(Debug, Clone, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn send(&self, _title: &str, _message: &str) -> Result<(), NotifyError> {
        Ok(())
    }
}

/// Banner and notification body for `count` new articles.
pub fn new_articles_message(count: usize) -> String {
    if count == 1 {
        "🔔 1 new article available!".to_string()
    } else {
        format!("🔔 {} new articles available!", count)
    }
}
