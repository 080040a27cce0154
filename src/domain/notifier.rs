//! Contract of the best-effort notification sink.

use async_trait::async_trait;

/// Errors raised while delivering a notification.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Notification transport error: {0}")]
    Transport(String),

    #[error("Notification rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// External alert channel.
///
/// Notifications are fire-and-forget: callers dispatch them in a detached
/// task and only log failures.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify(&self, text: &str) -> Result<(), NotifyError>;

    /// Returns false for inert sinks.
    fn is_enabled(&self) -> bool;
}
