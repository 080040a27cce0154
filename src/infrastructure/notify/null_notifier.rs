//! No-op notification sink.

use crate::domain::notifier::{NotificationSink, NotifyError};
use async_trait::async_trait;
use tracing::debug;

/// Drops every notification.
pub struct NullNotifier;

impl NullNotifier {
    pub fn new() -> Self {
        debug!("Using NullNotifier (notifications disabled)");
        Self
    }
}

impl Default for NullNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationSink for NullNotifier {
    async fn notify(&self, _text: &str) -> Result<(), NotifyError> {
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        false
    }
}
