//! Notification sinks.
//!
//! - [`TelegramNotifier`] - Sends alerts through the Telegram Bot API
//! - [`NullNotifier`] - Inert sink used when no channel is configured

mod null_notifier;
mod telegram;

pub use null_notifier::NullNotifier;
pub use telegram::TelegramNotifier;
