//! Telegram Bot API notification sink.

use crate::domain::notifier::{NotificationSink, NotifyError};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::debug;

const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Retries after the first failed attempt.
const MAX_RETRIES: usize = 2;

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// Posts notifications to a Telegram chat via `sendMessage`.
pub struct TelegramNotifier {
    http: reqwest::Client,
    api_base: String,
    bot_token: String,
    chat_id: String,
}

impl TelegramNotifier {
    /// # Errors
    ///
    /// Returns [`NotifyError::Transport`] if the HTTP client cannot be built.
    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>) -> Result<Self, NotifyError> {
        Self::with_api_base(DEFAULT_API_BASE, bot_token, chat_id)
    }

    /// Same as [`Self::new`] with a custom API base URL.
    pub fn with_api_base(
        api_base: impl Into<String>,
        bot_token: impl Into<String>,
        chat_id: impl Into<String>,
    ) -> Result<Self, NotifyError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_base, self.bot_token)
    }

    async fn send_once(&self, text: &str) -> Result<(), NotifyError> {
        let response = self
            .http
            .post(self.endpoint())
            .json(&SendMessage {
                chat_id: &self.chat_id,
                text,
            })
            .send()
            .await
            // without_url keeps the bot token out of logs
            .map_err(|e| NotifyError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(NotifyError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl NotificationSink for TelegramNotifier {
    async fn notify(&self, text: &str) -> Result<(), NotifyError> {
        // 100ms, then 1s
        let strategy = ExponentialBackoff::from_millis(10)
            .factor(10)
            .map(jitter)
            .take(MAX_RETRIES);

        Retry::spawn(strategy, || self.send_once(text)).await?;

        debug!("Telegram notification delivered");
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        true
    }
}
