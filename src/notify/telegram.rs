//! Telegram Bot API notifier.
//!
//! Thin client for the `sendMessage` method. Rate limiting and retries are
//! the platform client's concern; a failed send surfaces as one
//! [`NotifyError`] and the caller decides what to do with it.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::{Notifier, NotifyError};
use crate::config::AppConfig;

/// Notifier backed by the Telegram Bot API.
pub struct TelegramNotifier {
    client: Client,
    api_base: String,
    bot_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SendMessageResponse {
    ok: bool,
    result: Option<SentMessage>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SentMessage {
    message_id: i64,
}

impl TelegramNotifier {
    /// Builds a notifier from the application configuration.
    ///
    /// A missing bot token is not an error here; sends fail with
    /// [`NotifyError::NotConfigured`] instead, so local profiles can run
    /// the webhook pipeline against a mock.
    pub fn from_config(config: &AppConfig) -> Result<Self, NotifyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.telegram_send_timeout_seconds))
            .build()
            .map_err(NotifyError::Client)?;

        Ok(Self {
            client,
            api_base: config.telegram_api_base.trim_end_matches('/').to_string(),
            bot_token: config.telegram_bot_token.clone(),
        })
    }

    fn send_message_url(&self, token: &str) -> String {
        format!("{}/bot{}/sendMessage", self.api_base, token)
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(
        &self,
        chat_id: i64,
        text: &str,
        reply_to_message_id: Option<i64>,
    ) -> Result<i64, NotifyError> {
        let token = self.bot_token.as_ref().ok_or(NotifyError::NotConfigured)?;

        let mut body = json!({
            "chat_id": chat_id,
            "text": text,
            "parse_mode": "HTML",
            "disable_web_page_preview": true,
        });
        if let Some(reply_to) = reply_to_message_id {
            body["reply_to_message_id"] = json!(reply_to);
        }

        debug!(chat_id, reply_to = ?reply_to_message_id, "Sending Telegram message");

        let response = self
            .client
            .post(self.send_message_url(token))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let parsed: SendMessageResponse = response.json().await.map_err(|e| {
            NotifyError::MalformedResponse(format!("invalid sendMessage response: {}", e))
        })?;

        if !parsed.ok {
            return Err(NotifyError::Api {
                description: parsed
                    .description
                    .unwrap_or_else(|| format!("HTTP {}", status)),
            });
        }

        parsed
            .result
            .map(|m| m.message_id)
            .ok_or_else(|| NotifyError::MalformedResponse("missing result.message_id".to_string()))
    }
}
