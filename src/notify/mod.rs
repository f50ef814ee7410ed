//! # Notification Sending
//!
//! The [`Notifier`] trait is the single seam between the event pipeline and
//! the chat platform: one `send` returning the platform message id, which the
//! pull-request handler stores as a thread anchor. Handlers depend only on
//! the trait, so tests swap in a recording mock.

use async_trait::async_trait;
use thiserror::Error;

pub mod telegram;

pub use telegram::TelegramNotifier;

/// Errors that can occur while delivering a notification to one chat.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("notifier is not configured; set DEVNOTIFY_TELEGRAM_BOT_TOKEN")]
    NotConfigured,
    #[error("request to chat platform failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("chat platform rejected the message: {description}")]
    Api { description: String },
    #[error("chat platform response was malformed: {0}")]
    MalformedResponse(String),
}

/// Outbound message sender.
///
/// `send` delivers `text` to the chat identified by the platform chat id,
/// optionally as a reply to an earlier message, and returns the new
/// message's platform id.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(
        &self,
        chat_id: i64,
        text: &str,
        reply_to_message_id: Option<i64>,
    ) -> Result<i64, NotifyError>;
}
