//! Test utilities for database and notifier testing.
//!
//! This module provides an in-memory SQLite database with migrations applied,
//! seed helpers for the subscription tables, and a recording notifier that
//! stands in for the Telegram client.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

use anyhow::Result;
use async_trait::async_trait;
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

use devnotify::models::{chat, repo};
use devnotify::notify::{Notifier, NotifyError};
use devnotify::repositories::{ChatRepository, RepoRepository, SubscriptionRepository};

/// Sets up an in-memory SQLite database with all migrations applied.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:").await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}

/// Sets up an in-memory SQLite database with all migrations applied and returns an Arc.
#[allow(dead_code)]
pub async fn setup_test_db_arc() -> Result<Arc<DatabaseConnection>> {
    let db = setup_test_db().await?;
    Ok(Arc::new(db))
}

/// Creates a chat, a repo and an active subscription between them.
///
/// Returns the chat and repo models so tests can reference their ids.
#[allow(dead_code)]
pub async fn seed_subscription(
    db: &Arc<DatabaseConnection>,
    telegram_chat_id: i64,
    repo_full_name: &str,
    branch_filter: Option<&str>,
) -> Result<(chat::Model, repo::Model)> {
    let chats = ChatRepository::new(db.clone());
    let repos = RepoRepository::new(db.clone());
    let subscriptions = SubscriptionRepository::new(db.clone());

    let chat = chats.get_or_create(telegram_chat_id, None).await?;
    let repo = repos.get_or_create(repo_full_name).await?;
    subscriptions.subscribe(&chat, &repo).await?;

    if let Some(filter) = branch_filter {
        subscriptions
            .set_branch_filter(&chat, repo_full_name, filter)
            .await?;
    }

    Ok((chat, repo))
}

/// One message captured by the [`RecordingNotifier`].
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct RecordedSend {
    pub chat_id: i64,
    pub text: String,
    pub reply_to_message_id: Option<i64>,
}

/// In-memory notifier that records every send and hands out sequential
/// message ids. Chats listed in `fail_chat_ids` fail their sends, which
/// exercises the per-subscriber isolation of the fan-out.
#[allow(dead_code)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<RecordedSend>>,
    pub fail_chat_ids: Vec<i64>,
    next_message_id: AtomicI64,
}

#[allow(dead_code)]
impl RecordingNotifier {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_chat_ids: Vec::new(),
            next_message_id: AtomicI64::new(1000),
        }
    }

    pub fn failing_for(chat_ids: Vec<i64>) -> Self {
        Self {
            fail_chat_ids: chat_ids,
            ..Self::new()
        }
    }

    pub fn sent_messages(&self) -> Vec<RecordedSend> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(
        &self,
        chat_id: i64,
        text: &str,
        reply_to_message_id: Option<i64>,
    ) -> Result<i64, NotifyError> {
        if self.fail_chat_ids.contains(&chat_id) {
            return Err(NotifyError::Api {
                description: "Forbidden: bot was kicked from the chat".to_string(),
            });
        }

        let message_id = self.next_message_id.fetch_add(1, Ordering::SeqCst);
        self.sent.lock().unwrap().push(RecordedSend {
            chat_id,
            text: text.to_string(),
            reply_to_message_id,
        });
        Ok(message_id)
    }
}
