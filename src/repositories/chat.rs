//! Chat repository for database operations

use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use std::sync::Arc;

use crate::models::chat::{self, Entity as Chat};

/// Repository for chat database operations
#[derive(Debug, Clone)]
pub struct ChatRepository {
    /// Database connection pool
    pub db: Arc<DatabaseConnection>,
}

impl ChatRepository {
    /// Creates a new ChatRepository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Idempotent upsert keyed by the Telegram chat id.
    ///
    /// Refreshes the stored title when a new one is provided and differs;
    /// the internal id never changes.
    pub async fn get_or_create(
        &self,
        telegram_chat_id: i64,
        title: Option<&str>,
    ) -> Result<chat::Model> {
        let existing = Chat::find()
            .filter(chat::Column::TelegramChatId.eq(telegram_chat_id))
            .one(self.db.as_ref())
            .await?;

        if let Some(existing) = existing {
            if let Some(title) = title {
                if existing.title.as_deref() != Some(title) {
                    let mut active: chat::ActiveModel = existing.into();
                    active.title = Set(Some(title.to_string()));
                    return Ok(active.update(self.db.as_ref()).await?);
                }
            }
            return Ok(existing);
        }

        let chat = chat::ActiveModel {
            telegram_chat_id: Set(telegram_chat_id),
            title: Set(title.map(|t| t.to_string())),
            ..Default::default()
        };

        Ok(chat.insert(self.db.as_ref()).await?)
    }

    /// Finds a chat by its Telegram chat id.
    pub async fn find_by_telegram_id(&self, telegram_chat_id: i64) -> Result<Option<chat::Model>> {
        Ok(Chat::find()
            .filter(chat::Column::TelegramChatId.eq(telegram_chat_id))
            .one(self.db.as_ref())
            .await?)
    }
}
