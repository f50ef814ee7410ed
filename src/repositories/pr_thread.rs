//! PR thread repository for database operations
//!
//! Thread anchors are upserts keyed on (chat, repo, pr_number): a duplicate
//! "opened" delivery overwrites the row instead of adding a second anchor.

use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use std::sync::Arc;

use crate::models::pr_thread::{self, Entity as PrThread};

/// Repository for PR thread anchor database operations
#[derive(Debug, Clone)]
pub struct PrThreadRepository {
    /// Database connection pool
    pub db: Arc<DatabaseConnection>,
}

impl PrThreadRepository {
    /// Creates a new PrThreadRepository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Upserts the anchor message id for (chat, repo, pr_number).
    pub async fn save_anchor(
        &self,
        chat_id: i32,
        repo_id: i32,
        pr_number: i64,
        root_message_id: i64,
    ) -> Result<()> {
        let existing = self.find(chat_id, repo_id, pr_number).await?;

        match existing {
            Some(existing) => {
                let mut active: pr_thread::ActiveModel = existing.into();
                active.root_message_id = Set(root_message_id);
                active.update(self.db.as_ref()).await?;
            }
            None => {
                let thread = pr_thread::ActiveModel {
                    chat_id: Set(chat_id),
                    repo_id: Set(repo_id),
                    pr_number: Set(pr_number),
                    root_message_id: Set(root_message_id),
                    ..Default::default()
                };
                thread.insert(self.db.as_ref()).await?;
            }
        }

        Ok(())
    }

    /// Returns the anchor message id for (chat, repo, pr_number), if any.
    pub async fn get_anchor(
        &self,
        chat_id: i32,
        repo_id: i32,
        pr_number: i64,
    ) -> Result<Option<i64>> {
        Ok(self
            .find(chat_id, repo_id, pr_number)
            .await?
            .map(|thread| thread.root_message_id))
    }

    async fn find(
        &self,
        chat_id: i32,
        repo_id: i32,
        pr_number: i64,
    ) -> Result<Option<pr_thread::Model>> {
        Ok(PrThread::find()
            .filter(pr_thread::Column::ChatId.eq(chat_id))
            .filter(pr_thread::Column::RepoId.eq(repo_id))
            .filter(pr_thread::Column::PrNumber.eq(pr_number))
            .one(self.db.as_ref())
            .await?)
    }
}
