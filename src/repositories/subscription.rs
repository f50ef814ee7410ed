//! Subscription repository for database operations
//!
//! Subscriptions are soft-deleted: a row is never removed, only its
//! `is_active` flag flips. Resubscribing reactivates the existing row so the
//! unique (chat, repo) invariant holds under replays.

use anyhow::{Result, anyhow};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use std::sync::Arc;

use crate::models::chat;
use crate::models::repo;
use crate::models::subscription::{self, Entity as Subscription};

/// One active subscription joined with its chat and repository.
#[derive(Debug, Clone)]
pub struct SubscriptionTarget {
    pub subscription: subscription::Model,
    pub chat: chat::Model,
    pub repo: repo::Model,
}

/// Repository for subscription database operations
#[derive(Debug, Clone)]
pub struct SubscriptionRepository {
    /// Database connection pool
    pub db: Arc<DatabaseConnection>,
}

impl SubscriptionRepository {
    /// Creates a new SubscriptionRepository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Subscribes a chat to a repository.
    ///
    /// Idempotent: an existing row is reactivated rather than duplicated.
    pub async fn subscribe(
        &self,
        chat: &chat::Model,
        repo: &repo::Model,
    ) -> Result<subscription::Model> {
        let existing = self.find_pair(chat.id, repo.id).await?;

        if let Some(existing) = existing {
            if !existing.is_active {
                let mut active: subscription::ActiveModel = existing.into();
                active.is_active = Set(true);
                return Ok(active.update(self.db.as_ref()).await?);
            }
            return Ok(existing);
        }

        let sub = subscription::ActiveModel {
            chat_id: Set(chat.id),
            repo_id: Set(repo.id),
            is_active: Set(true),
            ..Default::default()
        };

        Ok(sub.insert(self.db.as_ref()).await?)
    }

    /// Deactivates the subscription of `chat` to the repository named
    /// `full_name`.
    ///
    /// Returns false when the repository is unknown or no active
    /// subscription exists; nothing is written in that case.
    pub async fn unsubscribe(&self, chat: &chat::Model, full_name: &str) -> Result<bool> {
        let Some(repo) = self.find_repo(full_name).await? else {
            return Ok(false);
        };

        let Some(sub) = self.find_pair(chat.id, repo.id).await? else {
            return Ok(false);
        };

        if !sub.is_active {
            return Ok(false);
        }

        let mut active: subscription::ActiveModel = sub.into();
        active.is_active = Set(false);
        active.update(self.db.as_ref()).await?;
        Ok(true)
    }

    /// Overwrites the branch filter expression for an existing subscription.
    ///
    /// Returns false when no subscription row exists for the pair. The
    /// expression is trimmed but otherwise stored verbatim.
    pub async fn set_branch_filter(
        &self,
        chat: &chat::Model,
        full_name: &str,
        branches: &str,
    ) -> Result<bool> {
        let Some(repo) = self.find_repo(full_name).await? else {
            return Ok(false);
        };

        let Some(sub) = self.find_pair(chat.id, repo.id).await? else {
            return Ok(false);
        };

        let mut active: subscription::ActiveModel = sub.into();
        active.branches = Set(Some(branches.trim().to_string()));
        active.update(self.db.as_ref()).await?;
        Ok(true)
    }

    /// Returns the active subscriptions for a repository full name, each
    /// joined with its chat and the repository itself.
    pub async fn active_for_repo(&self, full_name: &str) -> Result<Vec<SubscriptionTarget>> {
        let Some(repo) = self.find_repo(full_name).await? else {
            return Ok(Vec::new());
        };

        let rows = Subscription::find()
            .filter(subscription::Column::RepoId.eq(repo.id))
            .filter(subscription::Column::IsActive.eq(true))
            .find_also_related(chat::Entity)
            .all(self.db.as_ref())
            .await?;

        let mut targets = Vec::with_capacity(rows.len());
        for (sub, chat) in rows {
            let chat = chat.ok_or_else(|| anyhow!("subscription {} has no chat row", sub.id))?;
            targets.push(SubscriptionTarget {
                subscription: sub,
                chat,
                repo: repo.clone(),
            });
        }

        Ok(targets)
    }

    /// Returns the active subscriptions of a chat, each joined with its
    /// repository. Used by the command layer for listing.
    pub async fn active_for_chat(
        &self,
        chat: &chat::Model,
    ) -> Result<Vec<(subscription::Model, repo::Model)>> {
        let rows = Subscription::find()
            .filter(subscription::Column::ChatId.eq(chat.id))
            .filter(subscription::Column::IsActive.eq(true))
            .find_also_related(repo::Entity)
            .all(self.db.as_ref())
            .await?;

        let mut out = Vec::with_capacity(rows.len());
        for (sub, repo) in rows {
            let repo = repo.ok_or_else(|| anyhow!("subscription {} has no repo row", sub.id))?;
            out.push((sub, repo));
        }

        Ok(out)
    }

    async fn find_pair(&self, chat_id: i32, repo_id: i32) -> Result<Option<subscription::Model>> {
        Ok(Subscription::find()
            .filter(subscription::Column::ChatId.eq(chat_id))
            .filter(subscription::Column::RepoId.eq(repo_id))
            .one(self.db.as_ref())
            .await?)
    }

    async fn find_repo(&self, full_name: &str) -> Result<Option<repo::Model>> {
        Ok(repo::Entity::find()
            .filter(repo::Column::FullName.eq(full_name.trim()))
            .one(self.db.as_ref())
            .await?)
    }
}
