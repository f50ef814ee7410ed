//! Repo repository for database operations

use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use std::sync::Arc;

use crate::models::repo::{self, Entity as Repo};

/// Repository for repo database operations
#[derive(Debug, Clone)]
pub struct RepoRepository {
    /// Database connection pool
    pub db: Arc<DatabaseConnection>,
}

impl RepoRepository {
    /// Creates a new RepoRepository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Idempotent upsert keyed by the `owner/name` full identifier.
    ///
    /// Splits the full name on the first `/` to derive owner and short name;
    /// the provider is fixed to "github".
    pub async fn get_or_create(&self, full_name: &str) -> Result<repo::Model> {
        let full_name = full_name.trim();

        if let Some(existing) = self.find_by_full_name(full_name).await? {
            return Ok(existing);
        }

        let (owner, name) = match full_name.split_once('/') {
            Some((owner, name)) => (Some(owner.to_string()), Some(name.to_string())),
            None => (None, None),
        };

        let repo = repo::ActiveModel {
            provider: Set("github".to_string()),
            owner: Set(owner),
            name: Set(name),
            full_name: Set(full_name.to_string()),
            ..Default::default()
        };

        Ok(repo.insert(self.db.as_ref()).await?)
    }

    /// Finds a repo by its full identifier.
    pub async fn find_by_full_name(&self, full_name: &str) -> Result<Option<repo::Model>> {
        Ok(Repo::find()
            .filter(repo::Column::FullName.eq(full_name.trim()))
            .one(self.db.as_ref())
            .await?)
    }
}
