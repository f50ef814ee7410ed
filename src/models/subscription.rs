//! Subscription entity model
//!
//! The link between one chat and one repository. At most one row exists per
//! (chat, repo) pair; unsubscribing flips `is_active` off instead of
//! deleting, so the branch filter and audit trail survive resubscribes.

use sea_orm::entity::prelude::*;

/// Subscription entity linking a chat to a repository
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "subscriptions")]
pub struct Model {
    /// Internal identifier (primary key)
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Chat reference
    pub chat_id: i32,

    /// Repository reference
    pub repo_id: i32,

    /// Soft-delete flag; inactive subscriptions receive no notifications
    pub is_active: bool,

    /// Optional comma-separated branch filter (`main,release/*`); empty or
    /// absent means every branch matches
    pub branches: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::chat::Entity",
        from = "Column::ChatId",
        to = "super::chat::Column::Id"
    )]
    Chat,
    #[sea_orm(
        belongs_to = "super::repo::Entity",
        from = "Column::RepoId",
        to = "super::repo::Column::Id"
    )]
    Repo,
}

impl Related<super::chat::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Chat.def()
    }
}

impl Related<super::repo::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Repo.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
