//! PrThread entity model
//!
//! Continuity anchor for one pull request within one (chat, repo): the id of
//! the first message posted for that PR number, used to thread later
//! notifications as replies. Unique on (chat, repo, pr_number).

use sea_orm::entity::prelude::*;

/// PrThread entity anchoring a pull-request conversation in a chat
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "pr_threads")]
pub struct Model {
    /// Internal identifier (primary key)
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Chat reference
    pub chat_id: i32,

    /// Repository reference
    pub repo_id: i32,

    /// Pull request number within the repository
    pub pr_number: i64,

    /// Telegram message id of the first notification for this PR
    pub root_message_id: i64,
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
