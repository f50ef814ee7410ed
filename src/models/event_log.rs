//! EventLog entity model
//!
//! Append-only record of one delivered notification, read back by the
//! time-windowed digest query.

use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

/// EventLog entity recording one delivered notification
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "event_logs")]
pub struct Model {
    /// Internal identifier (primary key)
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Chat reference
    pub chat_id: i32,

    /// Repository reference
    pub repo_id: i32,

    /// Event kind ("pull_request", "push", "workflow_run")
    pub event_type: String,

    /// Classified subtype (action or conclusion)
    pub event_subtype: Option<String>,

    /// UTC delivery timestamp
    pub timestamp: DateTimeWithTimeZone,

    /// Short human-readable summary line
    pub payload_summary: Option<String>,
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
