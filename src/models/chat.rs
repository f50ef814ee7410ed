//! Chat entity model
//!
//! One row per Telegram chat the service can notify. Created on first
//! interaction; the platform chat id is unique and never changes.

use sea_orm::entity::prelude::*;

/// Chat entity representing one Telegram notification destination
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "chats")]
pub struct Model {
    /// Internal identifier (primary key)
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Telegram chat identifier (unique)
    pub telegram_chat_id: i64,

    /// Display title of the chat (optional, refreshed on change)
    pub title: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::subscription::Entity")]
    Subscription,
}

impl Related<super::subscription::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subscription.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
