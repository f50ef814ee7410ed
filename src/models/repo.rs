//! Repo entity model
//!
//! One row per monitored source-control project, created lazily on first
//! reference by a subscription or webhook event.

use sea_orm::entity::prelude::*;

/// Repo entity representing one monitored repository
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "repos")]
pub struct Model {
    /// Internal identifier (primary key)
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Source-control provider (fixed to "github")
    pub provider: String,

    /// Repository owner, parsed from the full name
    pub owner: Option<String>,

    /// Repository short name, parsed from the full name
    pub name: Option<String>,

    /// Full identifier `owner/name` (unique)
    pub full_name: String,
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
