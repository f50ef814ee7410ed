//! Migration to create the subscriptions table.
//!
//! One row per (chat, repo) pair. Unsubscribing flips `is_active` off
//! instead of deleting the row, so the unique pair index also enforces
//! reactivate-on-resubscribe semantics.

use sea_orm_migration::prelude::*;

use super::m2025_06_01_000100_create_chats::Chats;
use super::m2025_06_01_000200_create_repos::Repos;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Subscriptions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Subscriptions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Subscriptions::ChatId).integer().not_null())
                    .col(ColumnDef::new(Subscriptions::RepoId).integer().not_null())
                    .col(
                        ColumnDef::new(Subscriptions::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Subscriptions::Branches).text().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subscriptions_chat_id")
                            .from(Subscriptions::Table, Subscriptions::ChatId)
                            .to(Chats::Table, Chats::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subscriptions_repo_id")
                            .from(Subscriptions::Table, Subscriptions::RepoId)
                            .to(Repos::Table, Repos::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_subscriptions_chat_repo")
                    .table(Subscriptions::Table)
                    .col(Subscriptions::ChatId)
                    .col(Subscriptions::RepoId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Subscriptions::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Subscriptions {
    Table,
    Id,
    ChatId,
    RepoId,
    IsActive,
    Branches,
}
