//! Migration to create the pr_threads table.
//!
//! Stores the first message id sent for a pull request in a chat so later
//! notifications for the same PR can thread as replies. The unique
//! (chat, repo, pr_number) index backs the upsert that keeps duplicate
//! "opened" deliveries from anchoring twice.

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
                    .table(PrThreads::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PrThreads::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PrThreads::ChatId).integer().not_null())
                    .col(ColumnDef::new(PrThreads::RepoId).integer().not_null())
                    .col(ColumnDef::new(PrThreads::PrNumber).big_integer().not_null())
                    .col(
                        ColumnDef::new(PrThreads::RootMessageId)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pr_threads_chat_id")
                            .from(PrThreads::Table, PrThreads::ChatId)
                            .to(Chats::Table, Chats::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pr_threads_repo_id")
                            .from(PrThreads::Table, PrThreads::RepoId)
                            .to(Repos::Table, Repos::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_pr_threads_chat_repo_pr")
                    .table(PrThreads::Table)
                    .col(PrThreads::ChatId)
                    .col(PrThreads::RepoId)
                    .col(PrThreads::PrNumber)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PrThreads::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum PrThreads {
    Table,
    Id,
    ChatId,
    RepoId,
    PrNumber,
    RootMessageId,
}
