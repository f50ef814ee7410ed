//! Migration to create the event_logs table.
//!
//! Append-only record of delivered notifications, read back by the
//! time-windowed digest query.

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
                    .table(EventLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EventLogs::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(EventLogs::ChatId).integer().not_null())
                    .col(ColumnDef::new(EventLogs::RepoId).integer().not_null())
                    .col(ColumnDef::new(EventLogs::EventType).text().not_null())
                    .col(ColumnDef::new(EventLogs::EventSubtype).text().null())
                    .col(
                        ColumnDef::new(EventLogs::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(EventLogs::PayloadSummary).text().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_logs_chat_id")
                            .from(EventLogs::Table, EventLogs::ChatId)
                            .to(Chats::Table, Chats::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_logs_repo_id")
                            .from(EventLogs::Table, EventLogs::RepoId)
                            .to(Repos::Table, Repos::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_event_logs_chat_timestamp")
                    .table(EventLogs::Table)
                    .col(EventLogs::ChatId)
                    .col(EventLogs::Timestamp)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EventLogs::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum EventLogs {
    Table,
    Id,
    ChatId,
    RepoId,
    EventType,
    EventSubtype,
    Timestamp,
    PayloadSummary,
}
