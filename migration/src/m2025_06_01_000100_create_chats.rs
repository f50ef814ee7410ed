//! Migration to create the chats table.
//!
//! A chat row is one Telegram notification destination, keyed by the
//! platform chat id.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Chats::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Chats::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Chats::TelegramChatId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Chats::Title).text().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_chats_telegram_chat_id")
                    .table(Chats::Table)
                    .col(Chats::TelegramChatId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Chats::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Chats {
    Table,
    Id,
    TelegramChatId,
    Title,
}
