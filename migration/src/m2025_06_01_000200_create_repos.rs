//! Migration to create the repos table.
//!
//! A repo row is one monitored source-control project, keyed by its
//! `owner/name` full name.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Repos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Repos::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Repos::Provider)
                            .text()
                            .not_null()
                            .default("github"),
                    )
                    .col(ColumnDef::new(Repos::Owner).text().null())
                    .col(ColumnDef::new(Repos::Name).text().null())
                    .col(ColumnDef::new(Repos::FullName).text().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_repos_full_name")
                    .table(Repos::Table)
                    .col(Repos::FullName)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Repos::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Repos {
    Table,
    Id,
    Provider,
    Owner,
    Name,
    FullName,
}
