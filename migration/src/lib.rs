//! Database migrations for the devnotify service.
//!
//! This module contains all database migrations using SeaORM Migration.

pub use sea_orm_migration::prelude::*;

mod m2025_06_01_000100_create_chats;
mod m2025_06_01_000200_create_repos;
mod m2025_06_01_000300_create_subscriptions;
mod m2025_06_01_000400_create_event_logs;
mod m2025_06_01_000500_create_pr_threads;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m2025_06_01_000100_create_chats::Migration),
            Box::new(m2025_06_01_000200_create_repos::Migration),
            Box::new(m2025_06_01_000300_create_subscriptions::Migration),
            Box::new(m2025_06_01_000400_create_event_logs::Migration),
            Box::new(m2025_06_01_000500_create_pr_threads::Migration),
        ]
    }
}
