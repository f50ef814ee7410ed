//! # Repository Layer
//!
//! This module contains repository implementations that encapsulate SeaORM
//! operations for database entities. These are also the only entry points the
//! Telegram command layer needs from the core.

pub mod chat;
pub mod event_log;
pub mod pr_thread;
pub mod repo;
pub mod subscription;

pub use chat::ChatRepository;
pub use event_log::{DigestEntry, EventLogRepository};
pub use pr_thread::PrThreadRepository;
pub use repo::RepoRepository;
pub use subscription::{SubscriptionRepository, SubscriptionTarget};
