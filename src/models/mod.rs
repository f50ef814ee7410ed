//! # Data Models
//!
//! This module contains the SeaORM entity models for the devnotify store.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod chat;
pub mod event_log;
pub mod pr_thread;
pub mod repo;
pub mod subscription;

pub use chat::Entity as Chat;
pub use event_log::Entity as EventLog;
pub use pr_thread::Entity as PrThread;
pub use repo::Entity as Repo;
pub use subscription::Entity as Subscription;

/// Basic service information response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfo {
    /// The name of the service
    pub service: String,
    /// The version of the service
    pub version: String,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            service: "devnotify".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
