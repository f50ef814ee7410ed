//! Event log repository for database operations
//!
//! The event log is append-only; the only read path is the trailing
//! time-window digest query.

use anyhow::{Result, anyhow};
use chrono::{DateTime, Duration, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;

use crate::models::event_log::{self, Entity as EventLog};
use crate::models::repo;

/// One digest line: a logged event joined with its repository full name.
#[derive(Debug, Clone)]
pub struct DigestEntry {
    pub timestamp: DateTime<Utc>,
    pub event_type: String,
    pub event_subtype: Option<String>,
    pub payload_summary: Option<String>,
    pub repo_full_name: String,
}

/// Repository for event log database operations
#[derive(Debug, Clone)]
pub struct EventLogRepository {
    /// Database connection pool
    pub db: Arc<DatabaseConnection>,
}

impl EventLogRepository {
    /// Creates a new EventLogRepository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Appends one delivered-notification record.
    ///
    /// The timestamp defaults to the current UTC time when not provided.
    pub async fn log_event(
        &self,
        chat_id: i32,
        repo_id: i32,
        event_type: &str,
        event_subtype: Option<&str>,
        payload_summary: Option<&str>,
        timestamp: Option<DateTime<Utc>>,
    ) -> Result<()> {
        let ts = timestamp.unwrap_or_else(Utc::now);

        let entry = event_log::ActiveModel {
            chat_id: Set(chat_id),
            repo_id: Set(repo_id),
            event_type: Set(event_type.to_string()),
            event_subtype: Set(event_subtype.map(|s| s.to_string())),
            timestamp: Set(ts.into()),
            payload_summary: Set(payload_summary.map(|s| s.to_string())),
            ..Default::default()
        };

        entry.insert(self.db.as_ref()).await?;
        Ok(())
    }

    /// Returns all log entries for a chat within the trailing `hours` window,
    /// ascending by timestamp, joined with the repository full name.
    pub async fn digest_since(&self, chat_id: i32, hours: i64) -> Result<Vec<DigestEntry>> {
        let since = Utc::now() - Duration::hours(hours);

        let rows = EventLog::find()
            .filter(event_log::Column::ChatId.eq(chat_id))
            .filter(event_log::Column::Timestamp.gte(since))
            .order_by_asc(event_log::Column::Timestamp)
            .find_also_related(repo::Entity)
            .all(self.db.as_ref())
            .await?;

        let mut entries = Vec::with_capacity(rows.len());
        for (entry, repo) in rows {
            let repo = repo.ok_or_else(|| anyhow!("event log {} has no repo row", entry.id))?;
            entries.push(DigestEntry {
                timestamp: entry.timestamp.with_timezone(&Utc),
                event_type: entry.event_type,
                event_subtype: entry.event_subtype,
                payload_summary: entry.payload_summary,
                repo_full_name: repo.full_name,
            });
        }

        Ok(entries)
    }
}
