//! Event-kind dispatch.
//!
//! Routes an authenticated, parsed webhook payload to the handler for its
//! event kind. Unknown kinds are accepted and ignored; the provider sends
//! many kinds this service does not act on.

use anyhow::Result;
use serde_json::Value as JsonValue;
use tracing::debug;

use super::handlers::{pull_request, push, workflow_run};
use crate::server::AppState;

/// Invokes the handler registered for `event_kind`, if any.
pub async fn dispatch(state: &AppState, event_kind: &str, payload: JsonValue) -> Result<()> {
    metrics::counter!("webhook_events_total", "event" => event_kind.to_string()).increment(1);

    match event_kind {
        "pull_request" => pull_request::handle(state, payload).await,
        "push" => push::handle(state, payload).await,
        "workflow_run" => workflow_run::handle(state, payload).await,
        other => {
            debug!(event = other, "Ignoring unhandled webhook event kind");
            Ok(())
        }
    }
}
