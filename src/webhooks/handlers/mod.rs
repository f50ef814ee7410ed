//! Event handlers: interpret a payload, render a notification, fan out to
//! matching subscribers and log each delivery.
//!
//! Fan-out treats every subscriber as an isolated unit: a failed send or a
//! failed log write is captured and counted, never propagated, so one slow
//! or broken recipient cannot abort delivery to the others. The send and the
//! log write are independent of each other as well.

use tracing::warn;

use crate::repositories::{EventLogRepository, SubscriptionTarget};
use crate::server::AppState;

use super::branch::branch_matches;

pub mod pull_request;
pub mod push;
pub mod workflow_run;

/// Escapes text interpolated into HTML-formatted notification bodies.
pub(crate) fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Delivers one rendered notification to every subscriber whose filter
/// matches `branch`, logging each delivery. Used by the handlers without
/// thread semantics (push, workflow_run).
pub(super) async fn fan_out(
    state: &AppState,
    targets: &[SubscriptionTarget],
    branch: &str,
    text: &str,
    event_type: &str,
    event_subtype: &str,
    summary: &str,
) {
    let log_repo = EventLogRepository::new(std::sync::Arc::new(state.db.clone()));

    for target in targets {
        if !branch_matches(branch, target.subscription.branches.as_deref()) {
            continue;
        }

        if let Err(err) = state
            .notifier
            .send(target.chat.telegram_chat_id, text, None)
            .await
        {
            metrics::counter!("notify_send_failures_total").increment(1);
            warn!(
                chat_id = target.chat.telegram_chat_id,
                repo = %target.repo.full_name,
                error = %err,
                "Failed to deliver notification to subscriber"
            );
        } else {
            metrics::counter!("notify_sends_total").increment(1);
        }

        // Logged regardless of send outcome; the two failures are independent.
        if let Err(err) = log_repo
            .log_event(
                target.chat.id,
                target.repo.id,
                event_type,
                Some(event_subtype),
                Some(summary),
                None,
            )
            .await
        {
            metrics::counter!("event_log_write_failures_total").increment(1);
            warn!(
                chat_id = target.chat.telegram_chat_id,
                repo = %target.repo.full_name,
                error = %err,
                "Failed to write event log entry"
            );
        }
    }
}

/// Truncates a commit message to its first line.
pub(crate) fn first_line(message: &str) -> &str {
    message.lines().next().unwrap_or("")
}
