//! Pull-request event handler.
//!
//! Besides the common fan-out this handler maintains thread continuity: the
//! first notification for a PR number in a chat becomes the anchor, and
//! later notifications for the same PR are sent as replies to it.

use anyhow::Result;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::repositories::{EventLogRepository, PrThreadRepository, SubscriptionRepository};
use crate::server::AppState;
use crate::webhooks::branch::branch_matches;
use crate::webhooks::classify::classify_pull_request;
use crate::webhooks::events::PullRequestEvent;

use super::html_escape;

/// Handles a `pull_request` webhook payload.
pub async fn handle(state: &AppState, payload: JsonValue) -> Result<()> {
    let event: PullRequestEvent = match serde_json::from_value(payload) {
        Ok(event) => event,
        Err(err) => {
            warn!(error = %err, "Unparseable pull_request payload, ignoring");
            return Ok(());
        }
    };

    let action = event.action.as_deref().unwrap_or_default();
    let Some(outcome) = classify_pull_request(action, event.pull_request.merged) else {
        debug!(action, "Ignoring pull_request action");
        return Ok(());
    };

    // Cannot route without a repository identifier.
    let Some(full_name) = event.repository.full_name.as_deref() else {
        debug!("pull_request payload without repository full name, ignoring");
        return Ok(());
    };

    let pr = &event.pull_request;
    let title = pr.title.as_deref().unwrap_or("(no title)");
    let author = pr.user.login.as_deref().unwrap_or("unknown");
    let base_ref = pr.base.git_ref.as_deref().unwrap_or("?");
    let head_ref = pr.head.git_ref.as_deref().unwrap_or("?");

    let mut text = format!(
        "{} {}\n📦 Repository: <code>{}</code>\n👤 Author: <code>{}</code>\n🔀 {} → {}\n📝 {}\n",
        outcome.emoji,
        outcome.label,
        html_escape(full_name),
        html_escape(author),
        html_escape(head_ref),
        html_escape(base_ref),
        html_escape(title),
    );
    if let Some(url) = pr.html_url.as_deref() {
        text.push_str(&format!("\n🔗 {}", url));
    }

    let summary = format!("PR #{} {}: {}", pr.number, outcome.subtype, title);

    let db = Arc::new(state.db.clone());
    let subscriptions = SubscriptionRepository::new(db.clone());
    let threads = PrThreadRepository::new(db.clone());
    let log_repo = EventLogRepository::new(db);

    let targets = subscriptions.active_for_repo(full_name).await?;
    if targets.is_empty() {
        return Ok(());
    }

    // Replies chain to the first message sent for this PR in this chat;
    // an opened event never replies, it starts (or re-starts) the chain.
    let replies = matches!(action, "reopened" | "closed");
    let anchors = matches!(action, "opened" | "reopened");

    for target in &targets {
        if !branch_matches(base_ref, target.subscription.branches.as_deref()) {
            continue;
        }

        let anchor = match threads
            .get_anchor(target.chat.id, target.repo.id, pr.number)
            .await
        {
            Ok(anchor) => anchor,
            Err(err) => {
                warn!(
                    chat_id = target.chat.telegram_chat_id,
                    pr = pr.number,
                    error = %err,
                    "Failed to look up thread anchor, sending unthreaded"
                );
                None
            }
        };

        let reply_to = if replies { anchor } else { None };

        match state
            .notifier
            .send(target.chat.telegram_chat_id, &text, reply_to)
            .await
        {
            Ok(message_id) => {
                metrics::counter!("notify_sends_total").increment(1);
                if anchors && anchor.is_none() {
                    if let Err(err) = threads
                        .save_anchor(target.chat.id, target.repo.id, pr.number, message_id)
                        .await
                    {
                        warn!(
                            chat_id = target.chat.telegram_chat_id,
                            pr = pr.number,
                            error = %err,
                            "Failed to save thread anchor"
                        );
                    }
                }
            }
            Err(err) => {
                metrics::counter!("notify_send_failures_total").increment(1);
                warn!(
                    chat_id = target.chat.telegram_chat_id,
                    repo = %target.repo.full_name,
                    error = %err,
                    "Failed to deliver pull_request notification"
                );
            }
        }

        if let Err(err) = log_repo
            .log_event(
                target.chat.id,
                target.repo.id,
                "pull_request",
                Some(outcome.subtype),
                Some(&summary),
                None,
            )
            .await
        {
            metrics::counter!("event_log_write_failures_total").increment(1);
            warn!(
                chat_id = target.chat.telegram_chat_id,
                error = %err,
                "Failed to write event log entry"
            );
        }
    }

    info!(
        repo = full_name,
        pr = pr.number,
        subtype = outcome.subtype,
        subscribers = targets.len(),
        "Processed pull_request event"
    );

    Ok(())
}
