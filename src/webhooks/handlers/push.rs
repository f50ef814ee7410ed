//! Push event handler.
//!
//! Pushes never thread or reply; each matching subscriber gets one message
//! summarizing the pushed commits.

use anyhow::Result;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::repositories::SubscriptionRepository;
use crate::server::AppState;
use crate::webhooks::events::{PushEvent, branch_from_ref, short_sha};
use crate::webhooks::handlers::{fan_out, first_line, html_escape};

/// How many commits are rendered in detail before the list is elided.
const MAX_RENDERED_COMMITS: usize = 5;

/// Handles a `push` webhook payload.
pub async fn handle(state: &AppState, payload: JsonValue) -> Result<()> {
    let event: PushEvent = match serde_json::from_value(payload) {
        Ok(event) => event,
        Err(err) => {
            warn!(error = %err, "Unparseable push payload, ignoring");
            return Ok(());
        }
    };

    let Some(full_name) = event.repository.full_name.as_deref() else {
        debug!("push payload without repository full name, ignoring");
        return Ok(());
    };

    let branch = branch_from_ref(event.git_ref.as_deref().unwrap_or(""));
    let pusher = event.pusher.name.as_deref().unwrap_or("unknown");

    let count_line = match event.commits.len() {
        0 => "No new commits".to_string(),
        1 => "1 new commit:".to_string(),
        n => format!("{} new commits:", n),
    };

    let mut text = format!(
        "📤 Push to <code>{}</code>\n🌿 Branch: <code>{}</code>{}\n👤 Pusher: <code>{}</code>\n{}\n",
        html_escape(full_name),
        html_escape(&branch),
        if event.forced { " (force-push)" } else { "" },
        html_escape(pusher),
        count_line,
    );

    for commit in event.commits.iter().take(MAX_RENDERED_COMMITS) {
        let sha = commit.id.as_deref().map(short_sha).unwrap_or("???????");
        let message = commit.message.as_deref().map(first_line).unwrap_or("");
        let author = commit.author.name.as_deref().unwrap_or("unknown");
        text.push_str(&format!(
            "• <code>{}</code> {} ({})\n",
            sha,
            html_escape(message),
            html_escape(author),
        ));
    }
    if event.commits.len() > MAX_RENDERED_COMMITS {
        text.push_str(&format!(
            "… and {} more\n",
            event.commits.len() - MAX_RENDERED_COMMITS
        ));
    }

    let summary = format!(
        "push to {}: {}",
        branch,
        match event.commits.len() {
            0 => "no new commits".to_string(),
            1 => "1 commit".to_string(),
            n => format!("{} commits", n),
        }
    );

    let subscriptions = SubscriptionRepository::new(Arc::new(state.db.clone()));
    let targets = subscriptions.active_for_repo(full_name).await?;
    if targets.is_empty() {
        return Ok(());
    }

    fan_out(state, &targets, &branch, &text, "push", "push", &summary).await;

    info!(
        repo = full_name,
        branch = %branch,
        commits = event.commits.len(),
        subscribers = targets.len(),
        "Processed push event"
    );

    Ok(())
}
