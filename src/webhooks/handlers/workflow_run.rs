//! Workflow-run (CI) event handler.
//!
//! Notifies on every status transition the provider reports; the marker and
//! logged subtype come from the classification table. No thread semantics.

use anyhow::Result;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::repositories::SubscriptionRepository;
use crate::server::AppState;
use crate::webhooks::classify::classify_workflow_run;
use crate::webhooks::events::{WorkflowRunEvent, short_sha};
use crate::webhooks::handlers::{fan_out, first_line, html_escape};

/// Handles a `workflow_run` webhook payload.
pub async fn handle(state: &AppState, payload: JsonValue) -> Result<()> {
    let event: WorkflowRunEvent = match serde_json::from_value(payload) {
        Ok(event) => event,
        Err(err) => {
            warn!(error = %err, "Unparseable workflow_run payload, ignoring");
            return Ok(());
        }
    };

    let Some(full_name) = event.repository.full_name.as_deref() else {
        debug!("workflow_run payload without repository full name, ignoring");
        return Ok(());
    };

    let run = &event.workflow_run;
    let status = run.status.as_deref().unwrap_or("unknown");
    let outcome = classify_workflow_run(status, run.conclusion.as_deref());

    let name = run.name.as_deref().unwrap_or("workflow");
    let branch = run.head_branch.as_deref().unwrap_or("");
    let sha = run.head_sha.as_deref().map(short_sha).unwrap_or("???????");
    let (message, author) = match &run.head_commit {
        Some(commit) => (
            commit.message.as_deref().map(first_line).unwrap_or(""),
            commit.author.name.as_deref().unwrap_or("unknown"),
        ),
        None => ("", "unknown"),
    };

    let mut text = format!(
        "{} Workflow <b>{}</b>: {}\n📦 Repository: <code>{}</code>\n🌿 Branch: <code>{}</code>\n🔨 <code>{}</code> {} ({})\n",
        outcome.emoji,
        html_escape(name),
        outcome.subtype,
        html_escape(full_name),
        html_escape(branch),
        sha,
        html_escape(message),
        html_escape(author),
    );
    if let Some(url) = run.html_url.as_deref() {
        text.push_str(&format!("\n🔗 {}", url));
    }

    let summary = format!("workflow {} on {}: {}", name, branch, outcome.subtype);

    let subscriptions = SubscriptionRepository::new(Arc::new(state.db.clone()));
    let targets = subscriptions.active_for_repo(full_name).await?;
    if targets.is_empty() {
        return Ok(());
    }

    fan_out(
        state,
        &targets,
        branch,
        &text,
        "workflow_run",
        &outcome.subtype,
        &summary,
    )
    .await;

    info!(
        repo = full_name,
        workflow = name,
        subtype = %outcome.subtype,
        subscribers = targets.len(),
        "Processed workflow_run event"
    );

    Ok(())
}
