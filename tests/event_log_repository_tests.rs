//! Integration tests for the event log and its digest window query.

use anyhow::Result;
use chrono::{Duration, Utc};
use devnotify::repositories::EventLogRepository;

#[path = "test_utils/mod.rs"]
mod test_utils;
use test_utils::{seed_subscription, setup_test_db_arc};

#[tokio::test]
async fn digest_returns_window_entries_in_ascending_order() -> Result<()> {
    let db = setup_test_db_arc().await?;
    let (chat, repo) = seed_subscription(&db, 100, "acme/widgets", None).await?;
    let log = EventLogRepository::new(db.clone());

    let now = Utc::now();
    log.log_event(
        chat.id,
        repo.id,
        "push",
        Some("push"),
        Some("push to main: 2 commits"),
        Some(now - Duration::hours(48)),
    )
    .await?;
    log.log_event(
        chat.id,
        repo.id,
        "pull_request",
        Some("opened"),
        Some("PR #7 opened: Add feature"),
        Some(now - Duration::hours(3)),
    )
    .await?;
    log.log_event(
        chat.id,
        repo.id,
        "workflow_run",
        Some("success"),
        Some("workflow CI on main: success"),
        Some(now - Duration::hours(1)),
    )
    .await?;

    let digest = log.digest_since(chat.id, 24).await?;
    assert_eq!(digest.len(), 2);
    assert_eq!(digest[0].event_type, "pull_request");
    assert_eq!(digest[1].event_type, "workflow_run");
    assert!(digest[0].timestamp < digest[1].timestamp);
    assert_eq!(digest[0].repo_full_name, "acme/widgets");
    assert_eq!(digest[1].event_subtype.as_deref(), Some("success"));
    Ok(())
}

#[tokio::test]
async fn digest_is_scoped_to_one_chat() -> Result<()> {
    let db = setup_test_db_arc().await?;
    let (chat_a, repo) = seed_subscription(&db, 100, "acme/widgets", None).await?;
    let (chat_b, _) = seed_subscription(&db, 200, "acme/widgets", None).await?;
    let log = EventLogRepository::new(db.clone());

    log.log_event(chat_a.id, repo.id, "push", Some("push"), None, None)
        .await?;
    log.log_event(chat_b.id, repo.id, "push", Some("push"), None, None)
        .await?;
    log.log_event(chat_b.id, repo.id, "pull_request", Some("merged"), None, None)
        .await?;

    assert_eq!(log.digest_since(chat_a.id, 24).await?.len(), 1);
    assert_eq!(log.digest_since(chat_b.id, 24).await?.len(), 2);
    Ok(())
}

#[tokio::test]
async fn digest_is_empty_without_recent_activity() -> Result<()> {
    let db = setup_test_db_arc().await?;
    let (chat, repo) = seed_subscription(&db, 100, "acme/widgets", None).await?;
    let log = EventLogRepository::new(db.clone());

    log.log_event(
        chat.id,
        repo.id,
        "push",
        Some("push"),
        None,
        Some(Utc::now() - Duration::hours(30)),
    )
    .await?;

    assert!(log.digest_since(chat.id, 24).await?.is_empty());
    Ok(())
}
