//! Integration tests for the Telegram notifier against a mocked Bot API.

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use devnotify::config::AppConfig;
use devnotify::notify::{Notifier, NotifyError, TelegramNotifier};

fn notifier_for(server: &MockServer, token: Option<&str>) -> TelegramNotifier {
    let config = AppConfig {
        telegram_bot_token: token.map(str::to_string),
        telegram_api_base: server.uri(),
        ..AppConfig::default()
    };
    TelegramNotifier::from_config(&config).expect("client builds")
}

#[tokio::test]
async fn send_posts_html_message_and_returns_message_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bot123:abc/sendMessage"))
        .and(body_partial_json(json!({
            "chat_id": 100,
            "parse_mode": "HTML",
            "disable_web_page_preview": true,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "result": {"message_id": 42},
        })))
        .expect(1)
        .mount(&server)
        .await;

    let notifier = notifier_for(&server, Some("123:abc"));
    let message_id = notifier
        .send(100, "<b>hello</b>", None)
        .await
        .expect("send succeeds");
    assert_eq!(message_id, 42);
}

#[tokio::test]
async fn send_threads_replies_through_reply_to_message_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bot123:abc/sendMessage"))
        .and(body_partial_json(json!({"reply_to_message_id": 42})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "result": {"message_id": 43},
        })))
        .expect(1)
        .mount(&server)
        .await;

    let notifier = notifier_for(&server, Some("123:abc"));
    let message_id = notifier.send(100, "reply", Some(42)).await.unwrap();
    assert_eq!(message_id, 43);
}

#[tokio::test]
async fn api_rejection_surfaces_the_description() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bot123:abc/sendMessage"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "ok": false,
            "description": "Forbidden: bot was kicked from the group chat",
        })))
        .mount(&server)
        .await;

    let notifier = notifier_for(&server, Some("123:abc"));
    let err = notifier.send(100, "hello", None).await.unwrap_err();
    match err {
        NotifyError::Api { description } => {
            assert!(description.contains("kicked"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn missing_token_fails_without_touching_the_network() {
    let server = MockServer::start().await;
    // No mock mounted; any request would 404 and fail differently.

    let notifier = notifier_for(&server, None);
    let err = notifier.send(100, "hello", None).await.unwrap_err();
    assert!(matches!(err, NotifyError::NotConfigured));
}
