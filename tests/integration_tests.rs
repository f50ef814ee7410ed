//! Basic integration tests for the devnotify HTTP surface.

use std::net::SocketAddr;
use std::sync::Arc;

use reqwest::Client;
use serde_json::Value;
use tokio::net::TcpListener;

use devnotify::config::AppConfig;
use devnotify::server::{AppState, create_app};

#[path = "test_utils/mod.rs"]
mod test_utils;
use test_utils::{RecordingNotifier, setup_test_db};

/// Starts the app on a random port and returns its base URL.
async fn start_test_server() -> String {
    let db = setup_test_db().await.expect("test db");
    let state = AppState {
        db,
        config: Arc::new(AppConfig::default()),
        notifier: Arc::new(RecordingNotifier::new()),
    };
    let app = create_app(state);

    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn root_endpoint_reports_service_info() {
    let url = start_test_server().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/", url))
        .send()
        .await
        .expect("request succeeds");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("valid JSON");
    assert_eq!(body["service"], "devnotify");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn health_endpoint_reports_database_status() {
    let url = start_test_server().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/health", url))
        .send()
        .await
        .expect("request succeeds");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("valid JSON");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let url = start_test_server().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/openapi.json", url))
        .send()
        .await
        .expect("request succeeds");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("valid JSON");
    assert!(body.get("openapi").is_some());
    assert_eq!(body["info"]["title"], "devnotify API");
}
