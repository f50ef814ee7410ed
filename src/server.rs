//! # Server Configuration
//!
//! This module contains the server setup and configuration for the devnotify
//! service.

use std::sync::Arc;

use axum::{
    Router,
    extract::Request,
    middleware::Next,
    response::Response,
    routing::{get, post},
};
use sea_orm::DatabaseConnection;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::AppConfig;
use crate::handlers;
use crate::notify::Notifier;
use crate::telemetry::{TraceContext, with_trace_context};

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<AppConfig>,
    pub notifier: Arc<dyn Notifier>,
}

/// Assigns each request a correlation id, surfaced in error responses and logs.
async fn trace_context_middleware(req: Request, next: Next) -> Response {
    let context = TraceContext {
        trace_id: format!("req-{}", &uuid::Uuid::new_v4().to_string()[..8]),
    };
    with_trace_context(context, next.run(req)).await
}

/// Creates and configures the Axum application router
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health::health))
        .route("/webhook/github", post(handlers::webhook::github_webhook))
        .layer(axum::middleware::from_fn(trace_context_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
}

/// Starts the server with the given configuration
pub async fn run_server(
    config: AppConfig,
    db: DatabaseConnection,
    notifier: Arc<dyn Notifier>,
) -> Result<(), Box<dyn std::error::Error>> {
    // Resolve the configured bind address
    let addr = config
        .bind_addr()
        .map_err(|e| format!("Invalid server address: {}", e))?;

    let profile = config.profile.clone();
    let state = AppState {
        db,
        config: Arc::new(config),
        notifier,
    };
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, %profile, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::root,
        crate::handlers::health::health,
        crate::handlers::webhook::github_webhook,
    ),
    components(
        schemas(
            crate::models::ServiceInfo,
            crate::handlers::health::HealthResponse,
            crate::handlers::webhook::WebhookAck,
        )
    ),
    info(
        title = "devnotify API",
        description = "GitHub webhook relay into Telegram chats",
        version = env!("CARGO_PKG_VERSION"),
    )
)]
pub struct ApiDoc;
