//! GitHub webhook endpoint handler.
//!
//! Authenticates the raw body against the configured secret, parses the JSON
//! payload and hands it to the event dispatcher. Signature failures abort
//! with 401 and malformed JSON with 400 before any handler runs; once the
//! payload is dispatched the endpoint acknowledges with `{"ok": true}`.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::debug;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::server::AppState;
use crate::webhooks::dispatch::dispatch;
use crate::webhooks::signature::verify_github_signature;

/// Webhook acknowledgement response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WebhookAck {
    /// Always true on an accepted delivery
    pub ok: bool,
}

/// Upper bound on a delivery body; the provider caps payloads at 25 MB.
const MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

/// Accept a GitHub webhook delivery
#[utoipa::path(
    post,
    path = "/webhook/github",
    params(
        ("X-GitHub-Event" = String, Header, description = "Event kind of the delivery"),
        ("X-Hub-Signature-256" = Option<String>, Header, description = "HMAC-SHA256 body signature, required when a secret is configured"),
    ),
    request_body(content = JsonValue, description = "Event payload", content_type = "application/json"),
    responses(
        (status = 200, description = "Delivery accepted", body = WebhookAck),
        (status = 400, description = "Missing event header or malformed JSON body", body = ApiError),
        (status = 401, description = "Missing or invalid signature", body = ApiError),
        (status = 413, description = "Body exceeds the delivery size limit", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "webhooks"
)]
pub async fn github_webhook(
    State(state): State<AppState>,
    req: Request,
) -> Result<Json<WebhookAck>, ApiError> {
    let headers = req.headers().clone();

    let event_kind = headers
        .get("X-GitHub-Event")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .ok_or_else(|| {
            ApiError::new(
                StatusCode::BAD_REQUEST,
                "VALIDATION_FAILED",
                "Missing X-GitHub-Event header",
            )
        })?;

    let signature = headers
        .get("X-Hub-Signature-256")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let (_parts, body) = req.into_parts();
    let body_bytes = axum::body::to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|_| {
            ApiError::new(
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                "Request body unreadable or larger than the delivery limit",
            )
        })?;

    verify_github_signature(
        state.config.webhook_github_secret.as_deref(),
        signature.as_deref(),
        &body_bytes,
    )
    .map_err(|err| {
        metrics::counter!("webhook_unauthorized_total").increment(1);
        ApiError::from(err)
    })?;

    let payload: JsonValue = serde_json::from_slice(&body_bytes).map_err(|err| {
        metrics::counter!("webhook_malformed_total").increment(1);
        ApiError::new(
            StatusCode::BAD_REQUEST,
            "VALIDATION_FAILED",
            format!("Invalid JSON body: {}", err),
        )
    })?;

    debug!(event = %event_kind, "Processing webhook delivery");

    dispatch(&state, &event_kind, payload).await?;

    Ok(Json(WebhookAck { ok: true }))
}
