//! Health check handler.

use axum::extract::State;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db;
use crate::server::AppState;

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Overall service status
    pub status: String,
    /// Database connectivity status
    pub database: String,
}

/// Liveness probe that also pings the database.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match db::health_check(&state.db).await {
        Ok(()) => "ok".to_string(),
        Err(err) => {
            tracing::warn!(error = %err, "Database health check failed");
            "unavailable".to_string()
        }
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        database,
    })
}
