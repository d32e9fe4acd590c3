use axum::{extract::State, Json};
use tracing::warn;

use crate::api::{error::ApiError, state::AppState, types::*};

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let db = match &state.teams {
        None => "disabled",
        Some(store) => match store.ping().await {
            Ok(()) => "connected",
            Err(e) => {
                warn!("Health check database ping failed: {}", e);
                "unreachable"
            }
        },
    };

    let status = if db == "unreachable" { "degraded" } else { "ok" };

    Json(HealthResponse {
        status: status.to_string(),
        db: db.to_string(),
        uptime_secs: state.uptime_seconds(),
    })
}

/// Fallback for unknown routes
pub async fn not_found() -> ApiError {
    ApiError::NotFound("Endpoint not found".to_string())
}
