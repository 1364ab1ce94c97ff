use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::state::AppState;

/// Readiness handler: pings the database when one is configured. With the
/// in-memory store there is nothing to check and the app is always ready.
pub async fn ready_handler(State(state): State<AppState>) -> impl IntoResponse {
    if let Some(db) = &state.db {
        if let Err(e) = db.ping().await {
            tracing::error!("Readiness check failed: database unreachable: {}", e);
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unavailable" })),
            );
        }
    }

    (StatusCode::OK, Json(json!({ "status": "ready" })))
}
