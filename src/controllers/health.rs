use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::infrastructure::repositories::ProfileStore;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

pub async fn health_ready(State(store): State<Arc<dyn ProfileStore>>) -> impl IntoResponse {
    match store.ping().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "store": "connected"
            })),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "not_ready",
                    "store": "disconnected"
                })),
            )
        }
    }
}
