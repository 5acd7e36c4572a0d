use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::router::AdminState;
use crate::types::status::StatusReport;

/// GET /healthz -> liveness probe, never authenticated.
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok", "source": "admin-app" }))
}

/// GET /api/status -> configured endpoints plus the two reported scalars.
pub async fn status_handler(State(state): State<AdminState>) -> Json<StatusReport> {
    Json(StatusReport::from(state.config.as_ref()))
}
