use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::api::AppState;

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let database = match state.db.ping() {
        Ok(()) => "healthy".to_string(),
        Err(e) => format!("unhealthy: {e}"),
    };
    let status = if database == "healthy" { "healthy" } else { "unhealthy" };

    Json(json!({
        "status": status,
        "service": "repolens",
        "version": env!("CARGO_PKG_VERSION"),
        "build_timestamp": env!("BUILD_TIMESTAMP"),
        "commit": option_env!("GIT_HASH"),
        "database": database,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

pub async fn liveness_check() -> Json<Value> {
    Json(json!({"status": "alive"}))
}

pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match state.db.ping() {
        Ok(()) => Ok(Json(json!({"status": "ready"}))),
        Err(e) => Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({"error": format!("Service not ready: {e}")})),
        )),
    }
}
