//! Health check endpoints
//!
//! `/health` answers as long as the process is up; `/health/db` runs the
//! database liveness probe.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use ferrestock_core::test_connection;

use crate::http::AppState;

/// Health check router
pub fn create_health_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/db", get(database_health))
}

/// Basic health check (always returns OK if server is running)
pub async fn health_check() -> impl IntoResponse {
    "OK"
}

/// 200 with the report when `SELECT 1` succeeds, 503 with the report otherwise
pub async fn database_health(State(state): State<AppState>) -> impl IntoResponse {
    let report = test_connection(&state.db).await;
    let status = if report.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(report))
}
