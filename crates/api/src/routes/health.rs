use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Readiness report for the portal backend.
///
/// `status` is `ok` when everything works, `degraded` when the API answers
/// but nothing is turning events into notifications, and `unavailable` when
/// the database cannot be reached.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Round trip of the `SELECT 1`, absent when it failed.
    pub db_latency_ms: Option<u64>,
    /// Whether the notification writer is subscribed to the event bus.
    pub notifications_running: bool,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let started = Instant::now();
    let db_latency_ms = match studiodesk_db::health_check(&state.pool).await {
        Ok(()) => Some(u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)),
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach the database");
            None
        }
    };
    let db_healthy = db_latency_ms.is_some();
    let notifications_running = state.event_bus.subscriber_count() > 0;

    let (code, status) = match (db_healthy, notifications_running) {
        (false, _) => (StatusCode::SERVICE_UNAVAILABLE, "unavailable"),
        (true, false) => (StatusCode::OK, "degraded"),
        (true, true) => (StatusCode::OK, "ok"),
    };

    (
        code,
        Json(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
            db_healthy,
            db_latency_ms,
            notifications_running,
        }),
    )
}

/// Mounted at the root, outside `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
