//! Route definitions for the `/payments` resource (staff only).

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::payments;
use crate::state::AppState;

/// Routes mounted at `/payments`.
///
/// ```text
/// GET, POST /             -> list, record
/// POST      /{id}/refund  -> refund
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(payments::list).post(payments::record))
        .route("/{id}/refund", post(payments::refund))
}
