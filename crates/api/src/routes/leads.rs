//! Route definitions for `/leads`, `/quotes`, `/payment-requests`, and the
//! public `/pay` link endpoints.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{leads, payment_requests};
use crate::state::AppState;

/// Routes mounted at `/leads`.
///
/// ```text
/// POST     /              -> submit (public)
/// GET      /              -> list (staff)
/// GET, PUT /{id}          -> get_by_id, update (staff)
/// POST     /{id}/status   -> set_status (staff)
/// GET,POST /{id}/quotes   -> list_quotes, create_quote (staff)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(leads::list).post(leads::submit))
        .route("/{id}", get(leads::get_by_id).put(leads::update))
        .route("/{id}/status", post(leads::set_status))
        .route(
            "/{id}/quotes",
            get(leads::list_quotes).post(leads::create_quote),
        )
}

/// Routes mounted at `/quotes`.
///
/// ```text
/// POST /{id}/payment-requests -> issue (staff)
/// ```
pub fn quote_router() -> Router<AppState> {
    Router::new().route("/{id}/payment-requests", post(payment_requests::issue))
}

/// Routes mounted at `/payment-requests`.
///
/// ```text
/// GET  /             -> list (staff)
/// POST /{id}/cancel  -> cancel (staff)
/// ```
pub fn payment_request_router() -> Router<AppState> {
    Router::new()
        .route("/", get(payment_requests::list))
        .route("/{id}/cancel", post(payment_requests::cancel))
}

/// Routes mounted at `/pay`. Public; the token is the credential.
///
/// ```text
/// GET  /{token}          -> view
/// POST /{token}/complete -> complete
/// ```
pub fn pay_router() -> Router<AppState> {
    Router::new()
        .route("/{token}", get(payment_requests::view))
        .route("/{token}/complete", post(payment_requests::complete))
}
