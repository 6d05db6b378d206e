//! Route definitions for `/tickets`, `/surveys`, and `/announcements`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{announcements, surveys, tickets};
use crate::state::AppState;

/// Routes mounted at `/tickets`.
///
/// ```text
/// GET, POST /             -> list, create
/// GET       /{id}         -> get_by_id
/// POST      /{id}/reply   -> reply (staff)
/// POST      /{id}/status  -> set_status (staff)
/// ```
pub fn ticket_router() -> Router<AppState> {
    Router::new()
        .route("/", get(tickets::list).post(tickets::create))
        .route("/{id}", get(tickets::get_by_id))
        .route("/{id}/reply", post(tickets::reply))
        .route("/{id}/status", post(tickets::set_status))
}

/// Routes mounted at `/surveys`.
///
/// ```text
/// GET / -> list (staff)
/// ```
pub fn survey_router() -> Router<AppState> {
    Router::new().route("/", get(surveys::list))
}

/// Routes mounted at `/announcements`.
///
/// ```text
/// GET, POST     /              -> list, create (staff)
/// PUT, DELETE   /{id}          -> update, delete (staff)
/// POST          /{id}/publish  -> publish (staff)
/// ```
pub fn announcement_router() -> Router<AppState> {
    Router::new()
        .route("/", get(announcements::list).post(announcements::create))
        .route(
            "/{id}",
            put(announcements::update).delete(announcements::delete),
        )
        .route("/{id}/publish", post(announcements::publish))
}
