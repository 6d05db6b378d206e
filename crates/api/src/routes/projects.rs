//! Route definitions for `/projects`, `/designers`, `/pause-requests`, and
//! `/vacation-requests`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{designers, pause_requests, projects, surveys, vacation_requests};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET, POST         /                       -> list, create
/// GET, PUT, DELETE  /{id}                   -> get_by_id, update, delete
/// POST              /{id}/assign-designer   -> assign_designer (staff)
/// POST              /{id}/status            -> set_status (staff)
/// GET, POST         /{id}/pause-requests    -> list_for_project, create
/// POST              /{id}/survey            -> surveys::submit (customer)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(projects::list).post(projects::create))
        .route(
            "/{id}",
            get(projects::get_by_id)
                .put(projects::update)
                .delete(projects::delete),
        )
        .route("/{id}/assign-designer", post(projects::assign_designer))
        .route("/{id}/status", post(projects::set_status))
        .route(
            "/{id}/pause-requests",
            get(pause_requests::list_for_project).post(pause_requests::create),
        )
        .route("/{id}/survey", post(surveys::submit))
}

/// Routes mounted at `/designers`.
///
/// ```text
/// GET, POST /      -> list, create (admin)
/// PUT       /{id}  -> update (admin or self)
/// ```
pub fn designer_router() -> Router<AppState> {
    Router::new()
        .route("/", get(designers::list).post(designers::create))
        .route("/{id}", put(designers::update))
}

/// Routes mounted at `/pause-requests`.
///
/// ```text
/// POST /{id}/approve -> approve (staff)
/// POST /{id}/reject  -> reject (staff)
/// POST /{id}/cancel  -> cancel (requester)
/// ```
pub fn pause_request_router() -> Router<AppState> {
    Router::new()
        .route("/{id}/approve", post(pause_requests::approve))
        .route("/{id}/reject", post(pause_requests::reject))
        .route("/{id}/cancel", post(pause_requests::cancel))
}

/// Routes mounted at `/vacation-requests`.
///
/// ```text
/// GET, POST /              -> list, create (designer)
/// POST      /{id}/approve  -> approve (staff)
/// POST      /{id}/reject   -> reject (staff)
/// ```
pub fn vacation_request_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(vacation_requests::list).post(vacation_requests::create),
        )
        .route("/{id}/approve", post(vacation_requests::approve))
        .route("/{id}/reject", post(vacation_requests::reject))
}
