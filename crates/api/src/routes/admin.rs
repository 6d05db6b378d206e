//! Route definitions for `/admin` and `/roles`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET   /users                  -> list_users (admin)
/// GET   /users/{id}             -> get_user (admin)
/// PUT   /users/{id}/role        -> assign_role (admin)
/// POST  /users/{id}/deactivate  -> deactivate_user (admin)
/// GET   /dashboard              -> dashboard (staff)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(admin::list_users))
        .route("/users/{id}", get(admin::get_user))
        .route("/users/{id}/role", put(admin::assign_role))
        .route("/users/{id}/deactivate", post(admin::deactivate_user))
        .route("/dashboard", get(admin::dashboard))
}

/// Routes mounted at `/roles`.
///
/// ```text
/// GET / -> list_roles
/// ```
pub fn role_router() -> Router<AppState> {
    Router::new().route("/", get(admin::list_roles))
}
