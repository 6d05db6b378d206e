//! Route definitions for the `/me` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::me;
use crate::state::AppState;

/// Routes mounted at `/me`. All require auth.
///
/// ```text
/// GET, PUT /           -> get_profile, update_profile
/// GET      /payments   -> my_payments
/// GET      /dashboard  -> dashboard
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(me::get_profile).put(me::update_profile))
        .route("/payments", get(me::my_payments))
        .route("/dashboard", get(me::dashboard))
}
