pub mod admin;
pub mod auth;
pub mod engagement;
pub mod health;
pub mod leads;
pub mod me;
pub mod notifications;
pub mod payments;
pub mod projects;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                        register (public)
/// /auth/login                           login (public)
/// /auth/refresh                         refresh (public)
/// /auth/logout                          logout (requires auth)
///
/// /me                                   profile get, update
/// /me/payments                          own payments
/// /me/dashboard                         customer summary
///
/// /leads                                submit (public), list (staff)
/// /leads/{id}                           get, update (staff)
/// /leads/{id}/status                    transition (staff)
/// /leads/{id}/quotes                    list, create (staff)
/// /quotes/{id}/payment-requests         issue link (staff)
/// /payment-requests                     list (staff)
/// /payment-requests/{id}/cancel         cancel (staff)
/// /pay/{token}                          view link (public)
/// /pay/{token}/complete                 pay (public)
///
/// /payments                             list, record (staff)
/// /payments/{id}/refund                 refund (staff)
///
/// /designers                            list, create (admin)
/// /designers/{id}                       update (admin or self)
///
/// /projects                             list (by role), create (staff)
/// /projects/{id}                        get, update, delete
/// /projects/{id}/assign-designer        assign (staff)
/// /projects/{id}/status                 transition (staff)
/// /projects/{id}/pause-requests         list, create (customer)
/// /projects/{id}/survey                 submit (customer)
/// /pause-requests/{id}/approve          approve (staff)
/// /pause-requests/{id}/reject           reject (staff)
/// /pause-requests/{id}/cancel           cancel (requester)
///
/// /vacation-requests                    list, create (designer)
/// /vacation-requests/{id}/approve       approve (staff)
/// /vacation-requests/{id}/reject        reject (staff)
///
/// /notifications                        list
/// /notifications/unread-count           count
/// /notifications/{id}/read              mark read
/// /notifications/read-all               mark all read
///
/// /tickets                              list, create
/// /tickets/{id}                         get
/// /tickets/{id}/reply                   reply (staff)
/// /tickets/{id}/status                  transition (staff)
/// /surveys                              list with average (staff)
/// /announcements                        list, create (staff)
/// /announcements/{id}                   update, delete (staff)
/// /announcements/{id}/publish           publish (staff)
///
/// /admin/users                          list (admin)
/// /admin/users/{id}                     get (admin)
/// /admin/users/{id}/role                assign role (admin)
/// /admin/users/{id}/deactivate          deactivate (admin)
/// /admin/dashboard                      staff counts
/// /roles                                list roles
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/me", me::router())
        .nest("/leads", leads::router())
        .nest("/quotes", leads::quote_router())
        .nest("/payment-requests", leads::payment_request_router())
        .nest("/pay", leads::pay_router())
        .nest("/payments", payments::router())
        .nest("/designers", projects::designer_router())
        .nest("/projects", projects::router())
        .nest("/pause-requests", projects::pause_request_router())
        .nest("/vacation-requests", projects::vacation_request_router())
        .nest("/notifications", notifications::router())
        .nest("/tickets", engagement::ticket_router())
        .nest("/surveys", engagement::survey_router())
        .nest("/announcements", engagement::announcement_router())
        .nest("/admin", admin::router())
        .nest("/roles", admin::role_router())
}
