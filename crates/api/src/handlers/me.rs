//! Handlers for the authenticated user's own resources (`/me`).

use axum::extract::{Query, State};
use axum::Json;
use serde::Serialize;
use studiodesk_core::field_validation::{validate_max_len, validate_required};
use studiodesk_core::project_lifecycle::is_open;
use studiodesk_db::models::payment::Payment;
use studiodesk_db::models::project::Project;
use studiodesk_db::models::user::{UpdateProfile, UserResponse};
use studiodesk_db::repositories::{
    NotificationRepo, PaymentRepo, ProjectRepo, TicketRepo, UserRepo,
};

use crate::error::{not_found, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Number of payments shown on the customer dashboard.
const DASHBOARD_PAYMENT_COUNT: i64 = 5;

/// Customer dashboard summary returned by `GET /me/dashboard`.
#[derive(Debug, Serialize)]
pub struct CustomerDashboard {
    pub projects: Vec<Project>,
    pub open_project_count: usize,
    pub unread_notifications: i64,
    pub open_tickets: i64,
    pub recent_payments: Vec<Payment>,
}

/// GET /api/v1/me
pub async fn get_profile(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| not_found("User", auth.user_id))?;
    Ok(Json(UserResponse::from_user(&user, auth.role)))
}

/// PUT /api/v1/me
pub async fn update_profile(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateProfile>,
) -> AppResult<Json<UserResponse>> {
    if let Some(name) = &input.display_name {
        validate_required(name, "display_name")?;
        validate_max_len(name, 100, "display_name")?;
    }
    let user = UserRepo::update_profile(&state.pool, auth.user_id, &input)
        .await?
        .ok_or_else(|| not_found("User", auth.user_id))?;
    Ok(Json(UserResponse::from_user(&user, auth.role)))
}

/// GET /api/v1/me/payments
pub async fn my_payments(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Payment>>>> {
    let (limit, offset) = params.resolve();
    let payments =
        PaymentRepo::list(&state.pool, Some(auth.user_id), None, limit, offset).await?;
    Ok(Json(DataResponse { data: payments }))
}

/// GET /api/v1/me/dashboard
pub async fn dashboard(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<CustomerDashboard>> {
    let projects = ProjectRepo::list_for_customer(&state.pool, auth.user_id).await?;
    let unread_notifications = NotificationRepo::unread_count(&state.pool, auth.user_id).await?;
    let open_tickets = TicketRepo::count_open(&state.pool, Some(auth.user_id)).await?;
    let recent_payments =
        PaymentRepo::list_for_user(&state.pool, auth.user_id, DASHBOARD_PAYMENT_COUNT).await?;

    let open_project_count = projects.iter().filter(|p| is_open(p.status_id)).count();

    Ok(Json(CustomerDashboard {
        projects,
        open_project_count,
        unread_notifications,
        open_tickets,
        recent_payments,
    }))
}
