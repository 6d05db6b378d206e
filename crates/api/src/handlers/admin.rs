//! Admin-only user and role management, plus the staff dashboard.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use studiodesk_core::error::CoreError;
use studiodesk_core::roles::is_known_role;
use studiodesk_core::types::DbId;
use studiodesk_db::models::dashboard::AdminDashboardCounts;
use studiodesk_db::models::lead::LeadStatusCount;
use studiodesk_db::models::role::Role;
use studiodesk_db::models::user::UserResponse;
use studiodesk_db::repositories::{DashboardRepo, LeadRepo, RoleRepo, SessionRepo, UserRepo};

use crate::error::{not_found, AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireStaff};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `PUT /admin/users/{id}/role`.
#[derive(Debug, Deserialize)]
pub struct AssignRoleInput {
    pub role: String,
}

/// Staff dashboard returned by `GET /admin/dashboard`.
#[derive(Debug, Serialize)]
pub struct AdminDashboard {
    #[serde(flatten)]
    pub counts: AdminDashboardCounts,
    pub leads_by_status: Vec<LeadStatusCount>,
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/users
pub async fn list_users(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let users = UserRepo::list_with_roles(&state.pool).await?;
    let data = users
        .iter()
        .map(|u| UserResponse::from_user(&u.user, u.role.clone().unwrap_or_default()))
        .collect();
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/admin/users/{id}
pub async fn get_user(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("User", id))?;
    let role = RoleRepo::role_name_for_user(&state.pool, id)
        .await?
        .unwrap_or_default();
    Ok(Json(UserResponse::from_user(&user, role)))
}

/// PUT /api/v1/admin/users/{id}/role
///
/// Replace the user's role. The user's sessions are revoked so the new role
/// applies from their next login; an access token already issued keeps its
/// old role claim until it expires.
pub async fn assign_role(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<AssignRoleInput>,
) -> AppResult<Json<UserResponse>> {
    let role_name = input.role.trim().to_lowercase();
    if !is_known_role(&role_name) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unknown role '{role_name}'"
        ))));
    }
    if id == admin.user_id && role_name != admin.role {
        return Err(AppError::Core(CoreError::Forbidden(
            "Admins cannot change their own role".into(),
        )));
    }

    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("User", id))?;
    let role = RoleRepo::find_by_name(&state.pool, &role_name)
        .await?
        .ok_or_else(|| AppError::InternalError(format!("Role '{role_name}' is not seeded")))?;

    RoleRepo::assign(&state.pool, id, role.id, Some(admin.user_id)).await?;
    SessionRepo::revoke_all_for_user(&state.pool, id).await?;

    tracing::info!(user_id = id, role = %role.name, by = admin.user_id, "Role assigned");
    Ok(Json(UserResponse::from_user(&user, role.name)))
}

/// POST /api/v1/admin/users/{id}/deactivate
///
/// Returns 204 No Content. Admins cannot deactivate themselves.
pub async fn deactivate_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if id == admin.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Admins cannot deactivate themselves".into(),
        )));
    }
    if !UserRepo::deactivate(&state.pool, id).await? {
        return Err(not_found("User", id));
    }
    SessionRepo::revoke_all_for_user(&state.pool, id).await?;

    tracing::info!(user_id = id, by = admin.user_id, "User deactivated");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Roles
// ---------------------------------------------------------------------------

/// GET /api/v1/roles
pub async fn list_roles(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Role>>>> {
    let roles = RoleRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: roles }))
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/dashboard
pub async fn dashboard(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
) -> AppResult<Json<AdminDashboard>> {
    let counts = DashboardRepo::admin_counts(&state.pool).await?;
    let leads_by_status = LeadRepo::count_by_status(&state.pool).await?;
    Ok(Json(AdminDashboard {
        counts,
        leads_by_status,
    }))
}
