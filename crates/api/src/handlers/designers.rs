//! Handlers for the `/designers` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use studiodesk_core::error::CoreError;
use studiodesk_core::field_validation::{validate_max_len, validate_required};
use studiodesk_core::roles::ROLE_DESIGNER;
use studiodesk_core::types::DbId;
use studiodesk_db::models::designer::{CreateDesigner, Designer, DesignerWithLoad, UpdateDesigner};
use studiodesk_db::repositories::{DesignerRepo, RoleRepo, UserRepo};

use crate::error::{not_found, AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/designers
///
/// All designers with their current open project count.
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<DesignerWithLoad>>>> {
    let designers = DesignerRepo::list_with_load(&state.pool).await?;
    Ok(Json(DataResponse { data: designers }))
}

/// POST /api/v1/designers
///
/// Create the designer profile for a user who already holds the designer role.
pub async fn create(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateDesigner>,
) -> AppResult<(StatusCode, Json<Designer>)> {
    validate_required(&input.display_name, "display_name")?;
    validate_max_len(&input.display_name, 100, "display_name")?;
    validate_capacity(input.max_active_projects)?;

    UserRepo::find_by_id(&state.pool, input.user_id)
        .await?
        .ok_or_else(|| not_found("User", input.user_id))?;

    let role = RoleRepo::role_name_for_user(&state.pool, input.user_id).await?;
    if role.as_deref() != Some(ROLE_DESIGNER) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "User {} does not hold the designer role",
            input.user_id
        ))));
    }

    let designer = DesignerRepo::create(&state.pool, &input).await?;
    tracing::info!(designer_id = designer.id, user_id = designer.user_id, "Designer created");
    Ok((StatusCode::CREATED, Json(designer)))
}

/// PUT /api/v1/designers/{id}
///
/// Admins may edit any designer. A designer may edit their own profile but
/// not their capacity.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDesigner>,
) -> AppResult<Json<Designer>> {
    let designer = DesignerRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Designer", id))?;

    let is_self = designer.user_id == auth.user_id;
    if !auth.is_admin() && !is_self {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only admins or the designer may edit this profile".into(),
        )));
    }
    if !auth.is_admin() && input.max_active_projects.is_some() {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only admins may change designer capacity".into(),
        )));
    }

    if let Some(name) = &input.display_name {
        validate_required(name, "display_name")?;
        validate_max_len(name, 100, "display_name")?;
    }
    validate_capacity(input.max_active_projects)?;

    let designer = DesignerRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Designer", id))?;
    Ok(Json(designer))
}

fn validate_capacity(max_active_projects: Option<i32>) -> Result<(), CoreError> {
    match max_active_projects {
        Some(max) if max < 1 => Err(CoreError::Validation(format!(
            "max_active_projects must be at least 1, got {max}"
        ))),
        _ => Ok(()),
    }
}
