//! Handlers for the `/projects` resource.
//!
//! Staff see every project, designers see the projects assigned to them, and
//! customers see their own.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use studiodesk_core::error::CoreError;
use studiodesk_core::field_validation::{validate_max_len, validate_required};
use studiodesk_core::project_lifecycle::{
    self, is_open, state_machine::status_name, validate_designer_capacity,
};
use studiodesk_core::roles::{ROLE_CUSTOMER, ROLE_DESIGNER};
use studiodesk_core::types::{Date, DbId, StatusId};
use studiodesk_db::models::project::{CreateProject, Project, UpdateProject};
use studiodesk_db::models::status::ProjectStatus;
use studiodesk_db::repositories::{DesignerRepo, ProjectRepo, RoleRepo, UserRepo};
use studiodesk_events::{event_types, PlatformEvent};

use crate::error::{not_found, status_moved, AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /projects`. Filters apply to staff listings.
#[derive(Debug, Deserialize)]
pub struct ProjectListQuery {
    pub status_id: Option<StatusId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Request body for `POST /projects/{id}/assign-designer`.
#[derive(Debug, Deserialize)]
pub struct AssignDesignerInput {
    pub designer_id: DbId,
}

/// Request body for `POST /projects/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct ProjectStatusInput {
    pub status_id: StatusId,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/projects
pub async fn create(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    validate_required(&input.title, "title")?;
    validate_max_len(&input.title, 200, "title")?;
    validate_schedule(input.start_date, input.end_date)?;

    UserRepo::find_by_id(&state.pool, input.customer_id)
        .await?
        .ok_or_else(|| not_found("User", input.customer_id))?;
    let role = RoleRepo::role_name_for_user(&state.pool, input.customer_id).await?;
    if role.as_deref() != Some(ROLE_CUSTOMER) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "User {} is not a customer",
            input.customer_id
        ))));
    }

    let project = ProjectRepo::create(&state.pool, &input).await?;
    tracing::info!(
        project_id = project.id,
        customer_id = project.customer_id,
        by = staff.user_id,
        "Project created"
    );
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/v1/projects
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ProjectListQuery>,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let projects = if auth.is_staff() {
        let (limit, offset) = PaginationParams {
            limit: params.limit,
            offset: params.offset,
        }
        .resolve();
        ProjectRepo::list(&state.pool, params.status_id, limit, offset).await?
    } else if auth.role == ROLE_DESIGNER {
        match DesignerRepo::find_by_user_id(&state.pool, auth.user_id).await? {
            Some(designer) => ProjectRepo::list_for_designer(&state.pool, designer.id).await?,
            None => Vec::new(),
        }
    } else {
        ProjectRepo::list_for_customer(&state.pool, auth.user_id).await?
    };
    Ok(Json(DataResponse { data: projects }))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Project>> {
    let project = load_visible_project(&state, &auth, id).await?;
    Ok(Json(project))
}

/// PUT /api/v1/projects/{id}
pub async fn update(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<Project>> {
    let existing = find_project(&state, id).await?;
    if let Some(title) = &input.title {
        validate_required(title, "title")?;
        validate_max_len(title, 200, "title")?;
    }
    validate_schedule(
        input.start_date.or(existing.start_date),
        input.end_date.or(existing.end_date),
    )?;

    let project = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Project", id))?;
    Ok(Json(project))
}

/// DELETE /api/v1/projects/{id}
///
/// Soft delete. Returns 204 No Content.
pub async fn delete(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ProjectRepo::soft_delete(&state.pool, id).await? {
        return Err(not_found("Project", id));
    }
    tracing::info!(project_id = id, by = staff.user_id, "Project deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/projects/{id}/assign-designer
///
/// The designer must be accepting work and below their open project limit.
pub async fn assign_designer(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<AssignDesignerInput>,
) -> AppResult<Json<Project>> {
    let project = find_project(&state, id).await?;
    if !is_open(project.status_id) {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Cannot assign a designer to a {} project",
            status_name(project.status_id)
        ))));
    }

    let designer = DesignerRepo::find_by_id(&state.pool, input.designer_id)
        .await?
        .ok_or_else(|| not_found("Designer", input.designer_id))?;

    if project.designer_id != Some(designer.id) {
        let open = DesignerRepo::count_open_projects(&state.pool, designer.id).await?;
        validate_designer_capacity(designer.is_available, open, designer.max_active_projects)?;
    }

    let project = ProjectRepo::assign_designer(&state.pool, id, designer.id)
        .await?
        .ok_or_else(|| not_found("Project", id))?;

    tracing::info!(project_id = id, designer_id = designer.id, "Designer assigned");

    state.publish(
        PlatformEvent::new(event_types::DESIGNER_ASSIGNED)
            .with_source("project", project.id)
            .with_actor(staff.user_id)
            .with_payload(json!({
                "customer_id": project.customer_id,
                "designer_user_id": designer.user_id,
                "designer_name": designer.display_name,
                "title": project.title,
            })),
    );

    Ok(Json(project))
}

/// POST /api/v1/projects/{id}/status
///
/// Activating a project without a start date stamps today.
pub async fn set_status(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ProjectStatusInput>,
) -> AppResult<Json<Project>> {
    let project = find_project(&state, id).await?;
    project_lifecycle::validate_transition(project.status_id, input.status_id)?;

    let start_if_missing =
        (input.status_id == ProjectStatus::Active.id()).then(|| Utc::now().date_naive());

    let project = ProjectRepo::set_status(
        &state.pool,
        id,
        project.status_id,
        input.status_id,
        start_if_missing,
    )
    .await?
    .ok_or_else(|| status_moved("Project", id))?;

    let status = status_name(project.status_id);
    tracing::info!(project_id = id, status, by = staff.user_id, "Project status changed");

    state.publish(
        PlatformEvent::new(event_types::PROJECT_STATUS_CHANGED)
            .with_source("project", project.id)
            .with_actor(staff.user_id)
            .with_payload(json!({
                "customer_id": project.customer_id,
                "status": status,
                "title": project.title,
                "project_id": project.id,
            })),
    );

    Ok(Json(project))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub(crate) async fn find_project(state: &AppState, id: DbId) -> AppResult<Project> {
    ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Project", id))
}

/// Load a project the caller is allowed to see.
///
/// Staff see everything, customers their own projects, and designers the
/// projects assigned to them.
pub(crate) async fn load_visible_project(
    state: &AppState,
    auth: &AuthUser,
    id: DbId,
) -> AppResult<Project> {
    let project = find_project(state, id).await?;
    if auth.is_staff() || project.customer_id == auth.user_id {
        return Ok(project);
    }
    if auth.role == ROLE_DESIGNER {
        if let Some(designer) = DesignerRepo::find_by_user_id(&state.pool, auth.user_id).await? {
            if project.designer_id == Some(designer.id) {
                return Ok(project);
            }
        }
    }
    Err(AppError::Core(CoreError::Forbidden(
        "You do not have access to this project".into(),
    )))
}

fn validate_schedule(start: Option<Date>, end: Option<Date>) -> Result<(), CoreError> {
    if let (Some(start), Some(end)) = (start, end) {
        if end < start {
            return Err(CoreError::Validation(format!(
                "end_date {end} is before start_date {start}"
            )));
        }
    }
    Ok(())
}
