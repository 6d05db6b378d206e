//! Handlers for project hold (pause) requests.
//!
//! A customer may request at most two holds per project, each spanning
//! 7 to 14 days. Approval pushes the project end date back by the hold span.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use studiodesk_core::error::CoreError;
use studiodesk_core::holding::{extend_end_date, inclusive_span_days, validate_hold_request};
use studiodesk_core::review::{self, ensure_pending};
use studiodesk_core::types::{DbId, StatusId};
use studiodesk_db::models::pause_request::{CreatePauseRequest, PauseRequest, PauseRequestInput};
use studiodesk_db::models::status::{ProjectStatus, RequestStatus};
use studiodesk_db::repositories::{PauseRequestRepo, ProjectRepo};
use studiodesk_events::{event_types, PlatformEvent};

use super::projects::{find_project, load_visible_project};
use crate::error::{not_found, AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for approve and reject.
#[derive(Debug, Default, Deserialize)]
pub struct ReviewInput {
    pub review_note: Option<String>,
}

/// POST /api/v1/projects/{id}/pause-requests
///
/// Only the project's customer may ask for a hold, and only while the
/// project is active.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<PauseRequestInput>,
) -> AppResult<(StatusCode, Json<PauseRequest>)> {
    let project = find_project(&state, project_id).await?;
    if project.customer_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the project's customer may request a hold".into(),
        )));
    }

    let mut tx = state.pool.begin().await?;

    // Serializes concurrent requests for the same project.
    let project = ProjectRepo::lock_for_update(&mut tx, project_id)
        .await?
        .ok_or_else(|| not_found("Project", project_id))?;
    if project.status_id != ProjectStatus::Active.id() {
        return Err(AppError::Core(CoreError::Conflict(
            "Holds can only be requested on active projects".into(),
        )));
    }

    let existing = PauseRequestRepo::count_for_project(&mut tx, project_id).await?;
    let today = Utc::now().date_naive();
    let span = validate_hold_request(existing, input.start_date, input.end_date, today)?;

    let request = PauseRequestRepo::create(
        &mut tx,
        &CreatePauseRequest {
            project_id,
            requested_by: auth.user_id,
            start_date: input.start_date,
            end_date: input.end_date,
            reason: input.reason,
        },
    )
    .await?;

    tx.commit().await?;

    tracing::info!(
        pause_request_id = request.id,
        project_id,
        span_days = span,
        "Hold requested"
    );

    state.publish(
        PlatformEvent::new(event_types::PAUSE_REQUESTED)
            .with_source("pause_request", request.id)
            .with_actor(auth.user_id)
            .with_payload(json!({
                "project_id": project_id,
                "title": project.title,
            })),
    );

    Ok((StatusCode::CREATED, Json(request)))
}

/// GET /api/v1/projects/{id}/pause-requests
pub async fn list_for_project(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<PauseRequest>>>> {
    load_visible_project(&state, &auth, project_id).await?;
    let requests = PauseRequestRepo::list_for_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: requests }))
}

/// POST /api/v1/pause-requests/{id}/approve
///
/// Approving extends the project end date by the hold span.
pub async fn approve(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ReviewInput>,
) -> AppResult<Json<PauseRequest>> {
    review_request(&state, staff, id, RequestStatus::Approved.id(), input).await
}

/// POST /api/v1/pause-requests/{id}/reject
pub async fn reject(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ReviewInput>,
) -> AppResult<Json<PauseRequest>> {
    review_request(&state, staff, id, RequestStatus::Rejected.id(), input).await
}

/// POST /api/v1/pause-requests/{id}/cancel
///
/// The requester may withdraw a request that has not been reviewed.
pub async fn cancel(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<PauseRequest>> {
    let request = PauseRequestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("PauseRequest", id))?;
    if request.requested_by != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the requester may cancel a hold request".into(),
        )));
    }
    ensure_pending(request.status_id, "Hold request")?;

    let request = PauseRequestRepo::cancel(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Hold request has already been reviewed".into(),
            ))
        })?;
    Ok(Json(request))
}

async fn review_request(
    state: &AppState,
    staff: AuthUser,
    id: DbId,
    status_id: StatusId,
    input: ReviewInput,
) -> AppResult<Json<PauseRequest>> {
    let mut tx = state.pool.begin().await?;

    let request = PauseRequestRepo::lock_for_update(&mut tx, id)
        .await?
        .ok_or_else(|| not_found("PauseRequest", id))?;
    ensure_pending(request.status_id, "Hold request")?;

    let project = ProjectRepo::lock_for_update(&mut tx, request.project_id)
        .await?
        .ok_or_else(|| not_found("Project", request.project_id))?;

    let request = PauseRequestRepo::review(
        &mut tx,
        id,
        status_id,
        staff.user_id,
        input.review_note.as_deref(),
    )
    .await?;

    if status_id == RequestStatus::Approved.id() {
        let span = inclusive_span_days(request.start_date, request.end_date);
        let end_date = extend_end_date(project.end_date, span);
        ProjectRepo::set_end_date(&mut tx, project.id, end_date).await?;
    }

    tx.commit().await?;

    let status = review::status_name(status_id).to_lowercase();
    tracing::info!(
        pause_request_id = id,
        project_id = project.id,
        status = %status,
        by = staff.user_id,
        "Hold request reviewed"
    );

    state.publish(
        PlatformEvent::new(event_types::PAUSE_REVIEWED)
            .with_source("pause_request", request.id)
            .with_actor(staff.user_id)
            .with_payload(json!({
                "customer_id": project.customer_id,
                "project_id": project.id,
                "status": status,
                "review_note": request.review_note,
                "title": project.title,
            })),
    );

    Ok(Json(request))
}
