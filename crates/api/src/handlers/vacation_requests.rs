//! Handlers for designer leave (`/vacation-requests`).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde_json::json;
use studiodesk_core::error::CoreError;
use studiodesk_core::review::{self, ensure_pending};
use studiodesk_core::roles::ROLE_DESIGNER;
use studiodesk_core::types::{DbId, StatusId};
use studiodesk_core::vacation::validate_vacation_window;
use studiodesk_db::models::status::RequestStatus;
use studiodesk_db::models::vacation_request::{VacationRequest, VacationRequestInput};
use studiodesk_db::repositories::{DesignerRepo, VacationRequestRepo};
use studiodesk_events::{event_types, PlatformEvent};

use crate::error::{not_found, AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireDesigner, RequireStaff};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/vacation-requests
pub async fn create(
    RequireDesigner(auth): RequireDesigner,
    State(state): State<AppState>,
    Json(input): Json<VacationRequestInput>,
) -> AppResult<(StatusCode, Json<VacationRequest>)> {
    let designer = DesignerRepo::find_by_user_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(
                "No designer profile exists for this account".into(),
            ))
        })?;

    let today = Utc::now().date_naive();
    validate_vacation_window(input.start_date, input.end_date, today)?;

    let request = VacationRequestRepo::create(
        &state.pool,
        designer.id,
        input.start_date,
        input.end_date,
        input.reason.as_deref(),
    )
    .await?;

    tracing::info!(vacation_request_id = request.id, designer_id = designer.id, "Leave requested");
    Ok((StatusCode::CREATED, Json(request)))
}

/// GET /api/v1/vacation-requests
///
/// Staff see every request; designers see their own.
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<VacationRequest>>>> {
    let requests = if auth.is_staff() {
        VacationRequestRepo::list(&state.pool, None).await?
    } else if auth.role == ROLE_DESIGNER {
        match DesignerRepo::find_by_user_id(&state.pool, auth.user_id).await? {
            Some(designer) => VacationRequestRepo::list(&state.pool, Some(designer.id)).await?,
            None => Vec::new(),
        }
    } else {
        return Err(AppError::Core(CoreError::Forbidden(
            "Designer or staff role required".into(),
        )));
    };
    Ok(Json(DataResponse { data: requests }))
}

/// POST /api/v1/vacation-requests/{id}/approve
pub async fn approve(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<VacationRequest>> {
    review_request(&state, staff, id, RequestStatus::Approved.id()).await
}

/// POST /api/v1/vacation-requests/{id}/reject
pub async fn reject(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<VacationRequest>> {
    review_request(&state, staff, id, RequestStatus::Rejected.id()).await
}

async fn review_request(
    state: &AppState,
    staff: AuthUser,
    id: DbId,
    status_id: StatusId,
) -> AppResult<Json<VacationRequest>> {
    let existing = VacationRequestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("VacationRequest", id))?;
    ensure_pending(existing.status_id, "Vacation request")?;

    let request = VacationRequestRepo::review(&state.pool, id, status_id, staff.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Vacation request has already been reviewed".into(),
            ))
        })?;

    let designer = DesignerRepo::find_by_id(&state.pool, request.designer_id)
        .await?
        .ok_or_else(|| not_found("Designer", request.designer_id))?;

    let status = review::status_name(status_id).to_lowercase();
    tracing::info!(vacation_request_id = id, status = %status, "Leave request reviewed");

    state.publish(
        PlatformEvent::new(event_types::VACATION_REVIEWED)
            .with_source("vacation_request", request.id)
            .with_actor(staff.user_id)
            .with_payload(json!({
                "designer_user_id": designer.user_id,
                "status": status,
            })),
    );

    Ok(Json(request))
}
