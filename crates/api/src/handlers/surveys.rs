//! Handlers for post-project satisfaction surveys.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use studiodesk_core::error::CoreError;
use studiodesk_core::survey::{average_rating, validate_response};
use studiodesk_core::types::DbId;
use studiodesk_db::models::status::ProjectStatus;
use studiodesk_db::models::survey::{SurveyInput, SurveyResponse};
use studiodesk_db::repositories::SurveyRepo;

use super::projects::find_project;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::state::AppState;

/// Query parameters for `GET /surveys`.
#[derive(Debug, Deserialize)]
pub struct SurveyQuery {
    pub project_id: Option<DbId>,
}

/// Survey listing with the mean rating across the returned responses.
#[derive(Debug, Serialize)]
pub struct SurveyList {
    pub data: Vec<SurveyResponse>,
    pub average_rating: Option<f64>,
}

/// POST /api/v1/projects/{id}/survey
///
/// One response per customer per completed project. A second submission is
/// rejected with 409 by the `uq_survey_responses_project_user` constraint.
pub async fn submit(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<SurveyInput>,
) -> AppResult<(StatusCode, Json<SurveyResponse>)> {
    validate_response(input.rating, input.comment.as_deref())?;

    let project = find_project(&state, project_id).await?;
    if project.customer_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the project's customer may submit a survey".into(),
        )));
    }
    if project.status_id != ProjectStatus::Completed.id() {
        return Err(AppError::Core(CoreError::Conflict(
            "Surveys can only be submitted for completed projects".into(),
        )));
    }

    let response = SurveyRepo::create(&state.pool, project_id, auth.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/v1/surveys
pub async fn list(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<SurveyQuery>,
) -> AppResult<Json<SurveyList>> {
    let responses = SurveyRepo::list(&state.pool, params.project_id).await?;
    let ratings: Vec<i16> = responses.iter().map(|r| r.rating).collect();
    Ok(Json(SurveyList {
        average_rating: average_rating(&ratings),
        data: responses,
    }))
}
