//! Handlers for consultation requests (`/leads`) and their quotes.
//!
//! Intake is public; everything else requires a staff role.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use studiodesk_core::error::CoreError;
use studiodesk_core::leads::{self, state_machine::status_name};
use studiodesk_core::quotes::validate_quote;
use studiodesk_core::types::{DbId, StatusId};
use studiodesk_db::models::lead::{CreateLead, Lead, UpdateLead};
use studiodesk_db::models::quote::{CreateQuote, Quote, QuoteInput};
use studiodesk_db::models::status::LeadStatus;
use studiodesk_db::repositories::{LeadRepo, QuoteRepo};
use studiodesk_events::{event_types, PlatformEvent};

use crate::error::{not_found, status_moved, AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /leads`.
#[derive(Debug, Deserialize)]
pub struct LeadListQuery {
    pub status_id: Option<StatusId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Request body for `POST /leads/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct LeadStatusInput {
    pub status_id: StatusId,
}

/// POST /api/v1/leads
///
/// Public consultation request. Staff are notified.
pub async fn submit(
    State(state): State<AppState>,
    Json(mut input): Json<CreateLead>,
) -> AppResult<(StatusCode, Json<Lead>)> {
    input.name = input.name.trim().to_string();
    input.email = input.email.trim().to_lowercase();
    leads::validate_intake(&input.name, &input.email, input.message.as_deref())?;

    let lead = LeadRepo::create(&state.pool, &input).await?;
    tracing::info!(lead_id = lead.id, "Consultation request received");

    state.publish(
        PlatformEvent::new(event_types::LEAD_SUBMITTED)
            .with_source("lead", lead.id)
            .with_payload(json!({ "name": lead.name })),
    );

    Ok((StatusCode::CREATED, Json(lead)))
}

/// GET /api/v1/leads
pub async fn list(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<LeadListQuery>,
) -> AppResult<Json<DataResponse<Vec<Lead>>>> {
    let (limit, offset) = PaginationParams {
        limit: params.limit,
        offset: params.offset,
    }
    .resolve();
    let leads = LeadRepo::list(&state.pool, params.status_id, limit, offset).await?;
    Ok(Json(DataResponse { data: leads }))
}

/// GET /api/v1/leads/{id}
pub async fn get_by_id(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Lead>> {
    let lead = find_lead(&state, id).await?;
    Ok(Json(lead))
}

/// PUT /api/v1/leads/{id}
pub async fn update(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateLead>,
) -> AppResult<Json<Lead>> {
    let lead = LeadRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Lead", id))?;
    Ok(Json(lead))
}

/// POST /api/v1/leads/{id}/status
pub async fn set_status(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<LeadStatusInput>,
) -> AppResult<Json<Lead>> {
    let lead = find_lead(&state, id).await?;
    leads::validate_transition(lead.status_id, input.status_id)?;

    let lead = LeadRepo::set_status(&state.pool, id, lead.status_id, input.status_id)
        .await?
        .ok_or_else(|| status_moved("Lead", id))?;

    tracing::info!(
        lead_id = id,
        status = status_name(lead.status_id),
        by = staff.user_id,
        "Lead status changed"
    );
    Ok(Json(lead))
}

/// POST /api/v1/leads/{id}/quotes
///
/// Creating a quote moves a Consulting lead to Quoted.
pub async fn create_quote(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(lead_id): Path<DbId>,
    Json(input): Json<QuoteInput>,
) -> AppResult<(StatusCode, Json<Quote>)> {
    validate_quote(&input.plan_name, input.amount, input.months)?;

    let lead = find_lead(&state, lead_id).await?;
    if leads::state_machine::valid_transitions(lead.status_id).is_empty() {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Cannot quote a lead in status {}",
            status_name(lead.status_id)
        ))));
    }

    let quote = QuoteRepo::create(
        &state.pool,
        &CreateQuote {
            lead_id,
            plan_name: input.plan_name.trim().to_string(),
            amount: input.amount,
            currency: input.currency,
            months: input.months,
            notes: input.notes,
            created_by: staff.user_id,
        },
    )
    .await?;

    if lead.status_id == LeadStatus::Consulting.id() {
        LeadRepo::set_status(
            &state.pool,
            lead_id,
            LeadStatus::Consulting.id(),
            LeadStatus::Quoted.id(),
        )
        .await?;
    }

    Ok((StatusCode::CREATED, Json(quote)))
}

/// GET /api/v1/leads/{id}/quotes
pub async fn list_quotes(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Path(lead_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Quote>>>> {
    find_lead(&state, lead_id).await?;
    let quotes = QuoteRepo::list_for_lead(&state.pool, lead_id).await?;
    Ok(Json(DataResponse { data: quotes }))
}

async fn find_lead(state: &AppState, id: DbId) -> AppResult<Lead> {
    LeadRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Lead", id))
}
