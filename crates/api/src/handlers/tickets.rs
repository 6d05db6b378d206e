//! Handlers for support tickets (`/tickets`).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use studiodesk_core::error::CoreError;
use studiodesk_core::field_validation::{validate_max_len, validate_required};
use studiodesk_core::tickets::{self, status_after_reply, validate_ticket, MAX_BODY_LEN};
use studiodesk_core::types::{DbId, StatusId};
use studiodesk_db::models::status::TicketStatus;
use studiodesk_db::models::ticket::{CreateTicket, SupportTicket, TicketInput};
use studiodesk_db::repositories::TicketRepo;
use studiodesk_events::{event_types, PlatformEvent};

use super::projects::load_visible_project;
use crate::error::{not_found, status_moved, AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Category used when the author does not pick one.
const DEFAULT_CATEGORY: &str = "general";

/// Query parameters for `GET /tickets`.
#[derive(Debug, Deserialize)]
pub struct TicketListQuery {
    pub status_id: Option<StatusId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Request body for `POST /tickets/{id}/reply`.
#[derive(Debug, Deserialize)]
pub struct ReplyInput {
    pub reply: String,
    /// Mark the ticket resolved along with the reply.
    #[serde(default)]
    pub resolve: bool,
}

/// Request body for `POST /tickets/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct TicketStatusInput {
    pub status_id: StatusId,
}

/// POST /api/v1/tickets
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<TicketInput>,
) -> AppResult<(StatusCode, Json<SupportTicket>)> {
    let category = input
        .category
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
    validate_ticket(&input.subject, &input.body, &category)?;

    if let Some(project_id) = input.project_id {
        load_visible_project(&state, &auth, project_id).await?;
    }

    let ticket = TicketRepo::create(
        &state.pool,
        &CreateTicket {
            user_id: auth.user_id,
            project_id: input.project_id,
            subject: input.subject.trim().to_string(),
            body: input.body,
            category,
        },
    )
    .await?;

    tracing::info!(ticket_id = ticket.id, user_id = auth.user_id, "Support ticket opened");

    state.publish(
        PlatformEvent::new(event_types::TICKET_CREATED)
            .with_source("ticket", ticket.id)
            .with_actor(auth.user_id)
            .with_payload(json!({ "title": ticket.subject })),
    );

    Ok((StatusCode::CREATED, Json(ticket)))
}

/// GET /api/v1/tickets
///
/// Staff see every ticket; everyone else sees their own.
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<TicketListQuery>,
) -> AppResult<Json<DataResponse<Vec<SupportTicket>>>> {
    let (limit, offset) = PaginationParams {
        limit: params.limit,
        offset: params.offset,
    }
    .resolve();
    let owner = (!auth.is_staff()).then_some(auth.user_id);
    let tickets = TicketRepo::list(&state.pool, owner, params.status_id, limit, offset).await?;
    Ok(Json(DataResponse { data: tickets }))
}

/// GET /api/v1/tickets/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<SupportTicket>> {
    let ticket = find_ticket(&state, id).await?;
    if !auth.is_staff() && ticket.user_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not have access to this ticket".into(),
        )));
    }
    Ok(Json(ticket))
}

/// POST /api/v1/tickets/{id}/reply
///
/// Replying to an open ticket moves it to In Progress. The author is
/// notified.
pub async fn reply(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ReplyInput>,
) -> AppResult<Json<SupportTicket>> {
    validate_required(&input.reply, "reply")?;
    validate_max_len(&input.reply, MAX_BODY_LEN, "reply")?;

    let ticket = find_ticket(&state, id).await?;
    if ticket.status_id == TicketStatus::Closed.id() {
        return Err(AppError::Core(CoreError::Conflict(
            "Cannot reply to a closed ticket".into(),
        )));
    }

    let mut next = status_after_reply(ticket.status_id);
    if input.resolve && next != TicketStatus::Resolved.id() {
        tickets::validate_transition(next, TicketStatus::Resolved.id())?;
        next = TicketStatus::Resolved.id();
    }

    let ticket = TicketRepo::reply(
        &state.pool,
        id,
        &input.reply,
        staff.user_id,
        ticket.status_id,
        next,
    )
    .await?
    .ok_or_else(|| status_moved("SupportTicket", id))?;

    state.publish(
        PlatformEvent::new(event_types::TICKET_REPLIED)
            .with_source("ticket", ticket.id)
            .with_actor(staff.user_id)
            .with_payload(json!({
                "user_id": ticket.user_id,
                "title": ticket.subject,
            })),
    );

    Ok(Json(ticket))
}

/// POST /api/v1/tickets/{id}/status
pub async fn set_status(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<TicketStatusInput>,
) -> AppResult<Json<SupportTicket>> {
    let ticket = find_ticket(&state, id).await?;
    tickets::validate_transition(ticket.status_id, input.status_id)?;

    let ticket = TicketRepo::set_status(&state.pool, id, ticket.status_id, input.status_id)
        .await?
        .ok_or_else(|| status_moved("SupportTicket", id))?;
    Ok(Json(ticket))
}

async fn find_ticket(state: &AppState, id: DbId) -> AppResult<SupportTicket> {
    TicketRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("SupportTicket", id))
}
