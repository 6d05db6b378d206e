//! Project pause (holding) request model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use studiodesk_core::types::{Date, DbId, StatusId, Timestamp};

/// A row from the `project_pause_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PauseRequest {
    pub id: DbId,
    pub project_id: DbId,
    pub requested_by: DbId,
    pub start_date: Date,
    pub end_date: Date,
    pub reason: Option<String>,
    pub status_id: StatusId,
    pub reviewed_by: Option<DbId>,
    pub reviewed_at: Option<Timestamp>,
    pub review_note: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for `POST /projects/{id}/pause-requests`.
#[derive(Debug, Clone, Deserialize)]
pub struct PauseRequestInput {
    pub start_date: Date,
    pub end_date: Date,
    pub reason: Option<String>,
}

/// DTO for inserting a pause request.
#[derive(Debug, Clone)]
pub struct CreatePauseRequest {
    pub project_id: DbId,
    pub requested_by: DbId,
    pub start_date: Date,
    pub end_date: Date,
    pub reason: Option<String>,
}
