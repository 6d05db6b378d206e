//! Designer vacation request model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use studiodesk_core::types::{Date, DbId, StatusId, Timestamp};

/// A row from the `vacation_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VacationRequest {
    pub id: DbId,
    pub designer_id: DbId,
    pub start_date: Date,
    pub end_date: Date,
    pub reason: Option<String>,
    pub status_id: StatusId,
    pub reviewed_by: Option<DbId>,
    pub reviewed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VacationRequestInput {
    pub start_date: Date,
    pub end_date: Date,
    pub reason: Option<String>,
}
