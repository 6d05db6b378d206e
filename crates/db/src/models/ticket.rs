//! Support ticket model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use studiodesk_core::types::{DbId, StatusId, Timestamp};

/// A row from the `support_tickets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SupportTicket {
    pub id: DbId,
    pub user_id: DbId,
    pub project_id: Option<DbId>,
    pub subject: String,
    pub body: String,
    pub category: String,
    pub status_id: StatusId,
    pub admin_reply: Option<String>,
    pub replied_by: Option<DbId>,
    pub replied_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for `POST /tickets`.
#[derive(Debug, Clone, Deserialize)]
pub struct TicketInput {
    pub project_id: Option<DbId>,
    pub subject: String,
    pub body: String,
    /// Defaults to `general`.
    pub category: Option<String>,
}

/// DTO for inserting a ticket.
#[derive(Debug, Clone)]
pub struct CreateTicket {
    pub user_id: DbId,
    pub project_id: Option<DbId>,
    pub subject: String,
    pub body: String,
    pub category: String,
}
