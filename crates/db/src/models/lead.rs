//! Lead (consultation request) entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use studiodesk_core::types::{DbId, StatusId, Timestamp};

/// A lead row from the `leads` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Lead {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company_name: Option<String>,
    pub service_type: Option<String>,
    pub budget_range: Option<String>,
    pub message: Option<String>,
    pub status_id: StatusId,
    pub assigned_manager_id: Option<DbId>,
    pub admin_notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Public consultation form body.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLead {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company_name: Option<String>,
    pub service_type: Option<String>,
    pub budget_range: Option<String>,
    pub message: Option<String>,
}

/// Staff-side edits. Status changes go through the state machine instead.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateLead {
    pub assigned_manager_id: Option<DbId>,
    pub admin_notes: Option<String>,
    pub phone: Option<String>,
    pub company_name: Option<String>,
}

/// Number of leads in one status, for the back-office dashboard.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LeadStatusCount {
    pub status_id: StatusId,
    pub count: i64,
}
