//! Project entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use studiodesk_core::types::{Date, DbId, StatusId, Timestamp};

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub customer_id: DbId,
    pub designer_id: Option<DbId>,
    pub lead_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub plan_name: Option<String>,
    pub status_id: StatusId,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub customer_id: DbId,
    pub lead_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub plan_name: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}

/// DTO for updating an existing project. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub description: Option<String>,
    pub plan_name: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}
