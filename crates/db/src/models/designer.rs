//! Designer profile model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use studiodesk_core::types::{DbId, Timestamp};

/// A row from the `designers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Designer {
    pub id: DbId,
    pub user_id: DbId,
    pub display_name: String,
    pub specialty: Option<String>,
    pub bio: Option<String>,
    pub is_available: bool,
    pub max_active_projects: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Designer row with the number of open (pending/active/on-hold) projects.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DesignerWithLoad {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub designer: Designer,
    pub open_projects: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateDesigner {
    pub user_id: DbId,
    pub display_name: String,
    pub specialty: Option<String>,
    pub bio: Option<String>,
    /// Defaults to 3.
    pub max_active_projects: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateDesigner {
    pub display_name: Option<String>,
    pub specialty: Option<String>,
    pub bio: Option<String>,
    pub is_available: Option<bool>,
    pub max_active_projects: Option<i32>,
}
