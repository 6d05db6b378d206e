//! Role and user-role assignment models.

use serde::Serialize;
use sqlx::FromRow;
use studiodesk_core::types::{DbId, Timestamp};

/// A role row from the `roles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Role {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `user_roles` table. At most one exists per user.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserRole {
    pub id: DbId,
    pub user_id: DbId,
    pub role_id: DbId,
    pub assigned_by: Option<DbId>,
    pub created_at: Timestamp,
}
