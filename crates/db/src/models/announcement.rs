//! Announcement model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use studiodesk_core::types::{DbId, Timestamp};

/// A row from the `announcements` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Announcement {
    pub id: DbId,
    pub title: String,
    pub body: String,
    pub audience: String,
    pub is_pinned: bool,
    pub is_published: bool,
    pub published_at: Option<Timestamp>,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAnnouncement {
    pub title: String,
    pub body: String,
    /// Defaults to `all`.
    pub audience: Option<String>,
    pub is_pinned: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAnnouncement {
    pub title: Option<String>,
    pub body: Option<String>,
    pub audience: Option<String>,
    pub is_pinned: Option<bool>,
}
