//! Survey response model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use studiodesk_core::types::{DbId, Timestamp};

/// A row from the `survey_responses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SurveyResponse {
    pub id: DbId,
    pub project_id: DbId,
    pub user_id: DbId,
    pub rating: i16,
    pub would_recommend: Option<bool>,
    pub comment: Option<String>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SurveyInput {
    pub rating: i16,
    pub would_recommend: Option<bool>,
    pub comment: Option<String>,
}
