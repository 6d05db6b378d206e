//! Repository for the `survey_responses` table.

use sqlx::PgPool;
use studiodesk_core::types::DbId;

use crate::models::survey::{SurveyInput, SurveyResponse};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, user_id, rating, would_recommend, comment, created_at";

pub struct SurveyRepo;

impl SurveyRepo {
    /// Insert a response. A second response for the same project and user
    /// violates `uq_survey_responses_project_user`.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        user_id: DbId,
        input: &SurveyInput,
    ) -> Result<SurveyResponse, sqlx::Error> {
        let query = format!(
            "INSERT INTO survey_responses (project_id, user_id, rating, would_recommend, comment)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SurveyResponse>(&query)
            .bind(project_id)
            .bind(user_id)
            .bind(input.rating)
            .bind(input.would_recommend)
            .bind(&input.comment)
            .fetch_one(pool)
            .await
    }

    /// Responses newest first, optionally for one project.
    pub async fn list(
        pool: &PgPool,
        project_id: Option<DbId>,
    ) -> Result<Vec<SurveyResponse>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM survey_responses
             WHERE ($1::BIGINT IS NULL OR project_id = $1)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, SurveyResponse>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }
}
