//! Repository for the `project_pause_requests` table.

use sqlx::{PgConnection, PgPool};
use studiodesk_core::review::status;
use studiodesk_core::types::{DbId, StatusId};

use crate::models::pause_request::{CreatePauseRequest, PauseRequest};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, requested_by, start_date, end_date, reason, status_id, \
                       reviewed_by, reviewed_at, review_note, created_at, updated_at";

/// Provides CRUD operations for project hold requests.
pub struct PauseRequestRepo;

impl PauseRequestRepo {
    /// Number of hold requests ever submitted for a project.
    ///
    /// Every submitted request uses up the allowance, whatever its outcome.
    pub async fn count_for_project(
        conn: &mut PgConnection,
        project_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM project_pause_requests WHERE project_id = $1")
            .bind(project_id)
            .fetch_one(conn)
            .await
    }

    pub async fn create(
        conn: &mut PgConnection,
        input: &CreatePauseRequest,
    ) -> Result<PauseRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_pause_requests (project_id, requested_by, start_date, end_date, reason)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PauseRequest>(&query)
            .bind(input.project_id)
            .bind(input.requested_by)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(&input.reason)
            .fetch_one(conn)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PauseRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM project_pause_requests WHERE id = $1");
        sqlx::query_as::<_, PauseRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Lock a request row for review inside the caller's transaction.
    pub async fn lock_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<PauseRequest>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM project_pause_requests WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, PauseRequest>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// All requests for a project, oldest first.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<PauseRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_pause_requests
             WHERE project_id = $1
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, PauseRequest>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Record a staff decision inside the caller's transaction.
    pub async fn review(
        conn: &mut PgConnection,
        id: DbId,
        status_id: StatusId,
        reviewed_by: DbId,
        review_note: Option<&str>,
    ) -> Result<PauseRequest, sqlx::Error> {
        let query = format!(
            "UPDATE project_pause_requests SET
                status_id = $2,
                reviewed_by = $3,
                reviewed_at = NOW(),
                review_note = $4
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PauseRequest>(&query)
            .bind(id)
            .bind(status_id)
            .bind(reviewed_by)
            .bind(review_note)
            .fetch_one(conn)
            .await
    }

    /// Cancel a pending request. Returns `None` if it is no longer pending.
    pub async fn cancel(pool: &PgPool, id: DbId) -> Result<Option<PauseRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE project_pause_requests SET status_id = $2
             WHERE id = $1 AND status_id = $3
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PauseRequest>(&query)
            .bind(id)
            .bind(status::CANCELLED)
            .bind(status::PENDING)
            .fetch_optional(pool)
            .await
    }
}
