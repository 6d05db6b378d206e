//! Repository for the `vacation_requests` table.

use sqlx::PgPool;
use studiodesk_core::review::status;
use studiodesk_core::types::{Date, DbId, StatusId};

use crate::models::vacation_request::VacationRequest;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, designer_id, start_date, end_date, reason, status_id, reviewed_by, \
                       reviewed_at, created_at, updated_at";

/// Provides CRUD operations for designer leave requests.
pub struct VacationRequestRepo;

impl VacationRequestRepo {
    pub async fn create(
        pool: &PgPool,
        designer_id: DbId,
        start_date: Date,
        end_date: Date,
        reason: Option<&str>,
    ) -> Result<VacationRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO vacation_requests (designer_id, start_date, end_date, reason)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, VacationRequest>(&query)
            .bind(designer_id)
            .bind(start_date)
            .bind(end_date)
            .bind(reason)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<VacationRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM vacation_requests WHERE id = $1");
        sqlx::query_as::<_, VacationRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Requests newest first, optionally for one designer.
    pub async fn list(
        pool: &PgPool,
        designer_id: Option<DbId>,
    ) -> Result<Vec<VacationRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM vacation_requests
             WHERE ($1::BIGINT IS NULL OR designer_id = $1)
             ORDER BY start_date DESC, id DESC"
        );
        sqlx::query_as::<_, VacationRequest>(&query)
            .bind(designer_id)
            .fetch_all(pool)
            .await
    }

    /// Record a staff decision on a pending request.
    ///
    /// Returns `None` if the request is not pending.
    pub async fn review(
        pool: &PgPool,
        id: DbId,
        status_id: StatusId,
        reviewed_by: DbId,
    ) -> Result<Option<VacationRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE vacation_requests SET status_id = $2, reviewed_by = $3, reviewed_at = NOW()
             WHERE id = $1 AND status_id = $4
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, VacationRequest>(&query)
            .bind(id)
            .bind(status_id)
            .bind(reviewed_by)
            .bind(status::PENDING)
            .fetch_optional(pool)
            .await
    }
}
