//! Repository for the `leads` table.

use sqlx::{PgConnection, PgExecutor, PgPool};
use studiodesk_core::types::{DbId, StatusId};

use crate::models::lead::{CreateLead, Lead, LeadStatusCount, UpdateLead};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, phone, company_name, service_type, budget_range, \
                       message, status_id, assigned_manager_id, admin_notes, created_at, updated_at";

/// Provides CRUD operations for leads.
pub struct LeadRepo;

impl LeadRepo {
    /// Insert a new lead in the New status.
    pub async fn create(pool: &PgPool, input: &CreateLead) -> Result<Lead, sqlx::Error> {
        let query = format!(
            "INSERT INTO leads (name, email, phone, company_name, service_type, budget_range, message)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(input.name.trim())
            .bind(input.email.trim())
            .bind(&input.phone)
            .bind(&input.company_name)
            .bind(&input.service_type)
            .bind(&input.budget_range)
            .bind(&input.message)
            .fetch_one(pool)
            .await
    }

    /// Find a lead by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Lead>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM leads WHERE id = $1");
        sqlx::query_as::<_, Lead>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List leads newest first, optionally filtered by status.
    pub async fn list(
        pool: &PgPool,
        status_id: Option<StatusId>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Lead>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM leads
             WHERE ($1::SMALLINT IS NULL OR status_id = $1)
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(status_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Apply staff edits. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateLead,
    ) -> Result<Option<Lead>, sqlx::Error> {
        let query = format!(
            "UPDATE leads SET
                assigned_manager_id = COALESCE($2, assigned_manager_id),
                admin_notes = COALESCE($3, admin_notes),
                phone = COALESCE($4, phone),
                company_name = COALESCE($5, company_name)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(id)
            .bind(input.assigned_manager_id)
            .bind(&input.admin_notes)
            .bind(&input.phone)
            .bind(&input.company_name)
            .fetch_optional(pool)
            .await
    }

    /// Move a lead from `from` to `to`. Callers validate the transition first.
    ///
    /// Returns `None` when the lead is no longer in `from`.
    pub async fn set_status<'e, E>(
        executor: E,
        id: DbId,
        from: StatusId,
        to: StatusId,
    ) -> Result<Option<Lead>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "UPDATE leads SET status_id = $3 WHERE id = $1 AND status_id = $2 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(id)
            .bind(from)
            .bind(to)
            .fetch_optional(executor)
            .await
    }

    /// Read a lead and hold its row lock until the transaction ends.
    pub async fn lock_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Lead>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM leads WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Lead>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Lead counts grouped by status, ordered by status ID.
    pub async fn count_by_status(pool: &PgPool) -> Result<Vec<LeadStatusCount>, sqlx::Error> {
        sqlx::query_as::<_, LeadStatusCount>(
            "SELECT status_id, COUNT(*) AS count FROM leads GROUP BY status_id ORDER BY status_id",
        )
        .fetch_all(pool)
        .await
    }
}
