//! Repository for the `projects` table.
//!
//! Soft-deleted rows (`deleted_at IS NOT NULL`) are invisible to every query.

use sqlx::{PgConnection, PgPool};
use studiodesk_core::types::{Date, DbId, StatusId};

use crate::models::project::{CreateProject, Project, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, customer_id, designer_id, lead_id, title, description, plan_name, \
                       status_id, start_date, end_date, created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project in the Pending status.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects
                (customer_id, lead_id, title, description, plan_name, start_date, end_date)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(input.customer_id)
            .bind(input.lead_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.plan_name)
            .bind(input.start_date)
            .bind(input.end_date)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All projects, newest first, optionally filtered by status.
    pub async fn list(
        pool: &PgPool,
        status_id: Option<StatusId>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE deleted_at IS NULL AND ($1::SMALLINT IS NULL OR status_id = $1)
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(status_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Projects owned by a customer, newest first.
    pub async fn list_for_customer(
        pool: &PgPool,
        customer_id: DbId,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE customer_id = $1 AND deleted_at IS NULL
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(customer_id)
            .fetch_all(pool)
            .await
    }

    /// Projects assigned to a designer profile, newest first.
    pub async fn list_for_designer(
        pool: &PgPool,
        designer_id: DbId,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE designer_id = $1 AND deleted_at IS NULL
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(designer_id)
            .fetch_all(pool)
            .await
    }

    /// Update a project. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                plan_name = COALESCE($4, plan_name),
                start_date = COALESCE($5, start_date),
                end_date = COALESCE($6, end_date)
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.plan_name)
            .bind(input.start_date)
            .bind(input.end_date)
            .fetch_optional(pool)
            .await
    }

    /// Set the status, stamping `start_date` when one is given and none is set.
    /// Move a project from `from` to `to`. Returns `None` when the project
    /// is gone or no longer in `from`.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        from: StatusId,
        to: StatusId,
        start_if_missing: Option<Date>,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                status_id = $3,
                start_date = COALESCE(start_date, $4)
             WHERE id = $1 AND status_id = $2 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(from)
            .bind(to)
            .bind(start_if_missing)
            .fetch_optional(pool)
            .await
    }

    pub async fn assign_designer(
        pool: &PgPool,
        id: DbId,
        designer_id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET designer_id = $2
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(designer_id)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite the end date inside the caller's transaction.
    pub async fn set_end_date(
        conn: &mut PgConnection,
        id: DbId,
        end_date: Option<Date>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE projects SET end_date = $2 WHERE id = $1")
            .bind(id)
            .bind(end_date)
            .execute(conn)
            .await?;
        Ok(())
    }

    /// Lock a project row for the rest of the caller's transaction.
    pub async fn lock_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects WHERE id = $1 AND deleted_at IS NULL FOR UPDATE"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Soft-delete a project. Returns `true` if a live row was marked.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE projects SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
