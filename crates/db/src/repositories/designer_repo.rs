//! Repository for the `designers` table.

use sqlx::PgPool;
use studiodesk_core::project_lifecycle::status;
use studiodesk_core::types::DbId;

use crate::models::designer::{CreateDesigner, Designer, DesignerWithLoad, UpdateDesigner};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, display_name, specialty, bio, is_available, \
                       max_active_projects, created_at, updated_at";

/// Provides CRUD operations for designer profiles.
pub struct DesignerRepo;

impl DesignerRepo {
    pub async fn create(pool: &PgPool, input: &CreateDesigner) -> Result<Designer, sqlx::Error> {
        let query = format!(
            "INSERT INTO designers (user_id, display_name, specialty, bio, max_active_projects)
             VALUES ($1, $2, $3, $4, COALESCE($5, 3))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Designer>(&query)
            .bind(input.user_id)
            .bind(&input.display_name)
            .bind(&input.specialty)
            .bind(&input.bio)
            .bind(input.max_active_projects)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Designer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM designers WHERE id = $1");
        sqlx::query_as::<_, Designer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The designer profile owned by a user account.
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Designer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM designers WHERE user_id = $1");
        sqlx::query_as::<_, Designer>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// All designers with their open project count, by display name.
    pub async fn list_with_load(pool: &PgPool) -> Result<Vec<DesignerWithLoad>, sqlx::Error> {
        sqlx::query_as::<_, DesignerWithLoad>(
            "SELECT d.id, d.user_id, d.display_name, d.specialty, d.bio, d.is_available,
                    d.max_active_projects, d.created_at, d.updated_at,
                    COUNT(p.id) AS open_projects
             FROM designers d
             LEFT JOIN projects p
                ON p.designer_id = d.id
               AND p.deleted_at IS NULL
               AND p.status_id IN ($1, $2, $3)
             GROUP BY d.id
             ORDER BY d.display_name ASC, d.id ASC",
        )
        .bind(status::PENDING)
        .bind(status::ACTIVE)
        .bind(status::ON_HOLD)
        .fetch_all(pool)
        .await
    }

    /// Number of pending, active, or on-hold projects assigned to a designer.
    pub async fn count_open_projects(pool: &PgPool, id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM projects
             WHERE designer_id = $1 AND deleted_at IS NULL AND status_id IN ($2, $3, $4)",
        )
        .bind(id)
        .bind(status::PENDING)
        .bind(status::ACTIVE)
        .bind(status::ON_HOLD)
        .fetch_one(pool)
        .await
    }

    /// Update a designer profile. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateDesigner,
    ) -> Result<Option<Designer>, sqlx::Error> {
        let query = format!(
            "UPDATE designers SET
                display_name = COALESCE($2, display_name),
                specialty = COALESCE($3, specialty),
                bio = COALESCE($4, bio),
                is_available = COALESCE($5, is_available),
                max_active_projects = COALESCE($6, max_active_projects)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Designer>(&query)
            .bind(id)
            .bind(&input.display_name)
            .bind(&input.specialty)
            .bind(&input.bio)
            .bind(input.is_available)
            .bind(input.max_active_projects)
            .fetch_optional(pool)
            .await
    }
}
