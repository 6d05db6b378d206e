//! Repository for the `roles` and `user_roles` tables.

use sqlx::{PgConnection, PgPool};
use studiodesk_core::types::DbId;

use crate::models::role::{Role, UserRole};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, created_at, updated_at";

const ASSIGNMENT_COLUMNS: &str = "id, user_id, role_id, assigned_by, created_at";

/// Provides role lookups and single-role assignment.
pub struct RoleRepo;

impl RoleRepo {
    /// Find a role by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Role>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roles WHERE id = $1");
        sqlx::query_as::<_, Role>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a role by name (case-sensitive).
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Role>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roles WHERE name = $1");
        sqlx::query_as::<_, Role>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List all roles ordered by ID ascending.
    pub async fn list(pool: &PgPool) -> Result<Vec<Role>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roles ORDER BY id ASC");
        sqlx::query_as::<_, Role>(&query).fetch_all(pool).await
    }

    /// Resolve the role name held by a user, if any.
    pub async fn role_name_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT r.name FROM user_roles ur
             JOIN roles r ON r.id = ur.role_id
             WHERE ur.user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }

    /// Every role row held by a user. Holds at most one element.
    pub async fn assignments_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<UserRole>, sqlx::Error> {
        let query = format!("SELECT {ASSIGNMENT_COLUMNS} FROM user_roles WHERE user_id = $1");
        sqlx::query_as::<_, UserRole>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// IDs of active users holding any of the given role names.
    pub async fn user_ids_with_roles(
        pool: &PgPool,
        role_names: &[&str],
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let names: Vec<String> = role_names.iter().map(|s| s.to_string()).collect();
        sqlx::query_scalar(
            "SELECT u.id FROM users u
             JOIN user_roles ur ON ur.user_id = u.id
             JOIN roles r ON r.id = ur.role_id
             WHERE r.name = ANY($1) AND u.is_active = true
             ORDER BY u.id",
        )
        .bind(names)
        .fetch_all(pool)
        .await
    }

    /// Replace whatever role the user holds with `role_id`, inside the
    /// caller's transaction.
    pub async fn assign_in(
        conn: &mut PgConnection,
        user_id: DbId,
        role_id: DbId,
        assigned_by: Option<DbId>,
    ) -> Result<UserRole, sqlx::Error> {
        sqlx::query("DELETE FROM user_roles WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *conn)
            .await?;

        let query = format!(
            "INSERT INTO user_roles (user_id, role_id, assigned_by)
             VALUES ($1, $2, $3)
             RETURNING {ASSIGNMENT_COLUMNS}"
        );
        sqlx::query_as::<_, UserRole>(&query)
            .bind(user_id)
            .bind(role_id)
            .bind(assigned_by)
            .fetch_one(&mut *conn)
            .await
    }

    /// Replace whatever role the user holds with `role_id`.
    ///
    /// Delete and insert run in one transaction; `uq_user_roles_user_id`
    /// rejects a racing second insert.
    pub async fn assign(
        pool: &PgPool,
        user_id: DbId,
        role_id: DbId,
        assigned_by: Option<DbId>,
    ) -> Result<UserRole, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let row = Self::assign_in(&mut tx, user_id, role_id, assigned_by).await?;
        tx.commit().await?;
        Ok(row)
    }
}
