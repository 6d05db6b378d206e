//! Repository for the `announcements` table.

use sqlx::PgPool;
use studiodesk_core::types::DbId;

use crate::models::announcement::{Announcement, CreateAnnouncement, UpdateAnnouncement};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, body, audience, is_pinned, is_published, published_at, \
                       created_by, created_at, updated_at";

/// Provides CRUD operations for announcements.
pub struct AnnouncementRepo;

impl AnnouncementRepo {
    /// Insert an unpublished draft.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAnnouncement,
        created_by: DbId,
    ) -> Result<Announcement, sqlx::Error> {
        let query = format!(
            "INSERT INTO announcements (title, body, audience, is_pinned, created_by)
             VALUES ($1, $2, COALESCE($3, 'all'), COALESCE($4, false), $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Announcement>(&query)
            .bind(&input.title)
            .bind(&input.body)
            .bind(&input.audience)
            .bind(input.is_pinned)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Announcement>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM announcements WHERE id = $1");
        sqlx::query_as::<_, Announcement>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Every announcement including drafts, pinned first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Announcement>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM announcements
             ORDER BY is_pinned DESC, created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Announcement>(&query)
            .fetch_all(pool)
            .await
    }

    /// Published announcements addressed to any of `audiences`, pinned first.
    pub async fn list_published_for(
        pool: &PgPool,
        audiences: &[&str],
    ) -> Result<Vec<Announcement>, sqlx::Error> {
        let audiences: Vec<String> = audiences.iter().map(|s| s.to_string()).collect();
        let query = format!(
            "SELECT {COLUMNS} FROM announcements
             WHERE is_published = true AND audience = ANY($1)
             ORDER BY is_pinned DESC, published_at DESC, id DESC"
        );
        sqlx::query_as::<_, Announcement>(&query)
            .bind(audiences)
            .fetch_all(pool)
            .await
    }

    /// Update an announcement. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAnnouncement,
    ) -> Result<Option<Announcement>, sqlx::Error> {
        let query = format!(
            "UPDATE announcements SET
                title = COALESCE($2, title),
                body = COALESCE($3, body),
                audience = COALESCE($4, audience),
                is_pinned = COALESCE($5, is_pinned)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Announcement>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.body)
            .bind(&input.audience)
            .bind(input.is_pinned)
            .fetch_optional(pool)
            .await
    }

    /// Publish a draft. Returns `None` if it does not exist or is already published.
    pub async fn publish(pool: &PgPool, id: DbId) -> Result<Option<Announcement>, sqlx::Error> {
        let query = format!(
            "UPDATE announcements SET is_published = true, published_at = NOW()
             WHERE id = $1 AND is_published = false
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Announcement>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete an announcement. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM announcements WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
