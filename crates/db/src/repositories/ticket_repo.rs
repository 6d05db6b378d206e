//! Repository for the `support_tickets` table.

use sqlx::PgPool;
use studiodesk_core::tickets::status;
use studiodesk_core::types::{DbId, StatusId};

use crate::models::ticket::{CreateTicket, SupportTicket};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, project_id, subject, body, category, status_id, \
                       admin_reply, replied_by, replied_at, created_at, updated_at";

/// Provides CRUD operations for support tickets.
pub struct TicketRepo;

impl TicketRepo {
    pub async fn create(pool: &PgPool, input: &CreateTicket) -> Result<SupportTicket, sqlx::Error> {
        let query = format!(
            "INSERT INTO support_tickets (user_id, project_id, subject, body, category)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SupportTicket>(&query)
            .bind(input.user_id)
            .bind(input.project_id)
            .bind(&input.subject)
            .bind(&input.body)
            .bind(&input.category)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<SupportTicket>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM support_tickets WHERE id = $1");
        sqlx::query_as::<_, SupportTicket>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Tickets newest first, optionally restricted to one author and/or status.
    pub async fn list(
        pool: &PgPool,
        user_id: Option<DbId>,
        status_id: Option<StatusId>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<SupportTicket>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM support_tickets
             WHERE ($1::BIGINT IS NULL OR user_id = $1)
               AND ($2::SMALLINT IS NULL OR status_id = $2)
             ORDER BY created_at DESC, id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, SupportTicket>(&query)
            .bind(user_id)
            .bind(status_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Store a staff reply and the resulting status.
    pub async fn reply(
        pool: &PgPool,
        id: DbId,
        reply: &str,
        replied_by: DbId,
        from: StatusId,
        to: StatusId,
    ) -> Result<Option<SupportTicket>, sqlx::Error> {
        let query = format!(
            "UPDATE support_tickets SET
                admin_reply = $2,
                replied_by = $3,
                replied_at = NOW(),
                status_id = $5
             WHERE id = $1 AND status_id = $4
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SupportTicket>(&query)
            .bind(id)
            .bind(reply)
            .bind(replied_by)
            .bind(from)
            .bind(to)
            .fetch_optional(pool)
            .await
    }

    /// Move a ticket from `from` to `to`. Returns `None` when the ticket is no
    /// longer in `from`.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        from: StatusId,
        to: StatusId,
    ) -> Result<Option<SupportTicket>, sqlx::Error> {
        let query = format!(
            "UPDATE support_tickets SET status_id = $3
             WHERE id = $1 AND status_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SupportTicket>(&query)
            .bind(id)
            .bind(from)
            .bind(to)
            .fetch_optional(pool)
            .await
    }

    /// Open or in-progress tickets, optionally for one author.
    pub async fn count_open(pool: &PgPool, user_id: Option<DbId>) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM support_tickets
             WHERE ($1::BIGINT IS NULL OR user_id = $1) AND status_id IN ($2, $3)",
        )
        .bind(user_id)
        .bind(status::OPEN)
        .bind(status::IN_PROGRESS)
        .fetch_one(pool)
        .await
    }
}
