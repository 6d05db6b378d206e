//! Repository for the `payment_requests` table.

use sqlx::{PgConnection, PgExecutor, PgPool};
use studiodesk_core::payment_link::status;
use studiodesk_core::types::DbId;

use crate::models::payment_request::{CreatePaymentRequest, PaymentRequest, PaymentRequestDetail};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, quote_id, lead_id, token, status_id, expires_at, paid_at, \
                       created_by, created_at, updated_at";

/// Provides CRUD operations for payment links.
pub struct PaymentRequestRepo;

impl PaymentRequestRepo {
    /// Insert a new pending link.
    pub async fn create<'e, E>(
        executor: E,
        input: &CreatePaymentRequest,
    ) -> Result<PaymentRequest, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO payment_requests (quote_id, lead_id, token, expires_at, created_by)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PaymentRequest>(&query)
            .bind(input.quote_id)
            .bind(input.lead_id)
            .bind(&input.token)
            .bind(input.expires_at)
            .bind(input.created_by)
            .fetch_one(executor)
            .await
    }

    /// The quote's pending link that has not yet expired, if any.
    pub async fn find_open_for_quote(
        conn: &mut PgConnection,
        quote_id: DbId,
    ) -> Result<Option<PaymentRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM payment_requests
             WHERE quote_id = $1 AND status_id = $2 AND expires_at > NOW()
             ORDER BY id DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, PaymentRequest>(&query)
            .bind(quote_id)
            .bind(status::PENDING)
            .fetch_optional(conn)
            .await
    }

    /// Whether any link for the quote has already been paid.
    pub async fn quote_is_paid(
        conn: &mut PgConnection,
        quote_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM payment_requests WHERE quote_id = $1 AND status_id = $2)",
        )
        .bind(quote_id)
        .bind(status::PAID)
        .fetch_one(conn)
        .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PaymentRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM payment_requests WHERE id = $1");
        sqlx::query_as::<_, PaymentRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_token(
        pool: &PgPool,
        token: &str,
    ) -> Result<Option<PaymentRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM payment_requests WHERE token = $1");
        sqlx::query_as::<_, PaymentRequest>(&query)
            .bind(token)
            .fetch_optional(pool)
            .await
    }

    /// The link joined with its quote and lead for the public payment page.
    pub async fn find_detail_by_token(
        pool: &PgPool,
        token: &str,
    ) -> Result<Option<PaymentRequestDetail>, sqlx::Error> {
        sqlx::query_as::<_, PaymentRequestDetail>(
            "SELECT pr.id, pr.lead_id, l.name AS lead_name, pr.status_id, pr.expires_at,
                    q.plan_name, q.amount, q.currency, q.months
             FROM payment_requests pr
             JOIN quotes q ON q.id = pr.quote_id
             JOIN leads l ON l.id = pr.lead_id
             WHERE pr.token = $1",
        )
        .bind(token)
        .fetch_optional(pool)
        .await
    }

    /// List links newest first, optionally for a single lead.
    pub async fn list(
        pool: &PgPool,
        lead_id: Option<DbId>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PaymentRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM payment_requests
             WHERE ($1::BIGINT IS NULL OR lead_id = $1)
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, PaymentRequest>(&query)
            .bind(lead_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Consume a link inside the caller's transaction.
    ///
    /// Only a pending, unexpired link is updated; `None` means another request
    /// consumed it first or it expired in the meantime.
    pub async fn mark_paid(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<PaymentRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE payment_requests SET status_id = $2, paid_at = NOW()
             WHERE id = $1 AND status_id = $3 AND expires_at > NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PaymentRequest>(&query)
            .bind(id)
            .bind(status::PAID)
            .bind(status::PENDING)
            .fetch_optional(conn)
            .await
    }

    /// Cancel a pending link. Returns `None` if it is not pending.
    pub async fn cancel(pool: &PgPool, id: DbId) -> Result<Option<PaymentRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE payment_requests SET status_id = $2
             WHERE id = $1 AND status_id = $3
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PaymentRequest>(&query)
            .bind(id)
            .bind(status::CANCELLED)
            .bind(status::PENDING)
            .fetch_optional(pool)
            .await
    }
}
