//! Repository for the `payments` table.

use sqlx::{PgExecutor, PgPool};
use studiodesk_core::types::DbId;

use crate::models::payment::{CreatePayment, Payment};
use crate::models::status::PaymentStatus;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, lead_id, project_id, payment_request_id, amount, currency, \
                       method, gateway_reference, status_id, memo, paid_at, created_at, updated_at";

/// Provides CRUD operations for recorded payments.
pub struct PaymentRepo;

impl PaymentRepo {
    /// Record a completed payment.
    pub async fn create<'e, E>(executor: E, input: &CreatePayment) -> Result<Payment, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO payments
                (user_id, lead_id, project_id, payment_request_id, amount, currency,
                 method, gateway_reference, memo, status_id, paid_at)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, 'KRW'), $7, $8, $9, $10, NOW())
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(input.user_id)
            .bind(input.lead_id)
            .bind(input.project_id)
            .bind(input.payment_request_id)
            .bind(input.amount)
            .bind(&input.currency)
            .bind(&input.method)
            .bind(&input.gateway_reference)
            .bind(&input.memo)
            .bind(PaymentStatus::Completed.id())
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Payment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM payments WHERE id = $1");
        sqlx::query_as::<_, Payment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List payments newest first with optional user and project filters.
    pub async fn list(
        pool: &PgPool,
        user_id: Option<DbId>,
        project_id: Option<DbId>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Payment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM payments
             WHERE ($1::BIGINT IS NULL OR user_id = $1)
               AND ($2::BIGINT IS NULL OR project_id = $2)
             ORDER BY created_at DESC, id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(user_id)
            .bind(project_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// A customer's own payments, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<Payment>, sqlx::Error> {
        Self::list(pool, Some(user_id), None, limit, 0).await
    }

    /// Mark a completed payment as refunded. Returns `None` if it is not completed.
    pub async fn refund(pool: &PgPool, id: DbId) -> Result<Option<Payment>, sqlx::Error> {
        let query = format!(
            "UPDATE payments SET status_id = $2
             WHERE id = $1 AND status_id = $3
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(id)
            .bind(PaymentStatus::Refunded.id())
            .bind(PaymentStatus::Completed.id())
            .fetch_optional(pool)
            .await
    }
}
