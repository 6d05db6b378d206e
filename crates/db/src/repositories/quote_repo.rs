//! Repository for the `quotes` table.

use sqlx::{PgConnection, PgPool};
use studiodesk_core::types::DbId;

use crate::models::quote::{CreateQuote, Quote};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, lead_id, plan_name, amount, currency, months, notes, created_by, created_at, updated_at";

/// Provides CRUD operations for quotes.
pub struct QuoteRepo;

impl QuoteRepo {
    /// Insert a quote. Missing currency and months fall back to column defaults.
    pub async fn create(pool: &PgPool, input: &CreateQuote) -> Result<Quote, sqlx::Error> {
        let query = format!(
            "INSERT INTO quotes (lead_id, plan_name, amount, currency, months, notes, created_by)
             VALUES ($1, $2, $3, COALESCE($4, 'KRW'), COALESCE($5, 1), $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Quote>(&query)
            .bind(input.lead_id)
            .bind(&input.plan_name)
            .bind(input.amount)
            .bind(&input.currency)
            .bind(input.months)
            .bind(&input.notes)
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Quote>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM quotes WHERE id = $1");
        sqlx::query_as::<_, Quote>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All quotes issued to a lead, newest first.
    pub async fn list_for_lead(pool: &PgPool, lead_id: DbId) -> Result<Vec<Quote>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM quotes WHERE lead_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Quote>(&query)
            .bind(lead_id)
            .fetch_all(pool)
            .await
    }

    /// Read a quote and hold its row lock until the transaction ends.
    ///
    /// Issuing and completing links for one quote serialize on this lock.
    pub async fn lock_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Quote>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM quotes WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Quote>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }
}
