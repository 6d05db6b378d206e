//! Quote entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use studiodesk_core::types::{DbId, Timestamp};

/// A quote row from the `quotes` table. `amount` is in minor currency units.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Quote {
    pub id: DbId,
    pub lead_id: DbId,
    pub plan_name: String,
    pub amount: i64,
    pub currency: String,
    pub months: i32,
    pub notes: Option<String>,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for issuing a quote to a lead.
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteInput {
    pub plan_name: String,
    pub amount: i64,
    /// Defaults to `KRW`.
    pub currency: Option<String>,
    /// Defaults to 1.
    pub months: Option<i32>,
    pub notes: Option<String>,
}

/// DTO for inserting a quote.
#[derive(Debug, Clone)]
pub struct CreateQuote {
    pub lead_id: DbId,
    pub plan_name: String,
    pub amount: i64,
    pub currency: Option<String>,
    pub months: Option<i32>,
    pub notes: Option<String>,
    pub created_by: DbId,
}
