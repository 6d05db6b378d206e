//! Payment request (tokenized payment link) models.

use serde::Serialize;
use sqlx::FromRow;
use studiodesk_core::types::{DbId, StatusId, Timestamp};

/// A row from the `payment_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PaymentRequest {
    pub id: DbId,
    pub quote_id: DbId,
    pub lead_id: DbId,
    pub token: String,
    pub status_id: StatusId,
    pub expires_at: Timestamp,
    pub paid_at: Option<Timestamp>,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A payment request joined with its quote and lead, as shown on the
/// public payment page.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PaymentRequestDetail {
    pub id: DbId,
    pub lead_id: DbId,
    pub lead_name: String,
    pub status_id: StatusId,
    pub expires_at: Timestamp,
    pub plan_name: String,
    pub amount: i64,
    pub currency: String,
    pub months: i32,
}

/// DTO for issuing a payment link.
#[derive(Debug, Clone)]
pub struct CreatePaymentRequest {
    pub quote_id: DbId,
    pub lead_id: DbId,
    pub token: String,
    pub expires_at: Timestamp,
    pub created_by: DbId,
}
