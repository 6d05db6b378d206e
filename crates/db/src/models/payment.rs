//! Payment entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use studiodesk_core::types::{DbId, StatusId, Timestamp};

/// A row from the `payments` table. `amount` is in minor currency units.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Payment {
    pub id: DbId,
    pub user_id: Option<DbId>,
    pub lead_id: Option<DbId>,
    pub project_id: Option<DbId>,
    pub payment_request_id: Option<DbId>,
    pub amount: i64,
    pub currency: String,
    pub method: String,
    pub gateway_reference: Option<String>,
    pub status_id: StatusId,
    pub memo: Option<String>,
    pub paid_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a payment. Also the body of `POST /payments`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePayment {
    pub user_id: Option<DbId>,
    pub lead_id: Option<DbId>,
    pub project_id: Option<DbId>,
    #[serde(skip)]
    pub payment_request_id: Option<DbId>,
    pub amount: i64,
    pub currency: Option<String>,
    pub method: String,
    pub gateway_reference: Option<String>,
    pub memo: Option<String>,
}
