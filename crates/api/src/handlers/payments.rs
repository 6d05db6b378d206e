//! Handlers for the `/payments` ledger (staff only).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use studiodesk_core::error::CoreError;
use studiodesk_core::field_validation::validate_required;
use studiodesk_core::quotes::validate_amount;
use studiodesk_core::types::DbId;
use studiodesk_db::models::payment::{CreatePayment, Payment};
use studiodesk_db::models::status::PaymentStatus;
use studiodesk_db::repositories::PaymentRepo;

use crate::error::{not_found, AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /payments`.
#[derive(Debug, Deserialize)]
pub struct PaymentQuery {
    pub user_id: Option<DbId>,
    pub project_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/v1/payments
pub async fn list(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<PaymentQuery>,
) -> AppResult<Json<DataResponse<Vec<Payment>>>> {
    let (limit, offset) = PaginationParams {
        limit: params.limit,
        offset: params.offset,
    }
    .resolve();
    let payments =
        PaymentRepo::list(&state.pool, params.user_id, params.project_id, limit, offset).await?;
    Ok(Json(DataResponse { data: payments }))
}

/// POST /api/v1/payments
///
/// Record a payment taken outside the link flow (bank transfer, invoice).
pub async fn record(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreatePayment>,
) -> AppResult<(StatusCode, Json<Payment>)> {
    validate_amount(input.amount)?;
    validate_required(&input.method, "method")?;

    let payment = PaymentRepo::create(&state.pool, &input).await?;
    tracing::info!(payment_id = payment.id, by = staff.user_id, "Manual payment recorded");
    Ok((StatusCode::CREATED, Json(payment)))
}

/// POST /api/v1/payments/{id}/refund
///
/// Only completed payments can be refunded.
pub async fn refund(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Payment>> {
    let payment = PaymentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Payment", id))?;
    if payment.status_id != PaymentStatus::Completed.id() {
        return Err(AppError::Core(CoreError::Conflict(
            "Only completed payments can be refunded".into(),
        )));
    }

    let payment = PaymentRepo::refund(&state.pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::Conflict(
            "Only completed payments can be refunded".into(),
        ))
    })?;

    tracing::info!(payment_id = id, by = staff.user_id, "Payment refunded");
    Ok(Json(payment))
}
