//! Handlers for tokenized payment links.
//!
//! Staff issue, list, and cancel links. The `/pay/{token}` endpoints are
//! public: the token itself is the credential.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use studiodesk_core::error::CoreError;
use studiodesk_core::field_validation::{validate_max_len, validate_required};
use studiodesk_core::leads::{self, state_machine::status_name};
use studiodesk_core::payment_link::{self, ensure_usable, expiry_from, generate_token, link_url};
use studiodesk_core::types::DbId;
use studiodesk_db::models::payment::{CreatePayment, Payment};
use studiodesk_db::models::payment_request::{
    CreatePaymentRequest, PaymentRequest, PaymentRequestDetail,
};
use studiodesk_db::models::status::LeadStatus;
use studiodesk_db::repositories::{LeadRepo, PaymentRepo, PaymentRequestRepo, QuoteRepo};
use studiodesk_events::{event_types, PlatformEvent};

use crate::error::{not_found, AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /payment-requests`.
#[derive(Debug, Deserialize)]
pub struct PaymentRequestQuery {
    pub lead_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// A freshly issued link together with its customer-facing URL.
#[derive(Debug, Serialize)]
pub struct IssuedPaymentLink {
    #[serde(flatten)]
    pub request: PaymentRequest,
    pub url: String,
}

/// Request body for `POST /pay/{token}/complete`.
#[derive(Debug, Deserialize)]
pub struct CompletePaymentInput {
    pub method: String,
    pub gateway_reference: Option<String>,
}

// ---------------------------------------------------------------------------
// Staff handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/quotes/{id}/payment-requests
///
/// Issue a payment link for a quote. The link expires after the configured
/// number of days. A quote has at most one open link at a time, and a paid
/// quote gets no further links.
pub async fn issue(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(quote_id): Path<DbId>,
) -> AppResult<(StatusCode, Json<IssuedPaymentLink>)> {
    let mut tx = state.pool.begin().await?;

    let quote = QuoteRepo::lock_for_update(&mut tx, quote_id)
        .await?
        .ok_or_else(|| not_found("Quote", quote_id))?;

    let lead = LeadRepo::find_by_id(&state.pool, quote.lead_id)
        .await?
        .ok_or_else(|| not_found("Lead", quote.lead_id))?;
    if leads::state_machine::valid_transitions(lead.status_id).is_empty() {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Cannot issue a payment link for a lead in status {}",
            status_name(lead.status_id)
        ))));
    }

    if PaymentRequestRepo::quote_is_paid(&mut tx, quote_id).await? {
        return Err(already_paid());
    }
    if let Some(open) = PaymentRequestRepo::find_open_for_quote(&mut tx, quote_id).await? {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Quote {quote_id} already has an open payment link ({}); cancel it first",
            open.id
        ))));
    }

    let request = PaymentRequestRepo::create(
        &mut *tx,
        &CreatePaymentRequest {
            quote_id,
            lead_id: quote.lead_id,
            token: generate_token(),
            expires_at: expiry_from(Utc::now(), state.config.payment_link_ttl_days),
            created_by: staff.user_id,
        },
    )
    .await?;

    tx.commit().await?;

    tracing::info!(
        payment_request_id = request.id,
        quote_id,
        expires_at = %request.expires_at,
        "Payment link issued"
    );

    let url = link_url(&state.config.public_base_url, &request.token);
    Ok((StatusCode::CREATED, Json(IssuedPaymentLink { request, url })))
}

/// GET /api/v1/payment-requests
pub async fn list(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<PaymentRequestQuery>,
) -> AppResult<Json<DataResponse<Vec<PaymentRequest>>>> {
    let (limit, offset) = PaginationParams {
        limit: params.limit,
        offset: params.offset,
    }
    .resolve();
    let requests = PaymentRequestRepo::list(&state.pool, params.lead_id, limit, offset).await?;
    Ok(Json(DataResponse { data: requests }))
}

/// POST /api/v1/payment-requests/{id}/cancel
pub async fn cancel(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<PaymentRequest>> {
    let existing = PaymentRequestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("PaymentRequest", id))?;
    if existing.status_id != payment_link::status::PENDING {
        return Err(AppError::Core(CoreError::Conflict(
            "Only pending payment links can be cancelled".into(),
        )));
    }

    let request = PaymentRequestRepo::cancel(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Only pending payment links can be cancelled".into(),
            ))
        })?;

    tracing::info!(payment_request_id = id, by = staff.user_id, "Payment link cancelled");
    Ok(Json(request))
}

// ---------------------------------------------------------------------------
// Public handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/pay/{token}
///
/// Show what a link pays for. Expired, paid, or cancelled links are rejected.
pub async fn view(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> AppResult<Json<PaymentRequestDetail>> {
    let detail = PaymentRequestRepo::find_detail_by_token(&state.pool, &token)
        .await?
        .ok_or_else(unknown_link)?;
    ensure_usable(detail.status_id, detail.expires_at, Utc::now())?;
    Ok(Json(detail))
}

/// POST /api/v1/pay/{token}/complete
///
/// Consume a link: mark it paid, record the payment for the quote amount,
/// and convert the lead. A quote is paid once, whichever of its links is
/// used. Staff are notified.
pub async fn complete(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(input): Json<CompletePaymentInput>,
) -> AppResult<(StatusCode, Json<Payment>)> {
    validate_required(&input.method, "method")?;
    validate_max_len(&input.method, 50, "method")?;

    let request = PaymentRequestRepo::find_by_token(&state.pool, &token)
        .await?
        .ok_or_else(unknown_link)?;
    ensure_usable(request.status_id, request.expires_at, Utc::now())?;

    let mut tx = state.pool.begin().await?;

    let quote = QuoteRepo::lock_for_update(&mut tx, request.quote_id)
        .await?
        .ok_or_else(|| not_found("Quote", request.quote_id))?;
    if PaymentRequestRepo::quote_is_paid(&mut tx, quote.id).await? {
        return Err(already_paid());
    }

    // The conditional update is the single point where a link is consumed.
    PaymentRequestRepo::mark_paid(&mut tx, request.id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Payment link is no longer usable".into(),
            ))
        })?;

    let payment = PaymentRepo::create(
        &mut *tx,
        &CreatePayment {
            user_id: None,
            lead_id: Some(request.lead_id),
            project_id: None,
            payment_request_id: Some(request.id),
            amount: quote.amount,
            currency: Some(quote.currency.clone()),
            method: input.method.trim().to_string(),
            gateway_reference: input.gateway_reference,
            memo: Some(format!("{} ({} months)", quote.plan_name, quote.months)),
        },
    )
    .await?;

    let lead = LeadRepo::lock_for_update(&mut tx, request.lead_id)
        .await?
        .ok_or_else(|| not_found("Lead", request.lead_id))?;
    let converted = LeadStatus::Converted.id();
    if leads::state_machine::can_transition(lead.status_id, converted) {
        LeadRepo::set_status(&mut *tx, lead.id, lead.status_id, converted).await?;
    }

    tx.commit().await?;

    tracing::info!(
        payment_id = payment.id,
        payment_request_id = request.id,
        lead_id = lead.id,
        "Payment link completed"
    );

    state.publish(
        PlatformEvent::new(event_types::PAYMENT_COMPLETED)
            .with_source("payment", payment.id)
            .with_payload(json!({
                "lead_id": lead.id,
                "plan_name": quote.plan_name,
                "amount": payment.amount,
            })),
    );

    Ok((StatusCode::CREATED, Json(payment)))
}

fn already_paid() -> AppError {
    AppError::Core(CoreError::Conflict("Quote has already been paid".into()))
}

fn unknown_link() -> AppError {
    AppError::NotFound("Payment link not found".into())
}
