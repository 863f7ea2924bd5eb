//! Client payments API handlers
//!
//! Listing includes the running balance so callers can cap the next
//! phase input without recomputing.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{NaiveDate, Utc};
use sd_billing::PaymentSummary;
use sd_db::{EstimateRepository, PaymentRepository, PaymentRow};
use sd_models::{CreatePaymentDto, PaymentPhase, PaymentStatus};
use sd_services::{MarkPaymentPaidService, RecordPaymentService};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::extractors::{AppState, AuthenticatedUser};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PaymentResponse {
    id: i64,
    client_id: i64,
    estimate_id: i64,
    phase: i32,
    amount: i64,
    status: String,
    paid_on: Option<NaiveDate>,
}

impl PaymentResponse {
    fn from_row(row: PaymentRow) -> Self {
        Self {
            id: row.id,
            client_id: row.client_id,
            estimate_id: row.estimate_id,
            phase: row.phase,
            amount: row.amount,
            status: row.status,
            paid_on: row.paid_on,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PaymentListResponse {
    payments: Vec<PaymentResponse>,
    grand_total: i64,
    total_received: i64,
    remaining_balance: i64,
    percent_received: i64,
    can_offer_phase: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentFilters {
    pub client_id: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkPaidRequest {
    /// Defaults to today
    pub paid_on: Option<NaiveDate>,
}

fn row_to_phase(row: &PaymentRow) -> PaymentPhase {
    PaymentPhase {
        id: Some(row.id),
        client_id: row.client_id,
        estimate_id: row.estimate_id,
        phase: row.phase,
        amount: row.amount,
        status: PaymentStatus::parse(&row.status).unwrap_or_default(),
        paid_on: row.paid_on,
        recorded_by: row.recorded_by,
        created_at: Some(row.created_at),
        updated_at: Some(row.updated_at),
    }
}

/// GET /api/client-payments?clientId=
pub async fn list_payments(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Query(filters): Query<PaymentFilters>,
) -> ApiResult<impl IntoResponse> {
    let pool = state.pool()?;
    let payments = PaymentRepository::new(pool.clone());
    let estimates = EstimateRepository::new(pool.clone());

    // The schedule and the approved estimate are independent fetches.
    let (rows, approved) = tokio::try_join!(
        payments.find_by_client(filters.client_id),
        estimates.find_approved_for_client(filters.client_id),
    )
    .map_err(|e| ApiError::from_repo(e, "Payment"))?;

    let grand_total = approved.map(|e| e.grand_total).unwrap_or(0);
    let phases: Vec<PaymentPhase> = rows.iter().map(row_to_phase).collect();
    let summary = PaymentSummary::compute(grand_total, &phases);

    Ok(Json(PaymentListResponse {
        payments: rows.into_iter().map(PaymentResponse::from_row).collect(),
        grand_total: summary.grand_total,
        total_received: summary.total_received,
        remaining_balance: summary.remaining_balance,
        percent_received: summary.percent_received(),
        can_offer_phase: summary.can_offer_phase(),
    }))
}

/// POST /api/client-payments
pub async fn create_payment(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(dto): Json<CreatePaymentDto>,
) -> ApiResult<impl IntoResponse> {
    let pool = state.pool()?;
    let service = RecordPaymentService::new(pool.clone());

    let result = service.call(&user.0, dto).await;
    if result.is_failure() {
        return Err(ApiError::Validation(result.errors().clone()));
    }

    let row = result.into_result().map_err(|e| ApiError::internal(e.to_string()))?;
    Ok((StatusCode::CREATED, Json(PaymentResponse::from_row(row))))
}

/// PATCH /api/client-payments/:id/status
pub async fn mark_payment_paid(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i64>,
    Json(dto): Json<MarkPaidRequest>,
) -> ApiResult<impl IntoResponse> {
    let pool = state.pool()?;
    let service = MarkPaymentPaidService::new(pool.clone());

    let paid_on = dto.paid_on.unwrap_or_else(|| Utc::now().date_naive());

    let result = service.call(id, paid_on).await;
    if result.is_failure() {
        return Err(ApiError::Validation(result.errors().clone()));
    }

    let row = result.into_result().map_err(|e| ApiError::internal(e.to_string()))?;
    Ok(Json(PaymentResponse::from_row(row)))
}
