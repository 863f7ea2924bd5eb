//! Estimates API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use sd_db::{EstimateItemRow, EstimateRepository, EstimateRow};
use sd_models::{CreateEstimateDto, EstimateStatus};
use sd_services::{CreateEstimateService, UpdateEstimateStatusService};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::extractors::{AppState, AuthenticatedUser};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EstimateResponse {
    id: i64,
    client_id: i64,
    subtotal: f64,
    discount: f64,
    grand_total: i64,
    status: String,
    created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    items: Vec<EstimateItemResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EstimateItemResponse {
    id: i64,
    name: String,
    measurement_type: String,
    length_cm: Option<f64>,
    breadth_cm: Option<f64>,
    quantity: Option<f64>,
    unit_price: f64,
    line_total: f64,
}

impl EstimateResponse {
    fn from_row(row: EstimateRow, items: Vec<EstimateItemRow>) -> Self {
        Self {
            id: row.id,
            client_id: row.client_id,
            subtotal: row.subtotal,
            discount: row.discount,
            grand_total: row.grand_total,
            status: row.status,
            created_at: row.created_at,
            items: items
                .into_iter()
                .map(|item| EstimateItemResponse {
                    id: item.id,
                    name: item.name,
                    measurement_type: item.measurement_type,
                    length_cm: item.length_cm,
                    breadth_cm: item.breadth_cm,
                    quantity: item.quantity,
                    unit_price: item.unit_price,
                    line_total: item.line_total,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateFilters {
    pub client_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateStatusRequest {
    /// "approved" or "rejected"
    pub status: String,
}

/// GET /api/estimates?clientId=
pub async fn list_estimates(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Query(filters): Query<EstimateFilters>,
) -> ApiResult<impl IntoResponse> {
    let pool = state.pool()?;
    let repo = EstimateRepository::new(pool.clone());

    let client_id = filters
        .client_id
        .ok_or_else(|| ApiError::bad_request("clientId query parameter is required"))?;

    let rows = repo
        .find_by_client(client_id)
        .await
        .map_err(|e| ApiError::from_repo(e, "Estimate"))?;

    let elements: Vec<EstimateResponse> = rows
        .into_iter()
        .map(|row| EstimateResponse::from_row(row, vec![]))
        .collect();

    Ok(Json(elements))
}

/// GET /api/estimates/:id
pub async fn get_estimate(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    let pool = state.pool()?;
    let repo = EstimateRepository::new(pool.clone());

    let row = repo
        .find_by_id(id)
        .await
        .map_err(|e| ApiError::from_repo(e, "Estimate"))?
        .ok_or_else(|| ApiError::not_found("Estimate", id))?;

    let items = repo
        .items(id)
        .await
        .map_err(|e| ApiError::from_repo(e, "Estimate"))?;

    Ok(Json(EstimateResponse::from_row(row, items)))
}

/// POST /api/estimates
pub async fn create_estimate(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(dto): Json<CreateEstimateDto>,
) -> ApiResult<impl IntoResponse> {
    let pool = state.pool()?;
    let service = CreateEstimateService::new(pool.clone());

    let result = service.call(&user.0, dto).await;
    if result.is_failure() {
        return Err(ApiError::Validation(result.errors().clone()));
    }

    let row = result.into_result().map_err(|e| ApiError::internal(e.to_string()))?;
    let items = EstimateRepository::new(pool.clone())
        .items(row.id)
        .await
        .map_err(|e| ApiError::from_repo(e, "Estimate"))?;

    Ok((StatusCode::CREATED, Json(EstimateResponse::from_row(row, items))))
}

/// PATCH /api/estimates/:id/status
pub async fn set_estimate_status(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i64>,
    Json(dto): Json<EstimateStatusRequest>,
) -> ApiResult<impl IntoResponse> {
    let status = EstimateStatus::parse(&dto.status)
        .filter(|s| *s != EstimateStatus::Pending)
        .ok_or_else(|| ApiError::bad_request("Status must be approved or rejected"))?;

    let pool = state.pool()?;
    let service = UpdateEstimateStatusService::new(pool.clone());

    let result = service.call(id, status).await;
    if result.is_failure() {
        return Err(ApiError::Validation(result.errors().clone()));
    }

    let row = result.into_result().map_err(|e| ApiError::internal(e.to_string()))?;
    Ok(Json(EstimateResponse::from_row(row, vec![])))
}
