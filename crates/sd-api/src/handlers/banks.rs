//! Bank accounts API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use sd_core::traits::UserContext;
use sd_db::{BankRepository, BankRow, Repository};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::extractors::{AppState, AuthenticatedUser};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BankResponse {
    id: i64,
    bank_name: String,
    account_name: String,
    account_number: String,
    ifsc: String,
    upi_id: Option<String>,
}

impl BankResponse {
    fn from_row(row: BankRow) -> Self {
        Self {
            id: row.id,
            bank_name: row.bank_name,
            account_name: row.account_name,
            account_number: row.account_number,
            ifsc: row.ifsc,
            upi_id: row.upi_id,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBankRequest {
    pub bank_name: String,
    pub account_name: String,
    pub account_number: String,
    pub ifsc: String,
    pub upi_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBankRequest {
    pub bank_name: Option<String>,
    pub account_name: Option<String>,
    pub account_number: Option<String>,
    pub ifsc: Option<String>,
    pub upi_id: Option<String>,
}

/// GET /api/banks
pub async fn list_banks(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> ApiResult<impl IntoResponse> {
    let pool = state.pool()?;
    let repo = BankRepository::new(pool.clone());

    let rows = repo
        .find_all(100, 0)
        .await
        .map_err(|e| ApiError::from_repo(e, "Bank"))?;

    let elements: Vec<BankResponse> = rows.into_iter().map(BankResponse::from_row).collect();
    Ok(Json(elements))
}

/// POST /api/banks
pub async fn create_bank(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(dto): Json<CreateBankRequest>,
) -> ApiResult<impl IntoResponse> {
    if !user.is_admin() {
        return Err(ApiError::forbidden("Only administrators can manage bank accounts."));
    }

    let pool = state.pool()?;
    let repo = BankRepository::new(pool.clone());

    let row = repo
        .create(sd_db::CreateBankDto {
            bank_name: dto.bank_name,
            account_name: dto.account_name,
            account_number: dto.account_number,
            ifsc: dto.ifsc,
            upi_id: dto.upi_id,
        })
        .await
        .map_err(|e| ApiError::from_repo(e, "Bank"))?;

    Ok((StatusCode::CREATED, Json(BankResponse::from_row(row))))
}

/// PATCH /api/banks/:id
pub async fn update_bank(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
    Json(dto): Json<UpdateBankRequest>,
) -> ApiResult<impl IntoResponse> {
    if !user.is_admin() {
        return Err(ApiError::forbidden("Only administrators can manage bank accounts."));
    }

    let pool = state.pool()?;
    let repo = BankRepository::new(pool.clone());

    let row = repo
        .update(
            id,
            sd_db::UpdateBankDto {
                bank_name: dto.bank_name,
                account_name: dto.account_name,
                account_number: dto.account_number,
                ifsc: dto.ifsc,
                upi_id: dto.upi_id,
            },
        )
        .await
        .map_err(|e| match e {
            sd_db::RepositoryError::NotFound(_) => ApiError::not_found("Bank", id),
            other => ApiError::from_repo(other, "Bank"),
        })?;

    Ok(Json(BankResponse::from_row(row)))
}
