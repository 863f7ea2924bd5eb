//! Client expenses API handlers

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use sd_billing::{ExpenseSummary, MonthlyTotal};
use sd_db::{ExpenseRepository, ExpenseRow};
use sd_models::{CreateExpenseDto, ExpenseCategory};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::extractors::{AppState, AuthenticatedUser};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExpenseResponse {
    id: i64,
    client_id: i64,
    amount: i64,
    category: String,
    note: Option<String>,
    spent_on: NaiveDate,
}

impl ExpenseResponse {
    fn from_row(row: ExpenseRow) -> Self {
        Self {
            id: row.id,
            client_id: row.client_id,
            amount: row.amount,
            category: row.category,
            note: row.note,
            spent_on: row.spent_on,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseFilters {
    pub client_id: i64,
    /// Restrict to one category table
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyFilters {
    /// How many months back to aggregate, default 12
    pub months: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExpenseListResponse {
    expenses: Vec<ExpenseResponse>,
    summary: ExpenseSummary,
}

/// GET /api/client-expenses?clientId=&category=
pub async fn list_expenses(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Query(filters): Query<ExpenseFilters>,
) -> ApiResult<impl IntoResponse> {
    let pool = state.pool()?;
    let repo = ExpenseRepository::new(pool.clone());

    if let Some(category) = &filters.category {
        if ExpenseCategory::parse(category).is_none() {
            return Err(ApiError::bad_request("Category must be labour, material, or other"));
        }
    }

    let rows = match &filters.category {
        Some(category) => repo
            .find_by_client_and_category(filters.client_id, category)
            .await
            .map_err(|e| ApiError::from_repo(e, "Expense"))?,
        None => repo
            .find_by_client(filters.client_id)
            .await
            .map_err(|e| ApiError::from_repo(e, "Expense"))?,
    };

    // Summary cards always cover the whole client, not just the filter.
    let totals = repo
        .totals_by_category(filters.client_id)
        .await
        .map_err(|e| ApiError::from_repo(e, "Expense"))?;

    let mut summary = ExpenseSummary {
        labour: 0,
        material: 0,
        other: 0,
        total: 0,
    };
    for row in totals {
        match ExpenseCategory::parse(&row.category) {
            Some(ExpenseCategory::Labour) => summary.labour = row.total,
            Some(ExpenseCategory::Material) => summary.material = row.total,
            Some(ExpenseCategory::Other) | None => summary.other += row.total,
        }
    }
    summary.total = summary.labour + summary.material + summary.other;

    Ok(Json(ExpenseListResponse {
        expenses: rows.into_iter().map(ExpenseResponse::from_row).collect(),
        summary,
    }))
}

/// POST /api/client-expenses
pub async fn create_expense(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(dto): Json<CreateExpenseDto>,
) -> ApiResult<impl IntoResponse> {
    let pool = state.pool()?;
    let repo = ExpenseRepository::new(pool.clone());

    if dto.amount <= 0 {
        return Err(ApiError::bad_request("Amount must be greater than zero"));
    }

    let row = repo
        .create(sd_db::CreateExpenseDto {
            client_id: dto.client_id,
            amount: dto.amount,
            category: dto.category.as_str().to_string(),
            note: dto.note,
            spent_on: dto.spent_on,
            recorded_by: Some(user.user_id),
        })
        .await
        .map_err(|e| ApiError::from_repo(e, "Expense"))?;

    Ok((StatusCode::CREATED, Json(ExpenseResponse::from_row(row))))
}

/// GET /api/client-expenses/monthly?months=
///
/// Month-by-month totals across all clients, derived from the recorded
/// expenses.
pub async fn monthly_expenses(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Query(filters): Query<MonthlyFilters>,
) -> ApiResult<impl IntoResponse> {
    let pool = state.pool()?;
    let repo = ExpenseRepository::new(pool.clone());

    let months = filters.months.unwrap_or(12).clamp(1, 60);
    let rows = repo
        .monthly_totals(months)
        .await
        .map_err(|e| ApiError::from_repo(e, "Expense"))?;

    let totals: Vec<MonthlyTotal> = rows
        .into_iter()
        .map(|row| MonthlyTotal {
            month: row.month.format("%Y-%m").to_string(),
            total: row.total,
        })
        .collect();

    Ok(Json(totals))
}
