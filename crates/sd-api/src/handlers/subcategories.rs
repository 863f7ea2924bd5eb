//! Subcategories API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use sd_core::traits::UserContext;
use sd_db::{Repository, SubcategoryRepository, SubcategoryRow};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::extractors::{AppState, AuthenticatedUser};
use crate::handlers::categories::StatusRequest;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SubcategoryResponse {
    id: i64,
    category_id: i64,
    name: String,
    status: i16,
}

impl SubcategoryResponse {
    fn from_row(row: SubcategoryRow) -> Self {
        Self {
            id: row.id,
            category_id: row.category_id,
            name: row.name,
            status: row.status,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubcategoryFilters {
    pub category_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubcategoryRequest {
    pub category_id: i64,
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubcategoryRequest {
    pub name: Option<String>,
}

/// GET /api/subcategories
pub async fn list_subcategories(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Query(filters): Query<SubcategoryFilters>,
) -> ApiResult<impl IntoResponse> {
    let pool = state.pool()?;
    let repo = SubcategoryRepository::new(pool.clone());

    let rows = if let Some(category_id) = filters.category_id {
        repo.find_active_by_category(category_id)
            .await
            .map_err(|e| ApiError::from_repo(e, "Subcategory"))?
    } else {
        repo.find_active()
            .await
            .map_err(|e| ApiError::from_repo(e, "Subcategory"))?
    };

    let elements: Vec<SubcategoryResponse> =
        rows.into_iter().map(SubcategoryResponse::from_row).collect();
    Ok(Json(elements))
}

/// POST /api/subcategories
pub async fn create_subcategory(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(dto): Json<CreateSubcategoryRequest>,
) -> ApiResult<impl IntoResponse> {
    if !user.is_admin() {
        return Err(ApiError::forbidden("Only administrators can create subcategories."));
    }

    let pool = state.pool()?;
    let repo = SubcategoryRepository::new(pool.clone());

    let row = repo
        .create(sd_db::CreateSubcategoryDto {
            category_id: dto.category_id,
            name: dto.name,
        })
        .await
        .map_err(|e| ApiError::from_repo(e, "Subcategory"))?;

    Ok((StatusCode::CREATED, Json(SubcategoryResponse::from_row(row))))
}

/// PATCH /api/subcategories/:id
pub async fn update_subcategory(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
    Json(dto): Json<UpdateSubcategoryRequest>,
) -> ApiResult<impl IntoResponse> {
    if !user.is_admin() {
        return Err(ApiError::forbidden("Only administrators can update subcategories."));
    }

    let pool = state.pool()?;
    let repo = SubcategoryRepository::new(pool.clone());

    let row = repo
        .update(id, sd_db::UpdateSubcategoryDto { name: dto.name })
        .await
        .map_err(|e| match e {
            sd_db::RepositoryError::NotFound(_) => ApiError::not_found("Subcategory", id),
            other => ApiError::from_repo(other, "Subcategory"),
        })?;

    Ok(Json(SubcategoryResponse::from_row(row)))
}

/// PATCH /api/subcategories/:id/status
pub async fn set_subcategory_status(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
    Json(dto): Json<StatusRequest>,
) -> ApiResult<impl IntoResponse> {
    if !user.is_admin() {
        return Err(ApiError::forbidden("Only administrators can update subcategories."));
    }
    if dto.status != 0 && dto.status != 1 {
        return Err(ApiError::bad_request("Status must be 0 or 1"));
    }

    let pool = state.pool()?;
    let repo = SubcategoryRepository::new(pool.clone());

    let row = repo.set_status(id, dto.status).await.map_err(|e| match e {
        sd_db::RepositoryError::NotFound(_) => ApiError::not_found("Subcategory", id),
        other => ApiError::from_repo(other, "Subcategory"),
    })?;

    Ok(Json(SubcategoryResponse::from_row(row)))
}
