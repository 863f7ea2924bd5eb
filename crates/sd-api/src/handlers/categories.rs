//! Categories API handlers
//!
//! Deactivation is a status update; categories are never deleted.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use sd_core::traits::UserContext;
use sd_db::{CategoryRepository, CategoryRow, Repository};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::extractors::{AppState, AuthenticatedUser};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CategoryResponse {
    id: i64,
    name: String,
    status: i16,
}

impl CategoryResponse {
    fn from_row(row: CategoryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            status: row.status,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryFilters {
    /// Include inactive categories
    #[serde(default)]
    pub all: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusRequest {
    /// 1 = active, 0 = inactive
    pub status: i16,
}

/// GET /api/categories
pub async fn list_categories(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Query(filters): Query<CategoryFilters>,
) -> ApiResult<impl IntoResponse> {
    let pool = state.pool()?;
    let repo = CategoryRepository::new(pool.clone());

    let rows = if filters.all {
        repo.find_all(500, 0)
            .await
            .map_err(|e| ApiError::from_repo(e, "Category"))?
    } else {
        repo.find_active()
            .await
            .map_err(|e| ApiError::from_repo(e, "Category"))?
    };

    let elements: Vec<CategoryResponse> = rows.into_iter().map(CategoryResponse::from_row).collect();
    Ok(Json(elements))
}

/// POST /api/categories
pub async fn create_category(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(dto): Json<CreateCategoryRequest>,
) -> ApiResult<impl IntoResponse> {
    if !user.is_admin() {
        return Err(ApiError::forbidden("Only administrators can create categories."));
    }

    let pool = state.pool()?;
    let repo = CategoryRepository::new(pool.clone());

    let row = repo
        .create(sd_db::CreateCategoryDto { name: dto.name })
        .await
        .map_err(|e| ApiError::from_repo(e, "Category"))?;

    Ok((StatusCode::CREATED, Json(CategoryResponse::from_row(row))))
}

/// PATCH /api/categories/:id
pub async fn update_category(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
    Json(dto): Json<UpdateCategoryRequest>,
) -> ApiResult<impl IntoResponse> {
    if !user.is_admin() {
        return Err(ApiError::forbidden("Only administrators can update categories."));
    }

    let pool = state.pool()?;
    let repo = CategoryRepository::new(pool.clone());

    let row = repo
        .update(id, sd_db::UpdateCategoryDto { name: dto.name })
        .await
        .map_err(|e| match e {
            sd_db::RepositoryError::NotFound(_) => ApiError::not_found("Category", id),
            other => ApiError::from_repo(other, "Category"),
        })?;

    Ok(Json(CategoryResponse::from_row(row)))
}

/// PATCH /api/categories/:id/status
pub async fn set_category_status(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
    Json(dto): Json<StatusRequest>,
) -> ApiResult<impl IntoResponse> {
    if !user.is_admin() {
        return Err(ApiError::forbidden("Only administrators can update categories."));
    }
    if dto.status != 0 && dto.status != 1 {
        return Err(ApiError::bad_request("Status must be 0 or 1"));
    }

    let pool = state.pool()?;
    let repo = CategoryRepository::new(pool.clone());

    let row = repo.set_status(id, dto.status).await.map_err(|e| match e {
        sd_db::RepositoryError::NotFound(_) => ApiError::not_found("Category", id),
        other => ApiError::from_repo(other, "Category"),
    })?;

    Ok(Json(CategoryResponse::from_row(row)))
}
