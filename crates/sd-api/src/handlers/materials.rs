//! Material catalog API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use sd_core::traits::UserContext;
use sd_db::{MaterialRepository, MaterialRow, Repository};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::extractors::{AppState, AuthenticatedUser};
use crate::handlers::categories::StatusRequest;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MaterialResponse {
    id: i64,
    name: String,
    category_id: i64,
    subcategory_id: Option<i64>,
    measurement_type: String,
    unit_price: f64,
    status: i16,
}

impl MaterialResponse {
    fn from_row(row: MaterialRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            category_id: row.category_id,
            subcategory_id: row.subcategory_id,
            measurement_type: row.measurement_type,
            unit_price: row.unit_price,
            status: row.status,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialFilters {
    pub category_id: Option<i64>,
    /// Include inactive entries
    #[serde(default)]
    pub all: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMaterialRequest {
    pub name: String,
    pub category_id: i64,
    pub subcategory_id: Option<i64>,
    pub measurement_type: String,
    pub unit_price: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMaterialRequest {
    pub name: Option<String>,
    pub subcategory_id: Option<i64>,
    pub measurement_type: Option<String>,
    pub unit_price: Option<f64>,
}

/// GET /api/materials
pub async fn list_materials(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Query(filters): Query<MaterialFilters>,
) -> ApiResult<impl IntoResponse> {
    let pool = state.pool()?;
    let repo = MaterialRepository::new(pool.clone());

    let rows = if let Some(category_id) = filters.category_id {
        repo.find_active_by_category(category_id)
            .await
            .map_err(|e| ApiError::from_repo(e, "Material"))?
    } else if filters.all {
        repo.find_all(500, 0)
            .await
            .map_err(|e| ApiError::from_repo(e, "Material"))?
    } else {
        repo.find_active()
            .await
            .map_err(|e| ApiError::from_repo(e, "Material"))?
    };

    let elements: Vec<MaterialResponse> = rows.into_iter().map(MaterialResponse::from_row).collect();
    Ok(Json(elements))
}

/// POST /api/materials
pub async fn create_material(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(dto): Json<CreateMaterialRequest>,
) -> ApiResult<impl IntoResponse> {
    if !user.is_admin() {
        return Err(ApiError::forbidden("Only administrators can create materials."));
    }

    let pool = state.pool()?;
    let repo = MaterialRepository::new(pool.clone());

    let row = repo
        .create(sd_db::CreateMaterialDto {
            name: dto.name,
            category_id: dto.category_id,
            subcategory_id: dto.subcategory_id,
            measurement_type: dto.measurement_type,
            unit_price: dto.unit_price,
        })
        .await
        .map_err(|e| ApiError::from_repo(e, "Material"))?;

    Ok((StatusCode::CREATED, Json(MaterialResponse::from_row(row))))
}

/// PATCH /api/materials/:id
pub async fn update_material(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
    Json(dto): Json<UpdateMaterialRequest>,
) -> ApiResult<impl IntoResponse> {
    if !user.is_admin() {
        return Err(ApiError::forbidden("Only administrators can update materials."));
    }

    let pool = state.pool()?;
    let repo = MaterialRepository::new(pool.clone());

    let row = repo
        .update(
            id,
            sd_db::UpdateMaterialDto {
                name: dto.name,
                subcategory_id: dto.subcategory_id,
                measurement_type: dto.measurement_type,
                unit_price: dto.unit_price,
            },
        )
        .await
        .map_err(|e| match e {
            sd_db::RepositoryError::NotFound(_) => ApiError::not_found("Material", id),
            other => ApiError::from_repo(other, "Material"),
        })?;

    Ok(Json(MaterialResponse::from_row(row)))
}

/// PATCH /api/materials/:id/status
pub async fn set_material_status(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
    Json(dto): Json<StatusRequest>,
) -> ApiResult<impl IntoResponse> {
    if !user.is_admin() {
        return Err(ApiError::forbidden("Only administrators can update materials."));
    }
    if dto.status != 0 && dto.status != 1 {
        return Err(ApiError::bad_request("Status must be 0 or 1"));
    }

    let pool = state.pool()?;
    let repo = MaterialRepository::new(pool.clone());

    let row = repo.set_status(id, dto.status).await.map_err(|e| match e {
        sd_db::RepositoryError::NotFound(_) => ApiError::not_found("Material", id),
        other => ApiError::from_repo(other, "Material"),
    })?;

    Ok(Json(MaterialResponse::from_row(row)))
}
