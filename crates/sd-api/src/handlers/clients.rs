//! Clients API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use sd_core::pagination::Paginated;
use sd_db::{ClientRepository, ClientRow, Repository};
use sd_models::{stage, CreateClientDto, UpdateClientDto};
use sd_services::{AdvanceStageService, CreateClientService};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::extractors::{AppState, AuthenticatedUser, Pagination};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ClientResponse {
    id: i64,
    name: String,
    phone: String,
    email: Option<String>,
    address: Option<String>,
    city: Option<String>,
    stage: i16,
    stage_label: &'static str,
    completed: bool,
    active: bool,
    created_at: DateTime<Utc>,
}

impl ClientResponse {
    fn from_row(row: ClientRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            phone: row.phone,
            email: row.email,
            address: row.address,
            city: row.city,
            stage: row.stage,
            stage_label: stage::default_label(row.stage),
            completed: row.completed,
            active: row.active,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientFilters {
    /// Include inactive clients as well
    #[serde(default)]
    pub all: bool,
}

/// GET /api/clients
pub async fn list_clients(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    pagination: Pagination,
    Query(filters): Query<ClientFilters>,
) -> ApiResult<impl IntoResponse> {
    let pool = state.pool()?;
    let repo = ClientRepository::new(pool.clone());

    let page = sd_db::Pagination::new(pagination.limit(), pagination.offset);

    let (rows, total) = if filters.all {
        let rows = repo
            .find_all(page.limit, page.offset)
            .await
            .map_err(|e| ApiError::from_repo(e, "Client"))?;
        let total = repo.count().await.map_err(|e| ApiError::from_repo(e, "Client"))?;
        (rows, total)
    } else {
        let result = repo
            .find_active(page)
            .await
            .map_err(|e| ApiError::from_repo(e, "Client"))?;
        (result.items, result.total)
    };

    let elements: Vec<ClientResponse> = rows.into_iter().map(ClientResponse::from_row).collect();
    Ok(Json(Paginated::new(elements, total, pagination.0)))
}

/// GET /api/clients/:id
pub async fn get_client(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    let pool = state.pool()?;
    let repo = ClientRepository::new(pool.clone());

    let row = repo
        .find_by_id(id)
        .await
        .map_err(|e| ApiError::from_repo(e, "Client"))?
        .ok_or_else(|| ApiError::not_found("Client", id))?;

    Ok(Json(ClientResponse::from_row(row)))
}

/// POST /api/clients
pub async fn create_client(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(dto): Json<CreateClientDto>,
) -> ApiResult<impl IntoResponse> {
    let pool = state.pool()?;
    let service = CreateClientService::new(pool.clone());

    let result = service.call(&user.0, dto).await;
    if result.is_failure() {
        return Err(ApiError::Validation(result.errors().clone()));
    }

    let row = result.into_result().map_err(|e| ApiError::internal(e.to_string()))?;
    Ok((StatusCode::CREATED, Json(ClientResponse::from_row(row))))
}

/// PATCH /api/clients/:id
pub async fn update_client(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i64>,
    Json(dto): Json<UpdateClientDto>,
) -> ApiResult<impl IntoResponse> {
    let pool = state.pool()?;
    let repo = ClientRepository::new(pool.clone());

    let row = repo
        .update(
            id,
            sd_db::UpdateClientDto {
                name: dto.name,
                phone: dto.phone,
                email: dto.email,
                address: dto.address,
                city: dto.city,
                active: dto.active,
            },
        )
        .await
        .map_err(|e| match e {
            sd_db::RepositoryError::NotFound(_) => ApiError::not_found("Client", id),
            other => ApiError::from_repo(other, "Client"),
        })?;

    Ok(Json(ClientResponse::from_row(row)))
}

/// PATCH /api/clients/:id/stage
///
/// Moves the client one milestone forward.
pub async fn advance_stage(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    let pool = state.pool()?;
    let service = AdvanceStageService::new(pool.clone());

    let result = service.call(id).await;
    if result.is_failure() {
        return Err(ApiError::Validation(result.errors().clone()));
    }

    let row = result.into_result().map_err(|e| ApiError::internal(e.to_string()))?;
    Ok(Json(ClientResponse::from_row(row)))
}
