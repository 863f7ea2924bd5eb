//! Stage reference data

use axum::{extract::State, response::IntoResponse, Json};
use sd_db::StageRepository;
use serde::Serialize;

use crate::error::{ApiError, ApiResult};
use crate::extractors::{AppState, AuthenticatedUser};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StageResponse {
    id: i64,
    position: i16,
    name: String,
}

/// GET /api/stages
pub async fn list_stages(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> ApiResult<impl IntoResponse> {
    let pool = state.pool()?;
    let repo = StageRepository::new(pool.clone());

    let rows = repo
        .find_all()
        .await
        .map_err(|e| ApiError::from_repo(e, "Stage"))?;

    let stages: Vec<StageResponse> = rows
        .into_iter()
        .map(|row| StageResponse {
            id: row.id,
            position: row.position,
            name: row.name,
        })
        .collect();

    Ok(Json(stages))
}
