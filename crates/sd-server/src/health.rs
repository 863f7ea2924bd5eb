//! Health checks

use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use sd_api::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub status: HealthStatus,
    pub version: &'static str,
    pub database: bool,
    pub response_time_ms: u64,
}

/// GET /health
///
/// Healthy with a reachable database, degraded without one.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let started = Instant::now();

    let database = match &state.db {
        Some(pool) => sqlx::query("SELECT 1").execute(pool).await.is_ok(),
        None => false,
    };

    let status = if database {
        HealthStatus::Healthy
    } else {
        HealthStatus::Degraded
    };

    let report = HealthReport {
        status,
        version: env!("CARGO_PKG_VERSION"),
        database,
        response_time_ms: started.elapsed().as_millis() as u64,
    };

    (StatusCode::OK, Json(report))
}

/// GET /health/live
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}
