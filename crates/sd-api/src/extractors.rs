//! Axum extractors for API handlers

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts, Query},
    http::request::Parts,
};
use sd_auth::{extract_bearer_token, AuthContext, JwtService};
use sd_core::config::AppConfig;
use sqlx::PgPool;

use crate::error::ApiError;

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub jwt: Arc<JwtService>,
    /// Absent when the server runs without a reachable database
    pub db: Option<PgPool>,
}

impl AppState {
    pub fn new(config: AppConfig, db: Option<PgPool>) -> Self {
        let jwt = Arc::new(JwtService::new(config.auth.jwt_secret.as_bytes()));
        Self {
            config: Arc::new(config),
            jwt,
            db,
        }
    }

    pub fn pool(&self) -> Result<&PgPool, ApiError> {
        self.db
            .as_ref()
            .ok_or_else(|| ApiError::internal("Database is not available"))
    }
}

/// Authenticated caller, built from a verified bearer token.
pub struct AuthenticatedUser(pub AuthContext);

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::unauthorized("Authentication required"))?;

        let token = extract_bearer_token(header)
            .ok_or_else(|| ApiError::unauthorized("Authentication required"))?;

        let claims = app_state
            .jwt
            .validate_token(token)
            .map_err(|e| ApiError::unauthorized(e.to_string()))?;

        AuthContext::from_claims(&claims)
            .map(AuthenticatedUser)
            .ok_or_else(|| ApiError::unauthorized("Invalid token subject"))
    }
}

impl std::ops::Deref for AuthenticatedUser {
    type Target = AuthContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Pagination query parameters
pub struct Pagination(pub sd_core::pagination::PaginationParams);

#[async_trait]
impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) =
            Query::<sd_core::pagination::PaginationParams>::from_request_parts(parts, state)
                .await
                .unwrap_or_else(|_| Query(sd_core::pagination::PaginationParams::default()));
        Ok(Pagination(params))
    }
}

impl std::ops::Deref for Pagination {
    type Target = sd_core::pagination::PaginationParams;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
