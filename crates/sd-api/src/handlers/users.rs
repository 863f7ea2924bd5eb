//! Users and login

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use sd_auth::{hash_password, verify_password};
use sd_core::traits::UserContext;
use sd_db::{UserRepository, UserRow};
use sd_models::{CreateUserDto, LoginDto};
use serde::Serialize;

use crate::error::{ApiError, ApiResult};
use crate::extractors::{AppState, AuthenticatedUser};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UserResponse {
    id: i64,
    name: String,
    phone: String,
    admin: bool,
}

impl UserResponse {
    fn from_row(row: UserRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            phone: row.phone,
            admin: row.admin,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    token: String,
    user: UserResponse,
}

/// POST /api/users/login
pub async fn login(
    State(state): State<AppState>,
    Json(dto): Json<LoginDto>,
) -> ApiResult<impl IntoResponse> {
    let pool = state.pool()?;
    let repo = UserRepository::new(pool.clone());

    let user = repo
        .find_by_phone(&dto.phone)
        .await
        .map_err(|e| ApiError::from_repo(e, "User"))?
        .ok_or_else(|| ApiError::unauthorized("Invalid phone or password"))?;

    let valid = verify_password(&dto.password, &user.password_digest)
        .map_err(|e| ApiError::internal(e.to_string()))?;
    if !valid {
        return Err(ApiError::unauthorized("Invalid phone or password"));
    }

    let token = state
        .jwt
        .create_token(
            user.id,
            Some(user.name.clone()),
            user.admin,
            state.config.auth.token_expiration_seconds,
        )
        .map_err(|e| ApiError::internal(e.to_string()))?;

    Ok(Json(LoginResponse {
        token,
        user: UserResponse::from_row(user),
    }))
}

/// POST /api/users
///
/// The first user bootstraps the system; after that only admins may
/// create accounts.
pub async fn create_user(
    State(state): State<AppState>,
    user: Option<AuthenticatedUser>,
    Json(dto): Json<CreateUserDto>,
) -> ApiResult<impl IntoResponse> {
    let pool = state.pool()?;
    let repo = UserRepository::new(pool.clone());

    let existing = repo
        .find_all(1, 0)
        .await
        .map_err(|e| ApiError::from_repo(e, "User"))?;
    if !existing.is_empty() {
        match user {
            Some(user) if user.is_admin() => {}
            _ => return Err(ApiError::forbidden("Only administrators can create users.")),
        }
    }

    if dto.password.len() < 8 {
        return Err(ApiError::bad_request("Password must be at least 8 characters"));
    }

    let digest = hash_password(&dto.password).map_err(|e| ApiError::internal(e.to_string()))?;

    let row = repo
        .create(sd_db::CreateUserDto {
            name: dto.name,
            phone: dto.phone,
            password_digest: digest,
            admin: dto.admin,
        })
        .await
        .map_err(|e| ApiError::from_repo(e, "User"))?;

    Ok((StatusCode::CREATED, Json(UserResponse::from_row(row))))
}

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> ApiResult<impl IntoResponse> {
    let pool = state.pool()?;
    let repo = UserRepository::new(pool.clone());

    let rows = repo
        .find_all(100, 0)
        .await
        .map_err(|e| ApiError::from_repo(e, "User"))?;

    let users: Vec<UserResponse> = rows.into_iter().map(UserResponse::from_row).collect();
    Ok(Json(users))
}
