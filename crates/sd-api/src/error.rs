//! API error handling
//!
//! Every failure becomes a JSON body with a `message` field and the
//! status the original callers branch on: 404 for missing records, 409
//! for duplicates, 422 for field validation, 500 otherwise.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sd_core::error::ValidationErrors;
use sd_db::RepositoryError;
use serde::Serialize;

/// API error types
#[derive(Debug)]
pub enum ApiError {
    NotFound { resource: &'static str, id: String },
    Validation(ValidationErrors),
    Unauthorized(String),
    Forbidden(String),
    BadRequest(String),
    Conflict(String),
    Internal(String),
}

impl ApiError {
    pub fn not_found(resource: &'static str, id: impl std::fmt::Display) -> Self {
        ApiError::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        ApiError::Unauthorized(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        ApiError::Forbidden(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        ApiError::BadRequest(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        ApiError::Conflict(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        ApiError::Internal(msg.into())
    }

    /// Map a repository failure onto the wire statuses.
    pub fn from_repo(e: RepositoryError, resource: &'static str) -> Self {
        match e {
            RepositoryError::NotFound(_) => ApiError::NotFound {
                resource,
                id: "?".into(),
            },
            RepositoryError::Validation(msg) => ApiError::BadRequest(msg),
            RepositoryError::Conflict(msg) => ApiError::Conflict(msg),
            RepositoryError::Database(e) => ApiError::Internal(format!("Database error: {}", e)),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            ApiError::NotFound { resource, id } => ErrorBody {
                message: format!("{} with id {} not found", resource, id),
                errors: vec![],
            },
            ApiError::Validation(errors) => ErrorBody {
                message: errors
                    .first_message()
                    .unwrap_or_else(|| "Validation failed".to_string()),
                errors: errors.full_messages(),
            },
            ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::BadRequest(msg)
            | ApiError::Conflict(msg) => ErrorBody {
                message: msg.clone(),
                errors: vec![],
            },
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                ErrorBody {
                    message: "Something went wrong".to_string(),
                    errors: vec![],
                }
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::not_found("Client", 7).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::conflict("duplicate").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::from_repo(RepositoryError::Conflict("x".into()), "Client").status_code(),
            StatusCode::CONFLICT
        );
    }
}
