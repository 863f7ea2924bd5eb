//! # sd-api
//!
//! REST resource layer: axum handlers, request extractors, and the
//! status-mapped error envelope. Routes live under `/api`.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod routes;

pub use error::{ApiError, ApiResult};
pub use extractors::{AppState, AuthenticatedUser, Pagination};
pub use routes::router;
