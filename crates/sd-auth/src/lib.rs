//! # sd-auth
//!
//! Bearer-token authentication: JWT issue/verify and argon2 password
//! hashing. The verified token becomes an [`AuthContext`] injected into
//! every handler.

pub mod context;
pub mod jwt;
pub mod password;

pub use context::AuthContext;
pub use jwt::{extract_bearer_token, Claims, JwtError, JwtService};
pub use password::{hash_password, verify_password, PasswordError};
