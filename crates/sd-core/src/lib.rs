//! # sd-core
//!
//! Core types, traits, and utilities for Sitedesk.
//!
//! This crate provides the foundational building blocks used across all other crates:
//! - Common error types and validation errors
//! - Result type aliases and the ServiceResult envelope
//! - Core traits (Identifiable, Timestamped, SoftDeletable, UserContext)
//! - Pagination types
//! - Configuration types

pub mod config;
pub mod error;
pub mod pagination;
pub mod result;
pub mod traits;

pub use config::*;
pub use error::*;
pub use pagination::*;
pub use result::*;
pub use traits::*;
