//! # sd-models
//!
//! Domain models for Sitedesk: the plain records exchanged over the API.
//! Each model carries its create/update DTOs; computation over these
//! records lives in `sd-billing`.

pub mod bank;
pub mod category;
pub mod client;
pub mod estimate;
pub mod expense;
pub mod material;
pub mod payment;
pub mod stage;
pub mod user;

pub use bank::*;
pub use category::*;
pub use client::*;
pub use estimate::*;
pub use expense::*;
pub use material::*;
pub use payment::*;
pub use stage::*;
pub use user::*;
