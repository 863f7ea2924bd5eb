//! # sd-contracts
//!
//! Validation contracts. A contract checks an entity before anything is
//! persisted or rendered and reports field-specific messages through
//! `ValidationErrors`.

pub mod base;
pub mod clients;
pub mod estimates;
pub mod payments;
pub mod reference;

pub use base::*;
pub use clients::*;
pub use estimates::*;
pub use payments::*;
pub use reference::*;
