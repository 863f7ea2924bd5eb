//! # sd-services
//!
//! Service objects for the flows with business rules: creating
//! estimates, approving them, recording payment phases. Plain CRUD goes
//! straight from handlers to repositories; anything that validates
//! against a contract or touches more than one entity lives here.

pub mod clients;
pub mod estimates;
pub mod payments;

pub use clients::{AdvanceStageService, CreateClientService};
pub use estimates::{CreateEstimateService, UpdateEstimateStatusService};
pub use payments::{MarkPaymentPaidService, RecordPaymentService};
