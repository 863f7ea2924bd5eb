//! Bank accounts
//!
//! Selected per-invoice to populate the payment instructions block and,
//! when a UPI id is present, the generated payment QR code.

use chrono::{DateTime, Utc};
use sd_core::traits::{Id, Identifiable, Timestamped};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BankAccount {
    pub id: Option<Id>,

    #[validate(length(min = 1, max = 100))]
    pub bank_name: String,

    #[validate(length(min = 1, max = 255))]
    pub account_name: String,

    #[validate(length(min = 1, max = 34))]
    pub account_number: String,

    #[validate(length(min = 1, max = 11))]
    pub ifsc: String,

    /// Optional; without it the QR block is omitted from documents
    pub upi_id: Option<String>,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Identifiable for BankAccount {
    fn id(&self) -> Option<Id> {
        self.id
    }
}

impl Timestamped for BankAccount {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}

/// DTO for creating a bank account
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBankAccountDto {
    #[validate(length(min = 1, max = 100))]
    pub bank_name: String,

    #[validate(length(min = 1, max = 255))]
    pub account_name: String,

    #[validate(length(min = 1, max = 34))]
    pub account_number: String,

    #[validate(length(min = 1, max = 11))]
    pub ifsc: String,

    pub upi_id: Option<String>,
}
