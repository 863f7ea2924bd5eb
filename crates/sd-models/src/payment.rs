//! Payment phases
//!
//! A client pays in installments ("phases") against the approved
//! estimate's grand total. Phase admission rules live in sd-billing and
//! sd-contracts.

use chrono::{DateTime, NaiveDate, Utc};
use sd_core::traits::{Id, Identifiable, Timestamped};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "paid" => Some(Self::Paid),
            _ => None,
        }
    }
}

/// One installment of a client's payment schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentPhase {
    pub id: Option<Id>,
    pub client_id: Id,
    pub estimate_id: Id,
    /// 1-based position in the schedule
    pub phase: i32,
    /// Whole rupees
    pub amount: i64,
    #[serde(default)]
    pub status: PaymentStatus,
    pub paid_on: Option<NaiveDate>,
    pub recorded_by: Option<Id>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Identifiable for PaymentPhase {
    fn id(&self) -> Option<Id> {
        self.id
    }
}

impl Timestamped for PaymentPhase {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}

impl PaymentPhase {
    pub fn is_paid(&self) -> bool {
        self.status == PaymentStatus::Paid
    }
}

/// DTO for recording a new phase
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentDto {
    pub client_id: Id,
    pub estimate_id: Id,
    pub amount: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        assert_eq!(PaymentStatus::parse("paid"), Some(PaymentStatus::Paid));
        assert_eq!(PaymentStatus::parse("cancelled"), None);
        assert_eq!(PaymentStatus::Pending.as_str(), "pending");
    }
}
