//! Payment phase contract
//!
//! A new phase must fit the live balance: something still owed, no phase
//! already pending, and an amount within what remains.

use sd_billing::PaymentSummary;
use sd_core::error::ValidationErrors;
use sd_models::CreatePaymentDto;

use crate::base::{Contract, ValidationResult};

pub struct PaymentPhaseContract {
    summary: PaymentSummary,
}

impl PaymentPhaseContract {
    pub fn new(summary: PaymentSummary) -> Self {
        Self { summary }
    }
}

impl Contract<CreatePaymentDto> for PaymentPhaseContract {
    fn validate(&self, dto: &CreatePaymentDto) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        if self.summary.has_pending {
            errors.add_base("a phase is already awaiting payment");
        } else if self.summary.remaining_balance <= 0 {
            errors.add_base("nothing remains to be paid");
        }

        if dto.amount <= 0 {
            errors.add("amount", "must be greater than zero");
        } else if dto.amount > self.summary.max_phase_amount() {
            errors.add("amount", "exceeds the remaining balance");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sd_models::{PaymentPhase, PaymentStatus};

    fn paid_phase(amount: i64) -> PaymentPhase {
        PaymentPhase {
            id: None,
            client_id: 1,
            estimate_id: 1,
            phase: 1,
            amount,
            status: PaymentStatus::Paid,
            paid_on: None,
            recorded_by: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn dto(amount: i64) -> CreatePaymentDto {
        CreatePaymentDto {
            client_id: 1,
            estimate_id: 1,
            amount,
        }
    }

    #[test]
    fn test_phase_within_balance_is_accepted() {
        let summary = PaymentSummary::compute(100_000, &[paid_phase(50_000)]);
        let contract = PaymentPhaseContract::new(summary);
        assert!(contract.validate(&dto(50_000)).is_ok());
    }

    #[test]
    fn test_phase_over_balance_is_rejected() {
        let summary = PaymentSummary::compute(100_000, &[paid_phase(50_000)]);
        let contract = PaymentPhaseContract::new(summary);
        let errors = contract.validate(&dto(50_001)).unwrap_err();
        assert!(errors.has_error("amount"));
    }

    #[test]
    fn test_pending_phase_blocks_creation() {
        let mut pending = paid_phase(25_000);
        pending.status = PaymentStatus::Pending;
        let summary = PaymentSummary::compute(100_000, &[paid_phase(50_000), pending]);
        let contract = PaymentPhaseContract::new(summary);
        assert!(contract.validate(&dto(10_000)).is_err());
    }

    #[test]
    fn test_zero_amount_is_rejected() {
        let summary = PaymentSummary::compute(100_000, &[]);
        let contract = PaymentPhaseContract::new(summary);
        let errors = contract.validate(&dto(0)).unwrap_err();
        assert!(errors.has_error("amount"));
    }
}
