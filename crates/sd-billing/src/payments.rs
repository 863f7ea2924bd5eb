//! Payment schedule arithmetic
//!
//! Running balance for a project: what has been received, what remains,
//! and whether a new phase may be offered.

use sd_models::PaymentPhase;

/// Snapshot of a client's payment position against an estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentSummary {
    pub grand_total: i64,
    /// Sum of phases with status paid
    pub total_received: i64,
    /// grand_total - total_received, floored at zero for display
    pub remaining_balance: i64,
    /// Whether any phase is still awaiting payment
    pub has_pending: bool,
}

impl PaymentSummary {
    pub fn compute(grand_total: i64, phases: &[PaymentPhase]) -> Self {
        let total_received: i64 = phases.iter().filter(|p| p.is_paid()).map(|p| p.amount).sum();
        let has_pending = phases.iter().any(|p| !p.is_paid());

        Self {
            grand_total,
            total_received,
            remaining_balance: (grand_total - total_received).max(0),
            has_pending,
        }
    }

    /// A new phase is offerable only while something is still owed and
    /// no earlier phase is awaiting payment.
    pub fn can_offer_phase(&self) -> bool {
        self.remaining_balance > 0 && !self.has_pending
    }

    /// Largest amount accepted for the next phase.
    pub fn max_phase_amount(&self) -> i64 {
        self.remaining_balance
    }

    /// Share of the grand total received so far, in whole percent.
    pub fn percent_received(&self) -> i64 {
        if self.grand_total <= 0 {
            return 0;
        }
        self.total_received * 100 / self.grand_total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sd_models::PaymentStatus;

    fn phase(amount: i64, status: PaymentStatus) -> PaymentPhase {
        PaymentPhase {
            id: None,
            client_id: 1,
            estimate_id: 1,
            phase: 1,
            amount,
            status,
            paid_on: None,
            recorded_by: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_half_paid_project() {
        // Grand total 100 000 with one paid phase of 50 000.
        let phases = vec![phase(50_000, PaymentStatus::Paid)];
        let summary = PaymentSummary::compute(100_000, &phases);

        assert_eq!(summary.total_received, 50_000);
        assert_eq!(summary.remaining_balance, 50_000);
        assert_eq!(summary.percent_received(), 50);
        assert!(summary.can_offer_phase());
        assert_eq!(summary.max_phase_amount(), 50_000);
    }

    #[test]
    fn test_pending_phase_blocks_new_one() {
        let phases = vec![
            phase(50_000, PaymentStatus::Paid),
            phase(25_000, PaymentStatus::Pending),
        ];
        let summary = PaymentSummary::compute(100_000, &phases);

        assert_eq!(summary.total_received, 50_000);
        assert!(summary.has_pending);
        assert!(!summary.can_offer_phase());
    }

    #[test]
    fn test_settled_project_offers_nothing() {
        let phases = vec![
            phase(60_000, PaymentStatus::Paid),
            phase(40_000, PaymentStatus::Paid),
        ];
        let summary = PaymentSummary::compute(100_000, &phases);

        assert_eq!(summary.remaining_balance, 0);
        assert!(!summary.can_offer_phase());
    }

    #[test]
    fn test_balance_never_negative() {
        let phases = vec![phase(120_000, PaymentStatus::Paid)];
        let summary = PaymentSummary::compute(100_000, &phases);

        assert_eq!(summary.remaining_balance, 0);
    }

    #[test]
    fn test_empty_schedule() {
        let summary = PaymentSummary::compute(100_000, &[]);
        assert_eq!(summary.total_received, 0);
        assert_eq!(summary.remaining_balance, 100_000);
        assert!(summary.can_offer_phase());
    }
}
