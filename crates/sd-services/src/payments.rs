//! Payment services
//!
//! Recording a phase checks the live balance rules; marking one paid
//! closes out the client when the schedule is settled.

use chrono::NaiveDate;
use sd_billing::PaymentSummary;
use sd_contracts::{Contract, PaymentPhaseContract};
use sd_core::result::ServiceResult;
use sd_core::traits::UserContext;
use sd_db::{ClientRepository, EstimateRepository, PaymentRepository, PaymentRow};
use sd_models::{stage, CreatePaymentDto, PaymentPhase, PaymentStatus};
use sqlx::PgPool;

fn row_to_phase(row: &PaymentRow) -> PaymentPhase {
    PaymentPhase {
        id: Some(row.id),
        client_id: row.client_id,
        estimate_id: row.estimate_id,
        phase: row.phase,
        amount: row.amount,
        status: PaymentStatus::parse(&row.status).unwrap_or_default(),
        paid_on: row.paid_on,
        recorded_by: row.recorded_by,
        created_at: Some(row.created_at),
        updated_at: Some(row.updated_at),
    }
}

/// Records a new pending phase against an approved estimate.
pub struct RecordPaymentService {
    payments: PaymentRepository,
    estimates: EstimateRepository,
}

impl RecordPaymentService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            payments: PaymentRepository::new(pool.clone()),
            estimates: EstimateRepository::new(pool),
        }
    }

    pub async fn call<U: UserContext>(
        &self,
        user: &U,
        dto: CreatePaymentDto,
    ) -> ServiceResult<PaymentRow> {
        let estimate = match self.estimates.find_by_id(dto.estimate_id).await {
            Ok(Some(row)) => row,
            Ok(None) => return ServiceResult::failure_with_message("Estimate not found"),
            Err(e) => return ServiceResult::failure_with_message(e.to_string()),
        };

        if estimate.status != "approved" {
            return ServiceResult::failure_with_message(
                "Payments can only be recorded against an approved estimate",
            );
        }

        let rows = match self.payments.find_by_client(dto.client_id).await {
            Ok(rows) => rows,
            Err(e) => return ServiceResult::failure_with_message(e.to_string()),
        };
        let phases: Vec<PaymentPhase> = rows.iter().map(row_to_phase).collect();
        let summary = PaymentSummary::compute(estimate.grand_total, &phases);

        if let Err(errors) = PaymentPhaseContract::new(summary).validate(&dto) {
            return ServiceResult::failure(errors);
        }

        let phase = match self.payments.next_phase(dto.client_id).await {
            Ok(phase) => phase,
            Err(e) => return ServiceResult::failure_with_message(e.to_string()),
        };

        let row = match self
            .payments
            .create(sd_db::CreatePaymentDto {
                client_id: dto.client_id,
                estimate_id: dto.estimate_id,
                phase,
                amount: dto.amount,
                recorded_by: Some(user.user_id()),
            })
            .await
        {
            Ok(row) => row,
            Err(e) => return ServiceResult::failure_with_message(e.to_string()),
        };

        tracing::info!(
            payment_id = row.id,
            client_id = row.client_id,
            amount = row.amount,
            phase = row.phase,
            "Payment phase recorded"
        );

        ServiceResult::success(row)
    }
}

/// Marks a pending phase paid; a settled schedule completes the client.
pub struct MarkPaymentPaidService {
    payments: PaymentRepository,
    estimates: EstimateRepository,
    clients: ClientRepository,
}

impl MarkPaymentPaidService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            payments: PaymentRepository::new(pool.clone()),
            estimates: EstimateRepository::new(pool.clone()),
            clients: ClientRepository::new(pool),
        }
    }

    pub async fn call(&self, payment_id: i64, paid_on: NaiveDate) -> ServiceResult<PaymentRow> {
        let existing = match self.payments.find_by_id(payment_id).await {
            Ok(Some(row)) => row,
            Ok(None) => return ServiceResult::failure_with_message("Payment not found"),
            Err(e) => return ServiceResult::failure_with_message(e.to_string()),
        };

        if existing.status == "paid" {
            return ServiceResult::failure_with_message("Payment is already marked paid");
        }

        let row = match self.payments.mark_paid(payment_id, paid_on).await {
            Ok(row) => row,
            Err(e) => return ServiceResult::failure_with_message(e.to_string()),
        };

        // Close out the client once the full grand total has come in.
        if let Ok(Some(estimate)) = self.estimates.find_by_id(row.estimate_id).await {
            match self.payments.sum_paid(row.client_id).await {
                Ok(received) if received >= estimate.grand_total => {
                    if let Err(e) = self
                        .clients
                        .set_stage(row.client_id, stage::COMPLETED, true)
                        .await
                    {
                        tracing::warn!(client_id = row.client_id, "Failed to complete client: {}", e);
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::warn!("Failed to total payments: {}", e),
            }
        }

        tracing::info!(payment_id, "Payment marked paid");

        ServiceResult::success(row)
    }
}
