//! Estimate services
//!
//! Creation validates every material line through the contract before
//! totals are computed or anything is written; approval moves the
//! client's stage forward.

use sd_billing::EstimateTotals;
use sd_contracts::{Contract, EstimateContract};
use sd_core::result::ServiceResult;
use sd_core::traits::UserContext;
use sd_db::{ClientRepository, EstimateRepository, Repository};
use sd_models::{stage, CreateEstimateDto, Estimate, EstimateStatus, MaterialLine};
use sqlx::PgPool;

/// Creates an estimate with computed totals.
pub struct CreateEstimateService {
    estimates: EstimateRepository,
    clients: ClientRepository,
}

impl CreateEstimateService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            estimates: EstimateRepository::new(pool.clone()),
            clients: ClientRepository::new(pool),
        }
    }

    pub async fn call<U: UserContext>(
        &self,
        user: &U,
        dto: CreateEstimateDto,
    ) -> ServiceResult<sd_db::EstimateRow> {
        let client = match self.clients.find_by_id(dto.client_id).await {
            Ok(Some(client)) => client,
            Ok(None) => return ServiceResult::failure_with_message("Client not found"),
            Err(e) => return ServiceResult::failure_with_message(e.to_string()),
        };

        let mut lines: Vec<MaterialLine> = dto.lines.into_iter().map(Into::into).collect();

        // Validate before any totals are computed or documents offered.
        let draft = Estimate {
            id: None,
            client_id: dto.client_id,
            lines: lines.clone(),
            subtotal: 0.0,
            discount: 0.0,
            grand_total: 0,
            status: EstimateStatus::Pending,
            created_by: Some(user.user_id()),
            created_at: None,
            updated_at: None,
        };
        if let Err(errors) = EstimateContract.validate(&draft) {
            return ServiceResult::failure(errors);
        }

        let totals = EstimateTotals::compute(&mut lines, dto.custom_total);

        let create = sd_db::CreateEstimateDto {
            client_id: dto.client_id,
            subtotal: totals.subtotal,
            discount: totals.discount,
            grand_total: totals.grand_total,
            created_by: Some(user.user_id()),
            items: lines
                .iter()
                .map(|line| sd_db::CreateEstimateItemDto {
                    name: line.name.clone(),
                    category_id: line.category_id,
                    subcategory_id: line.subcategory_id,
                    measurement_type: line.measurement_type.as_str().to_string(),
                    length_cm: line.length_cm,
                    breadth_cm: line.breadth_cm,
                    quantity: line.quantity,
                    unit_price: line.unit_price,
                    line_total: line.line_total,
                })
                .collect(),
        };

        let row = match self.estimates.create(create).await {
            Ok(row) => row,
            Err(e) => return ServiceResult::failure_with_message(e.to_string()),
        };

        // First estimate moves a fresh client onto the next milestone.
        if client.stage < stage::ESTIMATE_PREPARED {
            if let Err(e) = self
                .clients
                .set_stage(client.id, stage::ESTIMATE_PREPARED, false)
                .await
            {
                tracing::warn!(client_id = client.id, "Failed to advance stage: {}", e);
            }
        }

        tracing::info!(
            estimate_id = row.id,
            client_id = row.client_id,
            grand_total = row.grand_total,
            "Estimate created"
        );

        ServiceResult::success(row)
    }
}

/// Approves or rejects a pending estimate.
pub struct UpdateEstimateStatusService {
    estimates: EstimateRepository,
    clients: ClientRepository,
}

impl UpdateEstimateStatusService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            estimates: EstimateRepository::new(pool.clone()),
            clients: ClientRepository::new(pool),
        }
    }

    pub async fn call(
        &self,
        estimate_id: i64,
        status: EstimateStatus,
    ) -> ServiceResult<sd_db::EstimateRow> {
        let existing = match self.estimates.find_by_id(estimate_id).await {
            Ok(Some(row)) => row,
            Ok(None) => return ServiceResult::failure_with_message("Estimate not found"),
            Err(e) => return ServiceResult::failure_with_message(e.to_string()),
        };

        if existing.status != EstimateStatus::Pending.as_str() {
            return ServiceResult::failure_with_message("Only pending estimates can be decided");
        }

        let row = match self.estimates.set_status(estimate_id, status.as_str()).await {
            Ok(row) => row,
            Err(e) => return ServiceResult::failure_with_message(e.to_string()),
        };

        if status == EstimateStatus::Approved {
            if let Err(e) = self
                .clients
                .set_stage(row.client_id, stage::APPROVED, false)
                .await
            {
                tracing::warn!(client_id = row.client_id, "Failed to advance stage: {}", e);
            }
        }

        tracing::info!(estimate_id, status = status.as_str(), "Estimate decided");

        ServiceResult::success(row)
    }
}
