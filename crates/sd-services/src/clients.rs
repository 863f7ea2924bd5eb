//! Client services

use sd_contracts::{ClientContract, Contract};
use sd_core::result::ServiceResult;
use sd_core::traits::UserContext;
use sd_db::{ClientRepository, ClientRow, Repository};
use sd_models::{stage, Client, CreateClientDto};
use sqlx::PgPool;

/// Creates a client after contract validation.
pub struct CreateClientService {
    clients: ClientRepository,
}

impl CreateClientService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            clients: ClientRepository::new(pool),
        }
    }

    pub async fn call<U: UserContext>(
        &self,
        user: &U,
        dto: CreateClientDto,
    ) -> ServiceResult<ClientRow> {
        let draft: Client = dto.clone().into();
        if let Err(errors) = ClientContract.validate(&draft) {
            return ServiceResult::failure(errors);
        }

        let result = self
            .clients
            .create(sd_db::CreateClientDto {
                name: dto.name,
                phone: dto.phone,
                email: dto.email,
                address: dto.address,
                city: dto.city,
                created_by: Some(user.user_id()),
            })
            .await;

        match result {
            Ok(row) => {
                tracing::info!(client_id = row.id, "Client created");
                ServiceResult::success(row)
            }
            Err(sd_db::RepositoryError::Conflict(msg)) => {
                let mut errors = sd_core::error::ValidationErrors::new();
                errors.add("phone", msg);
                ServiceResult::failure(errors)
            }
            Err(e) => ServiceResult::failure_with_message(e.to_string()),
        }
    }
}

/// Moves a client to the next stage milestone, marking completion at
/// the last one. Completed clients stay where they are.
pub struct AdvanceStageService {
    clients: ClientRepository,
}

impl AdvanceStageService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            clients: ClientRepository::new(pool),
        }
    }

    pub async fn call(&self, client_id: i64) -> ServiceResult<ClientRow> {
        let client = match self.clients.find_by_id(client_id).await {
            Ok(Some(row)) => row,
            Ok(None) => return ServiceResult::failure_with_message("Client not found"),
            Err(e) => return ServiceResult::failure_with_message(e.to_string()),
        };

        if client.completed || client.stage >= stage::COMPLETED {
            return ServiceResult::failure_with_message("Project is already completed");
        }

        let next = client.stage + 1;
        let completed = next >= stage::COMPLETED;

        match self.clients.set_stage(client_id, next, completed).await {
            Ok(row) => {
                tracing::info!(client_id, stage = next, "Client stage advanced");
                ServiceResult::success(row)
            }
            Err(e) => ServiceResult::failure_with_message(e.to_string()),
        }
    }
}
