//! Clients repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::repository::{PaginatedResult, Pagination, Repository, RepositoryError, RepositoryResult};

/// Client row from database
#[derive(Debug, Clone, FromRow)]
pub struct ClientRow {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub stage: i16,
    pub completed: bool,
    pub active: bool,
    pub created_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a client
#[derive(Debug, Clone)]
pub struct CreateClientDto {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub created_by: Option<i64>,
}

/// DTO for updating a client
#[derive(Debug, Clone, Default)]
pub struct UpdateClientDto {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub active: Option<bool>,
}

const COLUMNS: &str =
    "id, name, phone, email, address, city, stage, completed, active, created_by, created_at, updated_at";

/// Client repository
pub struct ClientRepository {
    pool: PgPool,
}

impl ClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Active clients, newest first
    pub async fn find_active(
        &self,
        pagination: Pagination,
    ) -> RepositoryResult<PaginatedResult<ClientRow>> {
        let items = sqlx::query_as::<_, ClientRow>(&format!(
            "SELECT {COLUMNS} FROM clients WHERE active ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        ))
        .bind(pagination.limit)
        .bind(pagination.offset)
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM clients WHERE active")
            .fetch_one(&self.pool)
            .await?;

        Ok(PaginatedResult::new(items, total, pagination))
    }

    async fn is_phone_unique(&self, phone: &str, exclude_id: Option<i64>) -> RepositoryResult<bool> {
        let count = if let Some(id) = exclude_id {
            sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM clients WHERE phone = $1 AND id != $2",
            )
            .bind(phone)
            .bind(id)
            .fetch_one(&self.pool)
            .await?
        } else {
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM clients WHERE phone = $1")
                .bind(phone)
                .fetch_one(&self.pool)
                .await?
        };

        Ok(count == 0)
    }

    /// Move a client's stage marker; completion is derived from it.
    pub async fn set_stage(&self, id: i64, stage: i16, completed: bool) -> RepositoryResult<ClientRow> {
        let row = sqlx::query_as::<_, ClientRow>(&format!(
            "UPDATE clients SET stage = $2, completed = $3, updated_at = NOW() WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(stage)
        .bind(completed)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| RepositoryError::NotFound(format!("Client {} not found", id)))?;

        Ok(row)
    }
}

#[async_trait]
impl Repository<ClientRow, CreateClientDto, UpdateClientDto> for ClientRepository {
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<ClientRow>> {
        let row = sqlx::query_as::<_, ClientRow>(&format!(
            "SELECT {COLUMNS} FROM clients WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_all(&self, limit: i64, offset: i64) -> RepositoryResult<Vec<ClientRow>> {
        let rows = sqlx::query_as::<_, ClientRow>(&format!(
            "SELECT {COLUMNS} FROM clients ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn count(&self) -> RepositoryResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM clients")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn create(&self, dto: CreateClientDto) -> RepositoryResult<ClientRow> {
        if dto.name.trim().is_empty() {
            return Err(RepositoryError::Validation("Name can't be blank".to_string()));
        }

        if !self.is_phone_unique(&dto.phone, None).await? {
            return Err(RepositoryError::Conflict(
                "Phone number has already been taken".to_string(),
            ));
        }

        let row = sqlx::query_as::<_, ClientRow>(&format!(
            r#"
            INSERT INTO clients (name, phone, email, address, city, created_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, NOW(), NOW())
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&dto.name)
        .bind(&dto.phone)
        .bind(&dto.email)
        .bind(&dto.address)
        .bind(&dto.city)
        .bind(dto.created_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update(&self, id: i64, dto: UpdateClientDto) -> RepositoryResult<ClientRow> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("Client {} not found", id)))?;

        let name = dto.name.unwrap_or(existing.name);
        let phone = dto.phone.unwrap_or(existing.phone);
        let email = dto.email.or(existing.email);
        let address = dto.address.or(existing.address);
        let city = dto.city.or(existing.city);
        let active = dto.active.unwrap_or(existing.active);

        if name.trim().is_empty() {
            return Err(RepositoryError::Validation("Name can't be blank".to_string()));
        }

        if !self.is_phone_unique(&phone, Some(id)).await? {
            return Err(RepositoryError::Conflict(
                "Phone number has already been taken".to_string(),
            ));
        }

        let row = sqlx::query_as::<_, ClientRow>(&format!(
            r#"
            UPDATE clients
            SET name = $2, phone = $3, email = $4, address = $5, city = $6, active = $7, updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&name)
        .bind(&phone)
        .bind(&email)
        .bind(&address)
        .bind(&city)
        .bind(active)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn exists(&self, id: i64) -> RepositoryResult<bool> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM clients WHERE id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_dto() {
        let dto = CreateClientDto {
            name: "Asha Varma".to_string(),
            phone: "9876543210".to_string(),
            email: None,
            address: Some("14 Lake Road".to_string()),
            city: Some("Pune".to_string()),
            created_by: Some(1),
        };

        assert_eq!(dto.name, "Asha Varma");
        assert_eq!(dto.city.as_deref(), Some("Pune"));
    }
}
