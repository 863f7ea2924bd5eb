//! Bank accounts repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::repository::{Repository, RepositoryError, RepositoryResult};

#[derive(Debug, Clone, FromRow)]
pub struct BankRow {
    pub id: i64,
    pub bank_name: String,
    pub account_name: String,
    pub account_number: String,
    pub ifsc: String,
    pub upi_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateBankDto {
    pub bank_name: String,
    pub account_name: String,
    pub account_number: String,
    pub ifsc: String,
    pub upi_id: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateBankDto {
    pub bank_name: Option<String>,
    pub account_name: Option<String>,
    pub account_number: Option<String>,
    pub ifsc: Option<String>,
    pub upi_id: Option<String>,
}

const COLUMNS: &str =
    "id, bank_name, account_name, account_number, ifsc, upi_id, created_at, updated_at";

pub struct BankRepository {
    pool: PgPool,
}

impl BankRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<BankRow, CreateBankDto, UpdateBankDto> for BankRepository {
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<BankRow>> {
        let row = sqlx::query_as::<_, BankRow>(&format!("SELECT {COLUMNS} FROM banks WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    async fn find_all(&self, limit: i64, offset: i64) -> RepositoryResult<Vec<BankRow>> {
        let rows = sqlx::query_as::<_, BankRow>(&format!(
            "SELECT {COLUMNS} FROM banks ORDER BY bank_name ASC LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn count(&self) -> RepositoryResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM banks")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn create(&self, dto: CreateBankDto) -> RepositoryResult<BankRow> {
        if dto.account_number.trim().is_empty() {
            return Err(RepositoryError::Validation(
                "Account number can't be blank".to_string(),
            ));
        }

        let duplicate = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM banks WHERE account_number = $1",
        )
        .bind(&dto.account_number)
        .fetch_one(&self.pool)
        .await?;
        if duplicate > 0 {
            return Err(RepositoryError::Conflict(
                "Account number has already been taken".to_string(),
            ));
        }

        let row = sqlx::query_as::<_, BankRow>(&format!(
            r#"
            INSERT INTO banks (bank_name, account_name, account_number, ifsc, upi_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, NOW(), NOW())
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&dto.bank_name)
        .bind(&dto.account_name)
        .bind(&dto.account_number)
        .bind(&dto.ifsc)
        .bind(&dto.upi_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update(&self, id: i64, dto: UpdateBankDto) -> RepositoryResult<BankRow> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("Bank {} not found", id)))?;

        let bank_name = dto.bank_name.unwrap_or(existing.bank_name);
        let account_name = dto.account_name.unwrap_or(existing.account_name);
        let account_number = dto.account_number.unwrap_or(existing.account_number);
        let ifsc = dto.ifsc.unwrap_or(existing.ifsc);
        let upi_id = dto.upi_id.or(existing.upi_id);

        let row = sqlx::query_as::<_, BankRow>(&format!(
            r#"
            UPDATE banks
            SET bank_name = $2, account_name = $3, account_number = $4, ifsc = $5, upi_id = $6, updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&bank_name)
        .bind(&account_name)
        .bind(&account_number)
        .bind(&ifsc)
        .bind(&upi_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn exists(&self, id: i64) -> RepositoryResult<bool> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM banks WHERE id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count > 0)
    }
}
