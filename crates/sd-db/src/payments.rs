//! Client payments repository

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};

use crate::repository::{RepositoryError, RepositoryResult};

#[derive(Debug, Clone, FromRow)]
pub struct PaymentRow {
    pub id: i64,
    pub client_id: i64,
    pub estimate_id: i64,
    pub phase: i32,
    pub amount: i64,
    /// "pending" or "paid"
    pub status: String,
    pub paid_on: Option<NaiveDate>,
    pub recorded_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreatePaymentDto {
    pub client_id: i64,
    pub estimate_id: i64,
    pub phase: i32,
    pub amount: i64,
    pub recorded_by: Option<i64>,
}

const COLUMNS: &str =
    "id, client_id, estimate_id, phase, amount, status, paid_on, recorded_by, created_at, updated_at";

pub struct PaymentRepository {
    pool: PgPool,
}

impl PaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<PaymentRow>> {
        let row = sqlx::query_as::<_, PaymentRow>(&format!(
            "SELECT {COLUMNS} FROM client_payments WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Full schedule for a client, in phase order
    pub async fn find_by_client(&self, client_id: i64) -> RepositoryResult<Vec<PaymentRow>> {
        let rows = sqlx::query_as::<_, PaymentRow>(&format!(
            "SELECT {COLUMNS} FROM client_payments WHERE client_id = $1 ORDER BY phase ASC"
        ))
        .bind(client_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Sum of phases already paid for a client
    pub async fn sum_paid(&self, client_id: i64) -> RepositoryResult<i64> {
        let total = sqlx::query_scalar::<_, Option<i64>>(
            "SELECT SUM(amount) FROM client_payments WHERE client_id = $1 AND status = 'paid'",
        )
        .bind(client_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(total.unwrap_or(0))
    }

    pub async fn has_pending(&self, client_id: i64) -> RepositoryResult<bool> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM client_payments WHERE client_id = $1 AND status = 'pending'",
        )
        .bind(client_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count > 0)
    }

    /// Next 1-based phase number for a client
    pub async fn next_phase(&self, client_id: i64) -> RepositoryResult<i32> {
        let max = sqlx::query_scalar::<_, Option<i32>>(
            "SELECT MAX(phase) FROM client_payments WHERE client_id = $1",
        )
        .bind(client_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(max.unwrap_or(0) + 1)
    }

    pub async fn create(&self, dto: CreatePaymentDto) -> RepositoryResult<PaymentRow> {
        if dto.amount <= 0 {
            return Err(RepositoryError::Validation(
                "Amount must be greater than zero".to_string(),
            ));
        }

        let row = sqlx::query_as::<_, PaymentRow>(&format!(
            r#"
            INSERT INTO client_payments (client_id, estimate_id, phase, amount, status, recorded_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, 'pending', $5, NOW(), NOW())
            RETURNING {COLUMNS}
            "#
        ))
        .bind(dto.client_id)
        .bind(dto.estimate_id)
        .bind(dto.phase)
        .bind(dto.amount)
        .bind(dto.recorded_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Mark a pending phase paid, stamping the payment date.
    pub async fn mark_paid(&self, id: i64, paid_on: NaiveDate) -> RepositoryResult<PaymentRow> {
        let row = sqlx::query_as::<_, PaymentRow>(&format!(
            r#"
            UPDATE client_payments
            SET status = 'paid', paid_on = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(paid_on)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| RepositoryError::NotFound(format!("Payment {} not found", id)))?;

        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_dto() {
        let dto = CreatePaymentDto {
            client_id: 7,
            estimate_id: 3,
            phase: 2,
            amount: 50_000,
            recorded_by: Some(1),
        };

        assert_eq!(dto.phase, 2);
        assert_eq!(dto.amount, 50_000);
    }
}
