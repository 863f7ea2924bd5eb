//! Client expenses repository
//!
//! Raw rows plus the two aggregates the report page needs: totals per
//! category and totals per month.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};

use crate::repository::{RepositoryError, RepositoryResult};

#[derive(Debug, Clone, FromRow)]
pub struct ExpenseRow {
    pub id: i64,
    pub client_id: i64,
    pub amount: i64,
    /// "labour", "material", or "other"
    pub category: String,
    pub note: Option<String>,
    pub spent_on: NaiveDate,
    pub recorded_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateExpenseDto {
    pub client_id: i64,
    pub amount: i64,
    pub category: String,
    pub note: Option<String>,
    pub spent_on: NaiveDate,
    pub recorded_by: Option<i64>,
}

/// One category's total for a client
#[derive(Debug, Clone, FromRow)]
pub struct CategoryTotalRow {
    pub category: String,
    pub total: i64,
}

/// One month's total, month given as the first day
#[derive(Debug, Clone, FromRow)]
pub struct MonthlyTotalRow {
    pub month: NaiveDate,
    pub total: i64,
}

const COLUMNS: &str =
    "id, client_id, amount, category, note, spent_on, recorded_by, created_at, updated_at";

pub struct ExpenseRepository {
    pool: PgPool,
}

impl ExpenseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_client(&self, client_id: i64) -> RepositoryResult<Vec<ExpenseRow>> {
        let rows = sqlx::query_as::<_, ExpenseRow>(&format!(
            "SELECT {COLUMNS} FROM client_expenses WHERE client_id = $1 ORDER BY spent_on DESC, id DESC"
        ))
        .bind(client_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn find_by_client_and_category(
        &self,
        client_id: i64,
        category: &str,
    ) -> RepositoryResult<Vec<ExpenseRow>> {
        let rows = sqlx::query_as::<_, ExpenseRow>(&format!(
            "SELECT {COLUMNS} FROM client_expenses WHERE client_id = $1 AND category = $2 \
             ORDER BY spent_on DESC, id DESC"
        ))
        .bind(client_id)
        .bind(category)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Per-category totals for the summary cards and table footers
    pub async fn totals_by_category(&self, client_id: i64) -> RepositoryResult<Vec<CategoryTotalRow>> {
        let rows = sqlx::query_as::<_, CategoryTotalRow>(
            r#"
            SELECT category, COALESCE(SUM(amount), 0)::BIGINT AS total
            FROM client_expenses
            WHERE client_id = $1
            GROUP BY category
            ORDER BY category
            "#,
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Month-by-month spend across all clients, oldest first
    pub async fn monthly_totals(&self, months: i64) -> RepositoryResult<Vec<MonthlyTotalRow>> {
        let rows = sqlx::query_as::<_, MonthlyTotalRow>(
            r#"
            SELECT date_trunc('month', spent_on)::DATE AS month,
                   COALESCE(SUM(amount), 0)::BIGINT AS total
            FROM client_expenses
            WHERE spent_on >= (CURRENT_DATE - ($1 || ' months')::INTERVAL)
            GROUP BY 1
            ORDER BY 1
            "#,
        )
        .bind(months.to_string())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn create(&self, dto: CreateExpenseDto) -> RepositoryResult<ExpenseRow> {
        if dto.amount <= 0 {
            return Err(RepositoryError::Validation(
                "Amount must be greater than zero".to_string(),
            ));
        }

        let row = sqlx::query_as::<_, ExpenseRow>(&format!(
            r#"
            INSERT INTO client_expenses (client_id, amount, category, note, spent_on, recorded_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, NOW(), NOW())
            RETURNING {COLUMNS}
            "#
        ))
        .bind(dto.client_id)
        .bind(dto.amount)
        .bind(&dto.category)
        .bind(&dto.note)
        .bind(dto.spent_on)
        .bind(dto.recorded_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expense_dto() {
        let dto = CreateExpenseDto {
            client_id: 7,
            amount: 12_000,
            category: "labour".to_string(),
            note: Some("carpenter advance".to_string()),
            spent_on: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            recorded_by: Some(1),
        };

        assert_eq!(dto.category, "labour");
        assert_eq!(dto.amount, 12_000);
    }
}
