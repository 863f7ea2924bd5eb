//! Estimates repository
//!
//! An estimate and its material lines are written in one transaction;
//! totals arrive pre-computed from the service layer.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::repository::{RepositoryError, RepositoryResult};

#[derive(Debug, Clone, FromRow)]
pub struct EstimateRow {
    pub id: i64,
    pub client_id: i64,
    pub subtotal: f64,
    pub discount: f64,
    pub grand_total: i64,
    /// "pending", "approved", or "rejected"
    pub status: String,
    pub created_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct EstimateItemRow {
    pub id: i64,
    pub estimate_id: i64,
    pub name: String,
    pub category_id: Option<i64>,
    pub subcategory_id: Option<i64>,
    pub measurement_type: String,
    pub length_cm: Option<f64>,
    pub breadth_cm: Option<f64>,
    pub quantity: Option<f64>,
    pub unit_price: f64,
    pub line_total: f64,
    pub position: i32,
}

#[derive(Debug, Clone)]
pub struct CreateEstimateDto {
    pub client_id: i64,
    pub subtotal: f64,
    pub discount: f64,
    pub grand_total: i64,
    pub created_by: Option<i64>,
    pub items: Vec<CreateEstimateItemDto>,
}

#[derive(Debug, Clone)]
pub struct CreateEstimateItemDto {
    pub name: String,
    pub category_id: Option<i64>,
    pub subcategory_id: Option<i64>,
    pub measurement_type: String,
    pub length_cm: Option<f64>,
    pub breadth_cm: Option<f64>,
    pub quantity: Option<f64>,
    pub unit_price: f64,
    pub line_total: f64,
}

const COLUMNS: &str =
    "id, client_id, subtotal, discount, grand_total, status, created_by, created_at, updated_at";

const ITEM_COLUMNS: &str = "id, estimate_id, name, category_id, subcategory_id, measurement_type, \
     length_cm, breadth_cm, quantity, unit_price, line_total, position";

pub struct EstimateRepository {
    pool: PgPool,
}

impl EstimateRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<EstimateRow>> {
        let row = sqlx::query_as::<_, EstimateRow>(&format!(
            "SELECT {COLUMNS} FROM estimates WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Estimates for a client, newest first
    pub async fn find_by_client(&self, client_id: i64) -> RepositoryResult<Vec<EstimateRow>> {
        let rows = sqlx::query_as::<_, EstimateRow>(&format!(
            "SELECT {COLUMNS} FROM estimates WHERE client_id = $1 ORDER BY created_at DESC"
        ))
        .bind(client_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// The most recent approved estimate drives payments and documents.
    pub async fn find_approved_for_client(&self, client_id: i64) -> RepositoryResult<Option<EstimateRow>> {
        let row = sqlx::query_as::<_, EstimateRow>(&format!(
            "SELECT {COLUMNS} FROM estimates WHERE client_id = $1 AND status = 'approved' \
             ORDER BY created_at DESC LIMIT 1"
        ))
        .bind(client_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn items(&self, estimate_id: i64) -> RepositoryResult<Vec<EstimateItemRow>> {
        let rows = sqlx::query_as::<_, EstimateItemRow>(&format!(
            "SELECT {ITEM_COLUMNS} FROM estimate_items WHERE estimate_id = $1 ORDER BY position ASC"
        ))
        .bind(estimate_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn create(&self, dto: CreateEstimateDto) -> RepositoryResult<EstimateRow> {
        if dto.items.is_empty() {
            return Err(RepositoryError::Validation(
                "Estimate needs at least one material".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, EstimateRow>(&format!(
            r#"
            INSERT INTO estimates (client_id, subtotal, discount, grand_total, status, created_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, 'pending', $5, NOW(), NOW())
            RETURNING {COLUMNS}
            "#
        ))
        .bind(dto.client_id)
        .bind(dto.subtotal)
        .bind(dto.discount)
        .bind(dto.grand_total)
        .bind(dto.created_by)
        .fetch_one(&mut *tx)
        .await?;

        for (position, item) in dto.items.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO estimate_items
                    (estimate_id, name, category_id, subcategory_id, measurement_type,
                     length_cm, breadth_cm, quantity, unit_price, line_total, position)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                "#,
            )
            .bind(row.id)
            .bind(&item.name)
            .bind(item.category_id)
            .bind(item.subcategory_id)
            .bind(&item.measurement_type)
            .bind(item.length_cm)
            .bind(item.breadth_cm)
            .bind(item.quantity)
            .bind(item.unit_price)
            .bind(item.line_total)
            .bind(position as i32)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(row)
    }

    /// Move between pending / approved / rejected.
    pub async fn set_status(&self, id: i64, status: &str) -> RepositoryResult<EstimateRow> {
        let row = sqlx::query_as::<_, EstimateRow>(&format!(
            "UPDATE estimates SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| RepositoryError::NotFound(format!("Estimate {} not found", id)))?;

        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_dto() {
        let dto = CreateEstimateDto {
            client_id: 7,
            subtotal: 1_500.0,
            discount: 100.0,
            grand_total: 1_400,
            created_by: Some(1),
            items: vec![CreateEstimateItemDto {
                name: "Wardrobe shutter".to_string(),
                category_id: Some(2),
                subcategory_id: None,
                measurement_type: "area".to_string(),
                length_cm: Some(210.0),
                breadth_cm: Some(45.0),
                quantity: None,
                unit_price: 1_450.0,
                line_total: 1_500.0,
            }],
        };

        assert_eq!(dto.grand_total, 1_400);
        assert_eq!(dto.items.len(), 1);
    }
}
