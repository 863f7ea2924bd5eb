//! Material catalog repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::repository::{Repository, RepositoryError, RepositoryResult};

#[derive(Debug, Clone, FromRow)]
pub struct MaterialRow {
    pub id: i64,
    pub name: String,
    pub category_id: i64,
    pub subcategory_id: Option<i64>,
    /// "area" or "piece"
    pub measurement_type: String,
    pub unit_price: f64,
    pub status: i16,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateMaterialDto {
    pub name: String,
    pub category_id: i64,
    pub subcategory_id: Option<i64>,
    pub measurement_type: String,
    pub unit_price: f64,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateMaterialDto {
    pub name: Option<String>,
    pub subcategory_id: Option<i64>,
    pub measurement_type: Option<String>,
    pub unit_price: Option<f64>,
}

const COLUMNS: &str =
    "id, name, category_id, subcategory_id, measurement_type, unit_price, status, created_at, updated_at";

pub struct MaterialRepository {
    pool: PgPool,
}

impl MaterialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_active(&self) -> RepositoryResult<Vec<MaterialRow>> {
        let rows = sqlx::query_as::<_, MaterialRow>(&format!(
            "SELECT {COLUMNS} FROM materials WHERE status = 1 ORDER BY name ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// All active materials of one category; inactive categories still
    /// resolve here so old estimates keep working.
    pub async fn find_active_by_category(&self, category_id: i64) -> RepositoryResult<Vec<MaterialRow>> {
        let rows = sqlx::query_as::<_, MaterialRow>(&format!(
            "SELECT {COLUMNS} FROM materials WHERE category_id = $1 AND status = 1 ORDER BY name ASC"
        ))
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn set_status(&self, id: i64, status: i16) -> RepositoryResult<MaterialRow> {
        let row = sqlx::query_as::<_, MaterialRow>(&format!(
            "UPDATE materials SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| RepositoryError::NotFound(format!("Material {} not found", id)))?;

        Ok(row)
    }
}

#[async_trait]
impl Repository<MaterialRow, CreateMaterialDto, UpdateMaterialDto> for MaterialRepository {
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<MaterialRow>> {
        let row = sqlx::query_as::<_, MaterialRow>(&format!(
            "SELECT {COLUMNS} FROM materials WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_all(&self, limit: i64, offset: i64) -> RepositoryResult<Vec<MaterialRow>> {
        let rows = sqlx::query_as::<_, MaterialRow>(&format!(
            "SELECT {COLUMNS} FROM materials ORDER BY name ASC LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn count(&self) -> RepositoryResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM materials")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn create(&self, dto: CreateMaterialDto) -> RepositoryResult<MaterialRow> {
        if dto.name.trim().is_empty() {
            return Err(RepositoryError::Validation("Name can't be blank".to_string()));
        }
        if dto.measurement_type != "area" && dto.measurement_type != "piece" {
            return Err(RepositoryError::Validation(
                "Measurement type must be area or piece".to_string(),
            ));
        }

        let duplicate = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM materials WHERE category_id = $1 AND LOWER(name) = LOWER($2)",
        )
        .bind(dto.category_id)
        .bind(&dto.name)
        .fetch_one(&self.pool)
        .await?;
        if duplicate > 0 {
            return Err(RepositoryError::Conflict(
                "Name has already been taken".to_string(),
            ));
        }

        let row = sqlx::query_as::<_, MaterialRow>(&format!(
            r#"
            INSERT INTO materials (name, category_id, subcategory_id, measurement_type, unit_price, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, 1, NOW(), NOW())
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&dto.name)
        .bind(dto.category_id)
        .bind(dto.subcategory_id)
        .bind(&dto.measurement_type)
        .bind(dto.unit_price)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update(&self, id: i64, dto: UpdateMaterialDto) -> RepositoryResult<MaterialRow> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("Material {} not found", id)))?;

        let name = dto.name.unwrap_or(existing.name);
        let subcategory_id = dto.subcategory_id.or(existing.subcategory_id);
        let measurement_type = dto.measurement_type.unwrap_or(existing.measurement_type);
        let unit_price = dto.unit_price.unwrap_or(existing.unit_price);

        if name.trim().is_empty() {
            return Err(RepositoryError::Validation("Name can't be blank".to_string()));
        }
        if unit_price <= 0.0 {
            return Err(RepositoryError::Validation(
                "Unit price must be greater than zero".to_string(),
            ));
        }

        let row = sqlx::query_as::<_, MaterialRow>(&format!(
            r#"
            UPDATE materials
            SET name = $2, subcategory_id = $3, measurement_type = $4, unit_price = $5, updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&name)
        .bind(subcategory_id)
        .bind(&measurement_type)
        .bind(unit_price)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn exists(&self, id: i64) -> RepositoryResult<bool> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM materials WHERE id = $1")
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
    fn test_material_dto() {
        let dto = CreateMaterialDto {
            name: "Plywood 18mm".to_string(),
            category_id: 2,
            subcategory_id: None,
            measurement_type: "area".to_string(),
            unit_price: 145.0,
        };

        assert_eq!(dto.measurement_type, "area");
        assert_eq!(dto.unit_price, 145.0);
    }
}
