//! Subcategories repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::repository::{Repository, RepositoryError, RepositoryResult};

#[derive(Debug, Clone, FromRow)]
pub struct SubcategoryRow {
    pub id: i64,
    pub category_id: i64,
    pub name: String,
    pub status: i16,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateSubcategoryDto {
    pub category_id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateSubcategoryDto {
    pub name: Option<String>,
}

const COLUMNS: &str = "id, category_id, name, status, created_at, updated_at";

pub struct SubcategoryRepository {
    pool: PgPool,
}

impl SubcategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Active subcategories of an active parent
    pub async fn find_active_by_category(&self, category_id: i64) -> RepositoryResult<Vec<SubcategoryRow>> {
        let rows = sqlx::query_as::<_, SubcategoryRow>(&format!(
            "SELECT {COLUMNS} FROM subcategories WHERE category_id = $1 AND status = 1 ORDER BY name ASC"
        ))
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn find_active(&self) -> RepositoryResult<Vec<SubcategoryRow>> {
        let rows = sqlx::query_as::<_, SubcategoryRow>(&format!(
            "SELECT {COLUMNS} FROM subcategories WHERE status = 1 ORDER BY name ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn set_status(&self, id: i64, status: i16) -> RepositoryResult<SubcategoryRow> {
        let row = sqlx::query_as::<_, SubcategoryRow>(&format!(
            "UPDATE subcategories SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| RepositoryError::NotFound(format!("Subcategory {} not found", id)))?;

        Ok(row)
    }
}

#[async_trait]
impl Repository<SubcategoryRow, CreateSubcategoryDto, UpdateSubcategoryDto> for SubcategoryRepository {
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<SubcategoryRow>> {
        let row = sqlx::query_as::<_, SubcategoryRow>(&format!(
            "SELECT {COLUMNS} FROM subcategories WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_all(&self, limit: i64, offset: i64) -> RepositoryResult<Vec<SubcategoryRow>> {
        let rows = sqlx::query_as::<_, SubcategoryRow>(&format!(
            "SELECT {COLUMNS} FROM subcategories ORDER BY name ASC LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn count(&self) -> RepositoryResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM subcategories")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn create(&self, dto: CreateSubcategoryDto) -> RepositoryResult<SubcategoryRow> {
        if dto.name.trim().is_empty() {
            return Err(RepositoryError::Validation("Name can't be blank".to_string()));
        }

        let parent_active = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM categories WHERE id = $1 AND status = 1",
        )
        .bind(dto.category_id)
        .fetch_one(&self.pool)
        .await?;
        if parent_active == 0 {
            return Err(RepositoryError::Validation(
                "Category is missing or inactive".to_string(),
            ));
        }

        let duplicate = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM subcategories WHERE category_id = $1 AND LOWER(name) = LOWER($2)",
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

        let row = sqlx::query_as::<_, SubcategoryRow>(&format!(
            r#"
            INSERT INTO subcategories (category_id, name, status, created_at, updated_at)
            VALUES ($1, $2, 1, NOW(), NOW())
            RETURNING {COLUMNS}
            "#
        ))
        .bind(dto.category_id)
        .bind(&dto.name)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update(&self, id: i64, dto: UpdateSubcategoryDto) -> RepositoryResult<SubcategoryRow> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("Subcategory {} not found", id)))?;

        let name = dto.name.unwrap_or(existing.name);

        if name.trim().is_empty() {
            return Err(RepositoryError::Validation("Name can't be blank".to_string()));
        }

        let row = sqlx::query_as::<_, SubcategoryRow>(&format!(
            "UPDATE subcategories SET name = $2, updated_at = NOW() WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(&name)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn exists(&self, id: i64) -> RepositoryResult<bool> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM subcategories WHERE id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count > 0)
    }
}
