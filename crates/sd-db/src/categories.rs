//! Categories repository
//!
//! Categories are retired by flipping their status flag, never deleted,
//! so materials created earlier keep a valid reference.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::repository::{Repository, RepositoryError, RepositoryResult};

/// Category row from database
#[derive(Debug, Clone, FromRow)]
pub struct CategoryRow {
    pub id: i64,
    pub name: String,
    pub status: i16,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a category
#[derive(Debug, Clone)]
pub struct CreateCategoryDto {
    pub name: String,
}

/// DTO for updating a category
#[derive(Debug, Clone, Default)]
pub struct UpdateCategoryDto {
    pub name: Option<String>,
}

const COLUMNS: &str = "id, name, status, created_at, updated_at";

/// Category repository
pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Categories with status 1, the ones offered for new materials
    pub async fn find_active(&self) -> RepositoryResult<Vec<CategoryRow>> {
        let rows = sqlx::query_as::<_, CategoryRow>(&format!(
            "SELECT {COLUMNS} FROM categories WHERE status = 1 ORDER BY name ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Soft delete / restore: status 1 is active, 0 inactive.
    pub async fn set_status(&self, id: i64, status: i16) -> RepositoryResult<CategoryRow> {
        let row = sqlx::query_as::<_, CategoryRow>(&format!(
            "UPDATE categories SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| RepositoryError::NotFound(format!("Category {} not found", id)))?;

        Ok(row)
    }

    async fn is_name_unique(&self, name: &str, exclude_id: Option<i64>) -> RepositoryResult<bool> {
        let count = if let Some(id) = exclude_id {
            sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM categories WHERE LOWER(name) = LOWER($1) AND id != $2",
            )
            .bind(name)
            .bind(id)
            .fetch_one(&self.pool)
            .await?
        } else {
            sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM categories WHERE LOWER(name) = LOWER($1)",
            )
            .bind(name)
            .fetch_one(&self.pool)
            .await?
        };

        Ok(count == 0)
    }
}

#[async_trait]
impl Repository<CategoryRow, CreateCategoryDto, UpdateCategoryDto> for CategoryRepository {
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<CategoryRow>> {
        let row = sqlx::query_as::<_, CategoryRow>(&format!(
            "SELECT {COLUMNS} FROM categories WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_all(&self, limit: i64, offset: i64) -> RepositoryResult<Vec<CategoryRow>> {
        let rows = sqlx::query_as::<_, CategoryRow>(&format!(
            "SELECT {COLUMNS} FROM categories ORDER BY name ASC LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn count(&self) -> RepositoryResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn create(&self, dto: CreateCategoryDto) -> RepositoryResult<CategoryRow> {
        if dto.name.trim().is_empty() {
            return Err(RepositoryError::Validation("Name can't be blank".to_string()));
        }

        if !self.is_name_unique(&dto.name, None).await? {
            return Err(RepositoryError::Conflict(
                "Name has already been taken".to_string(),
            ));
        }

        let row = sqlx::query_as::<_, CategoryRow>(&format!(
            r#"
            INSERT INTO categories (name, status, created_at, updated_at)
            VALUES ($1, 1, NOW(), NOW())
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&dto.name)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update(&self, id: i64, dto: UpdateCategoryDto) -> RepositoryResult<CategoryRow> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("Category {} not found", id)))?;

        let name = dto.name.unwrap_or(existing.name);

        if name.trim().is_empty() {
            return Err(RepositoryError::Validation("Name can't be blank".to_string()));
        }

        if !self.is_name_unique(&name, Some(id)).await? {
            return Err(RepositoryError::Conflict(
                "Name has already been taken".to_string(),
            ));
        }

        let row = sqlx::query_as::<_, CategoryRow>(&format!(
            "UPDATE categories SET name = $2, updated_at = NOW() WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(&name)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn exists(&self, id: i64) -> RepositoryResult<bool> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM categories WHERE id = $1")
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
    fn test_category_dto() {
        let dto = CreateCategoryDto {
            name: "Woodwork".to_string(),
        };
        assert_eq!(dto.name, "Woodwork");
    }
}
