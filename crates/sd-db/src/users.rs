//! Users repository

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::repository::{RepositoryError, RepositoryResult};

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub password_digest: String,
    pub admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateUserDto {
    pub name: String,
    pub phone: String,
    pub password_digest: String,
    pub admin: bool,
}

const COLUMNS: &str = "id, name, phone, password_digest, admin, created_at, updated_at";

pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(&format!("SELECT {COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    /// Phone is the login identifier
    pub async fn find_by_phone(&self, phone: &str) -> RepositoryResult<Option<UserRow>> {
        let row =
            sqlx::query_as::<_, UserRow>(&format!("SELECT {COLUMNS} FROM users WHERE phone = $1"))
                .bind(phone)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row)
    }

    pub async fn find_all(&self, limit: i64, offset: i64) -> RepositoryResult<Vec<UserRow>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {COLUMNS} FROM users ORDER BY name ASC LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn create(&self, dto: CreateUserDto) -> RepositoryResult<UserRow> {
        if dto.name.trim().is_empty() {
            return Err(RepositoryError::Validation("Name can't be blank".to_string()));
        }

        let taken = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE phone = $1")
            .bind(&dto.phone)
            .fetch_one(&self.pool)
            .await?;
        if taken > 0 {
            return Err(RepositoryError::Conflict(
                "Phone number has already been taken".to_string(),
            ));
        }

        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (name, phone, password_digest, admin, created_at, updated_at)
            VALUES ($1, $2, $3, $4, NOW(), NOW())
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&dto.name)
        .bind(&dto.phone)
        .bind(&dto.password_digest)
        .bind(dto.admin)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }
}
