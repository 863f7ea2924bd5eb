//! Stages repository (reference data)

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::repository::RepositoryResult;

#[derive(Debug, Clone, FromRow)]
pub struct StageRow {
    pub id: i64,
    pub position: i16,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

pub struct StageRepository {
    pool: PgPool,
}

impl StageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> RepositoryResult<Vec<StageRow>> {
        let rows = sqlx::query_as::<_, StageRow>(
            "SELECT id, position, name, created_at FROM stages ORDER BY position ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
