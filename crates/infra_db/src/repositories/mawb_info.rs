//! MAWB parent record repository
//!
//! The owning record both documents hang off. Deleting it cascades through
//! the manifest and draft trees at the schema level.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use core_kernel::MawbId;

use crate::error::DatabaseError;

/// Repository for the owning MAWB records
#[derive(Debug, Clone)]
pub struct MawbInfoRepository {
    pool: PgPool,
}

/// Stored MAWB parent record
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MawbInfoRow {
    pub mawb_id: Uuid,
    pub mawb_number: String,
    pub created_at: DateTime<Utc>,
}

impl MawbInfoRepository {
    /// Creates a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a new MAWB record
    pub async fn create(&self, mawb_id: MawbId, mawb_number: &str) -> Result<(), DatabaseError> {
        sqlx::query("INSERT INTO mawb_info (mawb_id, mawb_number) VALUES ($1, $2)")
            .bind(Uuid::from(mawb_id))
            .bind(mawb_number)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Looks up a MAWB record
    pub async fn find(&self, mawb_id: MawbId) -> Result<Option<MawbInfoRow>, DatabaseError> {
        let row = sqlx::query_as::<_, MawbInfoRow>(
            "SELECT mawb_id, mawb_number, created_at FROM mawb_info WHERE mawb_id = $1",
        )
        .bind(Uuid::from(mawb_id))
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Checks whether a MAWB record exists
    pub async fn exists(&self, mawb_id: MawbId) -> Result<bool, DatabaseError> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM mawb_info WHERE mawb_id = $1)")
                .bind(Uuid::from(mawb_id))
                .fetch_one(&self.pool)
                .await?;
        Ok(exists.0)
    }

    /// Deletes a MAWB record; both document trees cascade away with it
    pub async fn delete(&self, mawb_id: MawbId) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM mawb_info WHERE mawb_id = $1")
            .bind(Uuid::from(mawb_id))
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("MAWB", mawb_id));
        }
        Ok(())
    }
}
