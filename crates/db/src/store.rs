//! [`ReadingStore`] backed by PostgreSQL.

use async_trait::async_trait;
use glucolog_core::reading::Reading;
use glucolog_core::store::{ReadingStore, StoreError};

use crate::models::reading::CreateReading;
use crate::repositories::ReadingRepo;
use crate::DbPool;

#[derive(Clone)]
pub struct PgReadingStore {
    pool: DbPool,
}

impl PgReadingStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map a sqlx error onto the storage boundary's error type.
fn store_error(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            StoreError::Unavailable(err.to_string())
        }
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
            StoreError::Corrupt(err.to_string())
        }
        other => StoreError::Backend(other.to_string()),
    }
}

#[async_trait]
impl ReadingStore for PgReadingStore {
    async fn append(&self, owner: &str, reading: Reading) -> Result<Reading, StoreError> {
        let input = CreateReading::from_reading(owner, &reading);
        let row = ReadingRepo::create(&self.pool, &input)
            .await
            .map_err(store_error)?;
        tracing::debug!(reading_id = row.id, tone = %row.tone, "Reading appended");
        row.into_reading()
            .map_err(|e| StoreError::Corrupt(e.to_string()))
    }

    async fn list_all(&self, owner: &str) -> Result<Vec<Reading>, StoreError> {
        let rows = ReadingRepo::list_by_owner(&self.pool, owner)
            .await
            .map_err(store_error)?;
        rows.into_iter()
            .map(|row| {
                let id = row.id;
                row.into_reading().map_err(|e| {
                    tracing::error!(reading_id = id, error = %e, "Stored reading is corrupt");
                    StoreError::Corrupt(format!("reading {id}: {e}"))
                })
            })
            .collect()
    }

    async fn clear(&self, owner: &str) -> Result<u64, StoreError> {
        ReadingRepo::delete_all_for_owner(&self.pool, owner)
            .await
            .map_err(store_error)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }
}
