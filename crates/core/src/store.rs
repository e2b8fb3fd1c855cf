//! Storage boundary for reading logs.
//!
//! Each owner (identified by email) has one append-only log. Implementations
//! must return readings oldest first and must never reorder or rewrite them.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::reading::Reading;
use crate::reading_log::ReadingLog;

/// Errors raised by a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend could not be reached.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// The backend returned data that does not map onto a reading.
    #[error("Corrupt stored reading: {0}")]
    Corrupt(String),

    /// Any other backend failure.
    #[error("Storage error: {0}")]
    Backend(String),
}

/// Append-only, per-owner reading storage.
#[async_trait]
pub trait ReadingStore: Send + Sync {
    /// Append a reading to the owner's log and return it as stored.
    async fn append(&self, owner: &str, reading: Reading) -> Result<Reading, StoreError>;

    /// All of the owner's readings, oldest first.
    async fn list_all(&self, owner: &str) -> Result<Vec<Reading>, StoreError>;

    /// Delete every reading the owner has, returning how many were removed.
    async fn clear(&self, owner: &str) -> Result<u64, StoreError>;

    /// Verify the backend is reachable.
    async fn health_check(&self) -> Result<(), StoreError>;
}

/// Process-local store, one [`ReadingLog`] per owner.
///
/// Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryReadingStore {
    logs: RwLock<HashMap<String, ReadingLog>>,
}

impl MemoryReadingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReadingStore for MemoryReadingStore {
    async fn append(&self, owner: &str, reading: Reading) -> Result<Reading, StoreError> {
        let mut logs = self.logs.write().await;
        logs.entry(owner.to_string())
            .or_default()
            .append(reading.clone());
        Ok(reading)
    }

    async fn list_all(&self, owner: &str) -> Result<Vec<Reading>, StoreError> {
        let logs = self.logs.read().await;
        Ok(logs
            .get(owner)
            .map(|log| log.as_slice().to_vec())
            .unwrap_or_default())
    }

    async fn clear(&self, owner: &str) -> Result<u64, StoreError> {
        let mut logs = self.logs.write().await;
        let removed = logs.get_mut(owner).map_or(0, ReadingLog::clear);
        tracing::debug!(owner, removed, "Cleared in-memory reading log");
        Ok(removed as u64)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
