//! Append-only sink for completed screenings.

use async_trait::async_trait;

use crate::error::StorageError;
use crate::models::ScreeningRecord;

/// Append-only store of [`ScreeningRecord`]s.
///
/// Records are never updated, merged or reordered; `list_all` returns them in the order they
/// were appended. Reporting reads through `list_all` only.
#[async_trait]
pub trait RecordSink: Send + Sync {
    /// Appends one record.
    async fn append(&self, record: &ScreeningRecord) -> Result<(), StorageError>;

    /// All records in insertion order.
    async fn list_all(&self) -> Result<Vec<ScreeningRecord>, StorageError>;

    /// Number of stored records.
    async fn count(&self) -> Result<u64, StorageError> {
        Ok(self.list_all().await?.len() as u64)
    }
}
