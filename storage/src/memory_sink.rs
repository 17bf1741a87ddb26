//! In-process record sink; contents are lost when the process exits.

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::StorageError;
use crate::models::ScreeningRecord;
use crate::record_sink::RecordSink;

/// [`RecordSink`] backed by a `Vec`. Used for tests and ephemeral console sessions.
#[derive(Default)]
pub struct InMemoryRecordSink {
    records: Mutex<Vec<ScreeningRecord>>,
}

impl InMemoryRecordSink {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordSink for InMemoryRecordSink {
    async fn append(&self, record: &ScreeningRecord) -> Result<(), StorageError> {
        let mut records = self.records.lock().await;
        records.push(record.clone());
        debug!(record_id = %record.id, total = records.len(), "Appended screening record");
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<ScreeningRecord>, StorageError> {
        Ok(self.records.lock().await.clone())
    }

    async fn count(&self) -> Result<u64, StorageError> {
        Ok(self.records.lock().await.len() as u64)
    }
}
