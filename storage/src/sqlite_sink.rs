//! SQLite-backed record sink.
//!
//! One row per completed screening in the `screenings` table. `seq` is an autoincrement key that
//! fixes insertion order; each append is a single INSERT, so concurrent completions never
//! overwrite each other.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{error, info};

use crate::error::StorageError;
use crate::models::ScreeningRecord;
use crate::record_sink::RecordSink;
use crate::sqlite_pool::SqlitePoolManager;

/// Row shape of the `screenings` table; `answers` is a JSON array of 0/1.
#[derive(sqlx::FromRow)]
struct ScreeningRow {
    id: String,
    user_id: String,
    completed_at: DateTime<Utc>,
    answers: String,
}

impl TryFrom<ScreeningRow> for ScreeningRecord {
    type Error = StorageError;

    fn try_from(row: ScreeningRow) -> Result<Self, Self::Error> {
        let answers: Vec<u8> = serde_json::from_str(&row.answers)?;
        Ok(ScreeningRecord {
            id: row.id,
            user_id: row.user_id,
            completed_at: row.completed_at,
            answers,
        })
    }
}

#[derive(Clone)]
pub struct SqliteRecordSink {
    pool_manager: SqlitePoolManager,
}

impl SqliteRecordSink {
    /// Opens (creating if needed) the database and ensures the schema exists.
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        let sink = Self { pool_manager };
        sink.init().await?;
        Ok(sink)
    }

    async fn init(&self) -> Result<(), StorageError> {
        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS screenings (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT NOT NULL UNIQUE,
                user_id TEXT NOT NULL,
                completed_at TEXT NOT NULL,
                answers TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_screenings_user_id ON screenings(user_id)")
            .execute(pool)
            .await?;

        info!("Screenings table ready");
        Ok(())
    }

    pub(crate) fn pool(&self) -> &sqlx::SqlitePool {
        self.pool_manager.pool()
    }

    /// Records of one user, oldest first.
    pub async fn list_by_user(&self, user_id: &str) -> Result<Vec<ScreeningRecord>, StorageError> {
        let rows = sqlx::query_as::<_, ScreeningRow>(
            "SELECT id, user_id, completed_at, answers FROM screenings WHERE user_id = ? ORDER BY seq ASC",
        )
        .bind(user_id)
        .fetch_all(self.pool_manager.pool())
        .await?;

        rows.into_iter().map(ScreeningRecord::try_from).collect()
    }
}

#[async_trait]
impl RecordSink for SqliteRecordSink {
    async fn append(&self, record: &ScreeningRecord) -> Result<(), StorageError> {
        let answers = serde_json::to_string(&record.answers)?;

        sqlx::query(
            "INSERT INTO screenings (id, user_id, completed_at, answers) VALUES (?, ?, ?, ?)",
        )
        .bind(&record.id)
        .bind(&record.user_id)
        .bind(record.completed_at)
        .bind(&answers)
        .execute(self.pool_manager.pool())
        .await
        .map_err(|e| {
            error!(error = %e, record_id = %record.id, "Failed to insert screening record");
            StorageError::from(e)
        })?;

        info!(
            record_id = %record.id,
            user_id = %record.user_id,
            risk_count = record.risk_count(),
            "Saved screening record"
        );
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<ScreeningRecord>, StorageError> {
        let rows = sqlx::query_as::<_, ScreeningRow>(
            "SELECT id, user_id, completed_at, answers FROM screenings ORDER BY seq ASC",
        )
        .fetch_all(self.pool_manager.pool())
        .await?;

        rows.into_iter().map(ScreeningRecord::try_from).collect()
    }

    async fn count(&self) -> Result<u64, StorageError> {
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM screenings")
            .fetch_one(self.pool_manager.pool())
            .await?;
        Ok(total.max(0) as u64)
    }
}
