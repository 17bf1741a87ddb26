//! Storage crate: append-only persistence of completed screenings.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – ScreeningRecord
//! - [`record_sink`] – RecordSink trait (append + ordered enumeration)
//! - [`sqlite_sink`] – SqliteRecordSink (SQLite via sqlx)
//! - [`memory_sink`] – InMemoryRecordSink
//! - [`sqlite_pool`] – SqlitePoolManager

mod error;
mod memory_sink;
mod models;
mod record_sink;
mod sqlite_pool;
mod sqlite_sink;


pub use error::StorageError;
pub use memory_sink::InMemoryRecordSink;
pub use models::ScreeningRecord;
pub use record_sink::RecordSink;
pub use sqlite_pool::SqlitePoolManager;
pub use sqlite_sink::SqliteRecordSink;
