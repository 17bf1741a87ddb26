//! Completed screening model.
//!
//! Maps to one row of the `screenings` table; immutable once created.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One finished screening: who, when, and the risk-coded answers in question order
/// (`1` = risk-indicating answer, `0` = not).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreeningRecord {
    pub id: String,
    pub user_id: String,
    pub completed_at: DateTime<Utc>,
    pub answers: Vec<u8>,
}

impl ScreeningRecord {
    /// Creates a new record with a generated UUID and the current timestamp.
    pub fn new(user_id: impl Into<String>, answers: Vec<u8>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            completed_at: Utc::now(),
            answers,
        }
    }

    /// Number of risk-indicating answers.
    pub fn risk_count(&self) -> u32 {
        self.answers.iter().map(|&a| u32::from(a)).sum()
    }

    /// Answer for question `index` (zero-based), if that question exists.
    pub fn answer(&self, index: usize) -> Option<u8> {
        self.answers.get(index).copied()
    }
}
