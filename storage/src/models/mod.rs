//! Persistence models.

mod screening_record;

pub use screening_record::ScreeningRecord;
