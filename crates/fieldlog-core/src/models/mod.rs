//! Data models for fieldlog

mod record;

pub use record::{Location, Record, RecordDraft, RecordId, Timestamp};
