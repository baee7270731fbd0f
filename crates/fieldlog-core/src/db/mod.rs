//! Database layer for fieldlog

mod connection;
mod repository;
pub mod schema;
mod seed;

pub use connection::Database;
pub use repository::{Page, PageScope, RecordRepository, SqliteRecordRepository, WriteOutcome};
pub use seed::sample_drafts;
