//! Process-wide record store handle.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::db::{
    Database, Page, PageScope, RecordRepository, SqliteRecordRepository, WriteOutcome,
};
use crate::models::{Record, RecordDraft, RecordId};
use crate::Result;

/// Cloneable handle to the single database connection.
///
/// Open once at startup and pass clones to every screen controller. Each
/// method holds the connection lock for exactly one repository call, so
/// individual operations never interleave. Nothing spans two calls; use
/// [`RecordStore::page_with_total`] when a count and a page must agree.
#[derive(Clone)]
pub struct RecordStore {
    db: Arc<Mutex<Database>>,
    db_path: Option<PathBuf>,
}

impl RecordStore {
    /// Open (creating if needed) the database file and its parent directory.
    ///
    /// A parent directory that cannot be created is reported as
    /// [`Error::Io`](crate::Error::Io); everything past that point fails
    /// with [`Error::StorageInit`](crate::Error::StorageInit).
    pub fn open_path(db_path: impl Into<PathBuf>) -> Result<Self> {
        let db_path = db_path.into();
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        tracing::info!("Opening record store at {}", db_path.display());
        let db = Database::open(&db_path)?;
        Ok(Self {
            db: Arc::new(Mutex::new(db)),
            db_path: Some(db_path),
        })
    }

    /// Open an in-memory store (primarily for tests).
    pub fn open_in_memory() -> Result<Self> {
        let db = Database::open_in_memory()?;
        Ok(Self {
            db: Arc::new(Mutex::new(db)),
            db_path: None,
        })
    }

    /// Filesystem location of the database, `None` when in memory.
    pub fn path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    /// Re-run idempotent schema creation.
    pub async fn initialize(&self) -> Result<()> {
        let db = self.db.lock().await;
        SqliteRecordRepository::new(db.connection()).initialize()
    }

    /// Insert a new record.
    pub async fn create(&self, draft: &RecordDraft) -> Result<Record> {
        let db = self.db.lock().await;
        SqliteRecordRepository::new(db.connection()).create(draft)
    }

    /// Fetch a record by id.
    pub async fn get(&self, id: RecordId) -> Result<Option<Record>> {
        let db = self.db.lock().await;
        SqliteRecordRepository::new(db.connection()).get(id)
    }

    /// Replace all mutable fields of a record.
    pub async fn update(&self, id: RecordId, draft: &RecordDraft) -> Result<WriteOutcome> {
        let db = self.db.lock().await;
        SqliteRecordRepository::new(db.connection()).update(id, draft)
    }

    /// Delete a record.
    pub async fn delete(&self, id: RecordId) -> Result<WriteOutcome> {
        let db = self.db.lock().await;
        SqliteRecordRepository::new(db.connection()).delete(id)
    }

    /// Delete every record. Callers confirm with the user first.
    pub async fn delete_all(&self) -> Result<usize> {
        let db = self.db.lock().await;
        SqliteRecordRepository::new(db.connection()).delete_all()
    }

    /// Total number of records.
    pub async fn count(&self) -> Result<usize> {
        let db = self.db.lock().await;
        SqliteRecordRepository::new(db.connection()).count()
    }

    /// Number of records with both coordinates.
    pub async fn count_with_location(&self) -> Result<usize> {
        let db = self.db.lock().await;
        SqliteRecordRepository::new(db.connection()).count_with_location()
    }

    /// Records newest-first.
    pub async fn page(&self, limit: usize, offset: usize) -> Result<Vec<Record>> {
        let db = self.db.lock().await;
        SqliteRecordRepository::new(db.connection()).page(limit, offset)
    }

    /// Located records newest-first.
    pub async fn page_with_location(&self, limit: usize, offset: usize) -> Result<Vec<Record>> {
        let db = self.db.lock().await;
        SqliteRecordRepository::new(db.connection()).page_with_location(limit, offset)
    }

    /// Count and page from one read transaction.
    pub async fn page_with_total(
        &self,
        scope: PageScope,
        limit: usize,
        offset: usize,
    ) -> Result<Page> {
        let db = self.db.lock().await;
        SqliteRecordRepository::new(db.connection()).page_with_total(scope, limit, offset)
    }

    /// Insert the sample data set. A failure can leave some rows inserted.
    pub async fn seed_sample_data(&self) -> Result<usize> {
        let db = self.db.lock().await;
        SqliteRecordRepository::new(db.connection()).seed_sample_data()
    }

    /// Hold the connection so tests can park a request mid-flight.
    #[cfg(test)]
    pub(crate) async fn lock_for_test(&self) -> tokio::sync::MutexGuard<'_, Database> {
        self.db.lock().await
    }
}
