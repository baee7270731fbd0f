//! Database connection management

use std::path::{Path, PathBuf};

use rusqlite::Connection;

use super::schema;
use crate::error::{Error, Result};

/// Database wrapper owning the single `SQLite` connection of the process
pub struct Database {
    conn: Connection,
    path: Option<PathBuf>,
}

impl Database {
    /// Open a database at the given path, creating it if it doesn't exist
    ///
    /// Initializes the schema automatically.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let conn = Connection::open(&path).map_err(Error::StorageInit)?;

        let database = Self {
            conn,
            path: Some(path),
        };
        database.configure()?;
        database.initialize()?;
        Ok(database)
    }

    /// Open an in-memory database (useful for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(Error::StorageInit)?;

        let database = Self { conn, path: None };
        database.configure()?;
        database.initialize()?;
        Ok(database)
    }

    /// Configure `SQLite` for a single local writer
    fn configure(&self) -> Result<()> {
        // In-memory databases answer "memory"; either way the mode is advisory
        self.conn
            .pragma_update_and_check(None, "journal_mode", "WAL", |row| {
                row.get::<_, String>(0)
            })
            .ok();
        self.conn
            .pragma_update(None, "synchronous", "NORMAL")
            .map_err(Error::StorageInit)?;
        self.conn
            .pragma_update(None, "foreign_keys", "ON")
            .map_err(Error::StorageInit)?;
        Ok(())
    }

    /// Ensure the records table exists. Safe to call on every start.
    pub fn initialize(&self) -> Result<()> {
        schema::initialize(&self.conn)
    }

    /// Filesystem location, `None` for in-memory databases
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Get a reference to the underlying connection
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }
}
