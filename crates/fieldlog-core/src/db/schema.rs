//! Schema creation
//!
//! Only additive create-if-missing statements live here. Changing an existing
//! column needs a real migration, which this module does not provide.

use rusqlite::{Connection, OptionalExtension};

use crate::error::{Error, Result};

/// Current schema version
pub const CURRENT_VERSION: i32 = 1;

/// Create missing tables and record the schema version.
///
/// The create statements always run, so a database whose `records` table
/// went missing is repaired even when the version row is already present.
pub fn initialize(conn: &Connection) -> Result<()> {
    let version = get_version(conn)?;

    let tx = conn.unchecked_transaction().map_err(Error::StorageInit)?;
    tx.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        );
        CREATE TABLE IF NOT EXISTS records (
            id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
            name TEXT,
            count INTEGER,
            description TEXT,
            imageUri TEXT,
            lat REAL,
            lng REAL,
            date TEXT
        );",
    )
    .map_err(Error::StorageInit)?;
    if version < CURRENT_VERSION {
        tx.execute(
            "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
            [CURRENT_VERSION],
        )
        .map_err(Error::StorageInit)?;
    }
    tx.commit().map_err(Error::StorageInit)?;

    if version < CURRENT_VERSION {
        tracing::info!("Initialized records schema at version {CURRENT_VERSION}");
    } else {
        tracing::debug!("Schema already at version {version}");
    }
    Ok(())
}

/// Get the current schema version, 0 when nothing has been created yet
pub fn get_version(conn: &Connection) -> Result<i32> {
    let exists: bool = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )
        .map_err(Error::StorageInit)?;

    if !exists {
        return Ok(0);
    }

    let version = conn
        .query_row("SELECT MAX(version) FROM schema_version", [], |row| {
            row.get::<_, Option<i32>>(0)
        })
        .optional()
        .map_err(Error::StorageInit)?
        .flatten()
        .unwrap_or(0);

    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> Connection {
        Connection::open_in_memory().unwrap()
    }

    fn table_exists(conn: &Connection, name: &str) -> bool {
        conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
            [name],
            |row| row.get(0),
        )
        .unwrap()
    }

    #[test]
    fn test_initialize_creates_records_table() {
        let conn = setup();
        assert_eq!(get_version(&conn).unwrap(), 0);

        initialize(&conn).unwrap();

        assert!(table_exists(&conn, "records"));
        assert_eq!(get_version(&conn).unwrap(), CURRENT_VERSION);
    }

    #[test]
    fn test_initialize_idempotent() {
        let conn = setup();
        initialize(&conn).unwrap();
        initialize(&conn).unwrap(); // Should not fail

        assert_eq!(get_version(&conn).unwrap(), CURRENT_VERSION);
    }

    #[test]
    fn test_initialize_recreates_dropped_records_table() {
        let conn = setup();
        initialize(&conn).unwrap();
        conn.execute_batch("DROP TABLE records").unwrap();
        assert!(!table_exists(&conn, "records"));

        initialize(&conn).unwrap();

        assert!(table_exists(&conn, "records"));
        assert_eq!(get_version(&conn).unwrap(), CURRENT_VERSION);
    }

    #[test]
    fn test_initialize_adopts_existing_records_table() {
        let conn = setup();
        conn.execute_batch(
            "CREATE TABLE records (
                id INTEGER PRIMARY KEY NOT NULL,
                name TEXT, count INTEGER, description TEXT, imageUri TEXT,
                lat REAL, lng REAL, date TEXT
            );
            INSERT INTO records (name) VALUES ('legacy');",
        )
        .unwrap();

        initialize(&conn).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM records", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }
}
