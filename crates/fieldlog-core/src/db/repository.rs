//! Record repository implementation

use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;

use super::seed::sample_drafts;
use crate::error::{Error, Result};
use crate::models::{Record, RecordDraft, RecordId, Timestamp};

const RECORD_COLUMNS: &str = "id, name, count, description, imageUri, lat, lng, date";

/// Order shared by every paged read. NULL dates sort after all dated rows.
const RECORD_ORDER: &str = "ORDER BY date DESC, id DESC";

const LOCATION_FILTER: &str = "WHERE lat IS NOT NULL AND lng IS NOT NULL";

/// Result of an update or delete addressed by id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// A row matched and was changed
    Applied,
    /// No row has this id; nothing changed
    Missing,
}

impl WriteOutcome {
    const fn from_rows(rows: usize) -> Self {
        if rows == 0 {
            Self::Missing
        } else {
            Self::Applied
        }
    }
}

/// Which rows a paged read covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageScope {
    /// Every record (table view)
    #[default]
    All,
    /// Only records with both coordinates (map view)
    WithLocation,
}

impl PageScope {
    const fn filter(self) -> &'static str {
        match self {
            Self::All => "",
            Self::WithLocation => LOCATION_FILTER,
        }
    }
}

/// One page of records together with the total it was cut from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub records: Vec<Record>,
    pub total: usize,
    pub offset: usize,
    pub limit: usize,
}

/// Trait for record storage operations
pub trait RecordRepository {
    /// Create the records table if it is missing
    fn initialize(&self) -> Result<()>;

    /// Insert a record and return it with its new id
    fn create(&self, draft: &RecordDraft) -> Result<Record>;

    /// Get a record by ID
    fn get(&self, id: RecordId) -> Result<Option<Record>>;

    /// Replace every mutable field of a record
    fn update(&self, id: RecordId, draft: &RecordDraft) -> Result<WriteOutcome>;

    /// Remove one record
    fn delete(&self, id: RecordId) -> Result<WriteOutcome>;

    /// Remove every record, returning how many were removed
    fn delete_all(&self) -> Result<usize>;

    /// Total number of records
    fn count(&self) -> Result<usize>;

    /// Number of records with both coordinates
    fn count_with_location(&self) -> Result<usize>;

    /// Records newest first, `limit` rows starting at `offset`
    fn page(&self, limit: usize, offset: usize) -> Result<Vec<Record>>;

    /// Same as `page`, restricted to records with both coordinates
    fn page_with_location(&self, limit: usize, offset: usize) -> Result<Vec<Record>>;

    /// Count and page read inside one read transaction
    fn page_with_total(&self, scope: PageScope, limit: usize, offset: usize) -> Result<Page>;

    /// Insert the sample data set, returning how many rows were inserted
    fn seed_sample_data(&self) -> Result<usize>;
}

/// `SQLite` implementation of `RecordRepository`
pub struct SqliteRecordRepository<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteRecordRepository<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Parse a record from a database row
    fn parse_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<Record> {
        Ok(Record {
            id: RecordId::new(row.get(0)?),
            name: row.get(1)?,
            count: row.get(2)?,
            description: row.get(3)?,
            image_uri: row.get(4)?,
            lat: row.get(5)?,
            lng: row.get(6)?,
            date: row.get::<_, Option<String>>(7)?.map(Timestamp::from_raw),
        })
    }

    fn insert(&self, draft: &RecordDraft) -> rusqlite::Result<RecordId> {
        self.conn.execute(
            "INSERT INTO records (name, count, description, imageUri, lat, lng, date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                draft.name,
                draft.count,
                draft.description,
                draft.image_uri,
                draft.lat,
                draft.lng,
                draft.date.as_ref().map(Timestamp::as_str),
            ],
        )?;
        Ok(RecordId::new(self.conn.last_insert_rowid()))
    }

    fn count_where(conn: &Connection, filter: &str) -> rusqlite::Result<usize> {
        let total: i64 = conn.query_row(
            &format!("SELECT COUNT(*) FROM records {filter}"),
            [],
            |row| row.get(0),
        )?;
        Ok(usize::try_from(total).unwrap_or(0))
    }

    fn select_page(
        conn: &Connection,
        filter: &str,
        limit: usize,
        offset: usize,
    ) -> rusqlite::Result<Vec<Record>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT {RECORD_COLUMNS} FROM records {filter} {RECORD_ORDER} LIMIT ?1 OFFSET ?2"
        ))?;

        let records = stmt
            .query_map(params![sql_int(limit), sql_int(offset)], Self::parse_record)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(records)
    }
}

/// `SQLite` binds LIMIT/OFFSET as i64
fn sql_int(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn log_failure(operation: &str, error: rusqlite::Error) -> rusqlite::Error {
    tracing::error!("Record store {operation} failed: {error}");
    error
}

impl RecordRepository for SqliteRecordRepository<'_> {
    fn initialize(&self) -> Result<()> {
        super::schema::initialize(self.conn)
    }

    fn create(&self, draft: &RecordDraft) -> Result<Record> {
        let id = self
            .insert(draft)
            .map_err(|e| Error::Write(log_failure("create", e)))?;
        tracing::debug!("Created record {id}");
        Ok(Record::from_draft(id, draft.clone()))
    }

    fn get(&self, id: RecordId) -> Result<Option<Record>> {
        self.conn
            .query_row(
                &format!("SELECT {RECORD_COLUMNS} FROM records WHERE id = ?1"),
                params![id.get()],
                Self::parse_record,
            )
            .optional()
            .map_err(|e| Error::Read(log_failure("get", e)))
    }

    fn update(&self, id: RecordId, draft: &RecordDraft) -> Result<WriteOutcome> {
        let rows = self
            .conn
            .execute(
                "UPDATE records
                 SET name = ?1, count = ?2, description = ?3, imageUri = ?4,
                     lat = ?5, lng = ?6, date = ?7
                 WHERE id = ?8",
                params![
                    draft.name,
                    draft.count,
                    draft.description,
                    draft.image_uri,
                    draft.lat,
                    draft.lng,
                    draft.date.as_ref().map(Timestamp::as_str),
                    id.get(),
                ],
            )
            .map_err(|e| Error::Write(log_failure("update", e)))?;

        let outcome = WriteOutcome::from_rows(rows);
        if outcome == WriteOutcome::Missing {
            tracing::warn!("Update skipped, record {id} does not exist");
        } else {
            tracing::debug!("Updated record {id}");
        }
        Ok(outcome)
    }

    fn delete(&self, id: RecordId) -> Result<WriteOutcome> {
        let rows = self
            .conn
            .execute("DELETE FROM records WHERE id = ?1", params![id.get()])
            .map_err(|e| Error::Write(log_failure("delete", e)))?;

        let outcome = WriteOutcome::from_rows(rows);
        if outcome == WriteOutcome::Missing {
            tracing::warn!("Delete skipped, record {id} does not exist");
        } else {
            tracing::debug!("Deleted record {id}");
        }
        Ok(outcome)
    }

    fn delete_all(&self) -> Result<usize> {
        let rows = self
            .conn
            .execute("DELETE FROM records", [])
            .map_err(|e| Error::Write(log_failure("delete_all", e)))?;
        tracing::info!("Deleted all {rows} records");
        Ok(rows)
    }

    fn count(&self) -> Result<usize> {
        Self::count_where(self.conn, "").map_err(|e| Error::Read(log_failure("count", e)))
    }

    fn count_with_location(&self) -> Result<usize> {
        Self::count_where(self.conn, LOCATION_FILTER)
            .map_err(|e| Error::Read(log_failure("count_with_location", e)))
    }

    fn page(&self, limit: usize, offset: usize) -> Result<Vec<Record>> {
        Self::select_page(self.conn, "", limit, offset)
            .map_err(|e| Error::Read(log_failure("page", e)))
    }

    fn page_with_location(&self, limit: usize, offset: usize) -> Result<Vec<Record>> {
        Self::select_page(self.conn, LOCATION_FILTER, limit, offset)
            .map_err(|e| Error::Read(log_failure("page_with_location", e)))
    }

    fn page_with_total(&self, scope: PageScope, limit: usize, offset: usize) -> Result<Page> {
        let read = || -> rusqlite::Result<Page> {
            let tx = self.conn.unchecked_transaction()?;
            let total = Self::count_where(&tx, scope.filter())?;
            let records = Self::select_page(&tx, scope.filter(), limit, offset)?;
            tx.commit()?;
            Ok(Page {
                records,
                total,
                offset,
                limit,
            })
        };

        read().map_err(|e| Error::Read(log_failure("page_with_total", e)))
    }

    fn seed_sample_data(&self) -> Result<usize> {
        // One statement per row: rows inserted before a failure stay in place
        let mut inserted = 0;
        for draft in sample_drafts() {
            self.insert(&draft).map_err(|e| {
                tracing::warn!("Seeding stopped after {inserted} rows");
                Error::Write(log_failure("seed", e))
            })?;
            inserted += 1;
        }
        tracing::info!("Inserted {inserted} sample records");
        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::models::Location;
    use pretty_assertions::assert_eq;

    fn setup() -> Database {
        Database::open_in_memory().unwrap()
    }

    fn draft(name: &str, date: &str) -> RecordDraft {
        RecordDraft {
            name: Some(name.to_string()),
            count: Some(1),
            date: Some(Timestamp::from_raw(date)),
            ..RecordDraft::default()
        }
    }

    fn names(records: &[Record]) -> Vec<&str> {
        records.iter().map(Record::display_name).collect()
    }

    #[test]
    fn test_create_and_get_round_trip() {
        let db = setup();
        let repo = SqliteRecordRepository::new(db.connection());

        let input = RecordDraft {
            name: Some("Heron".to_string()),
            count: Some(3),
            description: Some("Standing in the reeds".to_string()),
            image_uri: Some("content://media/external/images/42".to_string()),
            lat: Some(52.37),
            lng: Some(4.89),
            date: Some(Timestamp::from_raw("2024-05-01T06:30:00.000Z")),
        };

        let created = repo.create(&input).unwrap();
        assert_eq!(created.draft(), input);

        let fetched = repo.get(created.id).unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[test]
    fn test_create_with_all_fields_absent() {
        let db = setup();
        let repo = SqliteRecordRepository::new(db.connection());

        let created = repo.create(&RecordDraft::default()).unwrap();
        let fetched = repo.get(created.id).unwrap().unwrap();
        assert_eq!(fetched.draft(), RecordDraft::default());
    }

    #[test]
    fn test_get_missing_returns_none() {
        let db = setup();
        let repo = SqliteRecordRepository::new(db.connection());
        assert!(repo.get(RecordId::new(99)).unwrap().is_none());
    }

    #[test]
    fn test_ids_increase_and_are_never_reused() {
        let db = setup();
        let repo = SqliteRecordRepository::new(db.connection());

        let first = repo.create(&draft("a", "2024-01-01T00:00:00.000Z")).unwrap();
        let second = repo.create(&draft("b", "2024-01-02T00:00:00.000Z")).unwrap();
        assert!(second.id > first.id);

        repo.delete(second.id).unwrap();
        let third = repo.create(&draft("c", "2024-01-03T00:00:00.000Z")).unwrap();
        assert!(third.id > second.id);

        repo.delete_all().unwrap();
        let fourth = repo.create(&draft("d", "2024-01-04T00:00:00.000Z")).unwrap();
        assert!(fourth.id > third.id);
    }

    #[test]
    fn test_page_orders_by_date_descending() {
        let db = setup();
        let repo = SqliteRecordRepository::new(db.connection());

        repo.create(&draft("middle", "2024-03-02T09:00:00.000Z")).unwrap();
        repo.create(&draft("oldest", "2023-12-31T23:59:59.000Z")).unwrap();
        repo.create(&draft("newest", "2024-03-02T10:00:00.000Z")).unwrap();

        let page = repo.page(10, 0).unwrap();
        assert_eq!(names(&page), vec!["newest", "middle", "oldest"]);
    }

    #[test]
    fn test_equal_dates_break_ties_by_id_descending() {
        let db = setup();
        let repo = SqliteRecordRepository::new(db.connection());

        let same = "2024-06-01T12:00:00.000Z";
        repo.create(&draft("first", same)).unwrap();
        repo.create(&draft("second", same)).unwrap();
        repo.create(&draft("third", same)).unwrap();

        let page = repo.page(10, 0).unwrap();
        assert_eq!(names(&page), vec!["third", "second", "first"]);
    }

    #[test]
    fn test_undated_records_sort_last() {
        let db = setup();
        let repo = SqliteRecordRepository::new(db.connection());

        repo.create(&RecordDraft {
            name: Some("undated".to_string()),
            ..RecordDraft::default()
        })
        .unwrap();
        repo.create(&draft("dated", "2020-01-01T00:00:00.000Z")).unwrap();

        let page = repo.page(10, 0).unwrap();
        assert_eq!(names(&page), vec!["dated", "undated"]);
    }

    #[test]
    fn test_page_slices_and_past_end_is_empty() {
        let db = setup();
        let repo = SqliteRecordRepository::new(db.connection());

        for day in 1..=7 {
            repo.create(&draft(&format!("r{day}"), &format!("2024-01-0{day}T00:00:00.000Z")))
                .unwrap();
        }

        let second = repo.page(5, 5).unwrap();
        assert_eq!(names(&second), vec!["r2", "r1"]);

        assert!(repo.page(5, 7).unwrap().is_empty());
        assert!(repo.page(5, 100).unwrap().is_empty());
    }

    #[test]
    fn test_update_replaces_all_fields() {
        let db = setup();
        let repo = SqliteRecordRepository::new(db.connection());

        let mut original = draft("before", "2024-01-01T00:00:00.000Z");
        original.set_location(Some(Location::new(1.0, 2.0)));
        original.image_uri = Some("file:///a.jpg".to_string());
        let created = repo.create(&original).unwrap();

        let replacement = RecordDraft {
            name: Some("after".to_string()),
            count: Some(0),
            description: None,
            image_uri: None,
            lat: None,
            lng: None,
            date: Some(Timestamp::from_raw("2024-02-01T00:00:00.000Z")),
        };
        let outcome = repo.update(created.id, &replacement).unwrap();
        assert_eq!(outcome, WriteOutcome::Applied);

        let fetched = repo.get(created.id).unwrap().unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.draft(), replacement);
    }

    #[test]
    fn test_update_and_delete_missing_are_soft() {
        let db = setup();
        let repo = SqliteRecordRepository::new(db.connection());

        let outcome = repo
            .update(RecordId::new(404), &RecordDraft::default())
            .unwrap();
        assert_eq!(outcome, WriteOutcome::Missing);
        assert_eq!(repo.delete(RecordId::new(404)).unwrap(), WriteOutcome::Missing);
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_location_filter_excludes_half_located_rows() {
        let db = setup();
        let repo = SqliteRecordRepository::new(db.connection());

        let mut located = draft("located", "2024-01-03T00:00:00.000Z");
        located.set_location(Some(Location::new(10.0, 20.0)));
        repo.create(&located).unwrap();

        let mut lat_only = draft("lat-only", "2024-01-02T00:00:00.000Z");
        lat_only.lat = Some(10.0);
        repo.create(&lat_only).unwrap();

        let mut lng_only = draft("lng-only", "2024-01-01T00:00:00.000Z");
        lng_only.lng = Some(20.0);
        repo.create(&lng_only).unwrap();

        assert_eq!(repo.page(10, 0).unwrap().len(), 3);
        assert_eq!(names(&repo.page_with_location(10, 0).unwrap()), vec!["located"]);
        assert_eq!(repo.count().unwrap(), 3);
        assert_eq!(repo.count_with_location().unwrap(), 1);
    }

    #[test]
    fn test_page_with_total_matches_separate_reads() {
        let db = setup();
        let repo = SqliteRecordRepository::new(db.connection());
        repo.seed_sample_data().unwrap();
        repo.create(&draft("no-location", "2024-01-01T00:00:00.000Z"))
            .unwrap();

        let all = repo.page_with_total(PageScope::All, 4, 8).unwrap();
        assert_eq!(all.total, repo.count().unwrap());
        assert_eq!(all.records, repo.page(4, 8).unwrap());
        assert_eq!((all.offset, all.limit), (8, 4));

        let located = repo.page_with_total(PageScope::WithLocation, 50, 0).unwrap();
        assert_eq!(located.total, 10);
        assert_eq!(located.records.len(), 10);
    }

    #[test]
    fn test_delete_all_then_page_is_empty() {
        let db = setup();
        let repo = SqliteRecordRepository::new(db.connection());
        repo.seed_sample_data().unwrap();

        assert_eq!(repo.delete_all().unwrap(), 10);
        assert_eq!(repo.count().unwrap(), 0);
        assert!(repo.page(10, 0).unwrap().is_empty());
        assert!(repo.page_with_location(10, 0).unwrap().is_empty());
    }

    #[test]
    fn test_seed_sample_data() {
        let db = setup();
        let repo = SqliteRecordRepository::new(db.connection());

        assert_eq!(repo.seed_sample_data().unwrap(), 10);
        assert_eq!(repo.count_with_location().unwrap(), 10);

        let page = repo.page(3, 0).unwrap();
        assert_eq!(names(&page), vec!["Peach", "Watermelon", "Pineapple"]);
    }

    #[test]
    fn test_read_on_missing_table_is_read_error() {
        let db = setup();
        db.connection().execute_batch("DROP TABLE records").unwrap();
        let repo = SqliteRecordRepository::new(db.connection());

        assert!(matches!(repo.count(), Err(Error::Read(_))));
        assert!(matches!(repo.page(10, 0), Err(Error::Read(_))));
        assert!(matches!(
            repo.create(&RecordDraft::default()),
            Err(Error::Write(_))
        ));
        assert!(matches!(repo.seed_sample_data(), Err(Error::Write(_))));
    }
}
