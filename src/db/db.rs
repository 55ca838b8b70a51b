use super::migrations::init_with_migrations;
use crate::libs::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::msg_debug;
use anyhow::Result;
use chrono::{DateTime, Datelike, Utc};
use parking_lot::{Mutex, MutexGuard};
use rusqlite::types::Type;
use rusqlite::{Connection, Row};
use std::path::Path;
use std::sync::Arc;

pub const DB_FILE_NAME: &str = "taskd.db";

/// Timestamps are stored as fixed-width UTC text so that SQL string
/// comparison orders them chronologically.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.9f+00:00";

/// Shared handle to the SQLite connection.
///
/// Cloning is cheap; all clones use the same connection and take turns
/// through the mutex.
#[derive(Clone)]
pub struct Db {
    conn: Arc<Mutex<Connection>>,
}

impl Db {
    /// Opens the database in the platform data directory.
    pub fn new() -> Result<Db> {
        let db_file_path = DataStorage::new().get_path(DB_FILE_NAME)?;
        Self::open(db_file_path)
    }

    /// Opens (creating if needed) the database at `path` and migrates it.
    pub fn open(path: impl AsRef<Path>) -> Result<Db> {
        let mut conn = Connection::open(path.as_ref())?;
        Self::prepare(&mut conn)?;
        msg_debug!(Message::DatabaseOpened(path.as_ref().display().to_string()));
        Ok(Self::wrap(conn))
    }

    /// Private in-memory database, used by tests.
    pub fn open_in_memory() -> Result<Db> {
        let mut conn = Connection::open_in_memory()?;
        Self::prepare(&mut conn)?;
        Ok(Self::wrap(conn))
    }

    /// Raw connection without migrations, for inspecting schema state.
    pub fn new_without_migrations(path: impl AsRef<Path>) -> Result<Connection> {
        Ok(Connection::open(path)?)
    }

    pub fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock()
    }

    fn prepare(conn: &mut Connection) -> Result<()> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        init_with_migrations(conn)
    }

    fn wrap(conn: Connection) -> Db {
        Db {
            conn: Arc::new(Mutex::new(conn)),
        }
    }
}

/// Whether `ts` fits the four-digit year of [`TIMESTAMP_FORMAT`].
pub fn is_storable(ts: &DateTime<Utc>) -> bool {
    (0..=9999).contains(&ts.year())
}

pub fn encode_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

pub fn timestamp_column(row: &Row, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    decode_timestamp(idx, &raw)
}

pub fn optional_timestamp_column(row: &Row, idx: usize) -> rusqlite::Result<Option<DateTime<Utc>>> {
    let raw: Option<String> = row.get(idx)?;
    raw.map(|raw| decode_timestamp(idx, &raw)).transpose()
}

fn decode_timestamp(idx: usize, raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn encoded_timestamps_sort_chronologically() {
        let earlier = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
        let later = earlier.with_nanosecond(1).unwrap();
        let much_later = earlier.with_nanosecond(500_000_000).unwrap();

        let a = encode_timestamp(&earlier);
        let b = encode_timestamp(&later);
        let c = encode_timestamp(&much_later);

        assert_eq!(a, "2024-03-15T12:00:00.000000000+00:00");
        assert!(a < b && b < c);
    }

    #[test]
    fn only_four_digit_years_are_storable() {
        assert!(is_storable(&Utc.with_ymd_and_hms(9999, 12, 31, 23, 59, 59).unwrap()));
        assert!(is_storable(&Utc.with_ymd_and_hms(0, 1, 1, 0, 0, 0).unwrap()));
        assert!(!is_storable(&Utc.with_ymd_and_hms(10000, 1, 1, 0, 0, 0).unwrap()));
        assert!(!is_storable(&Utc.with_ymd_and_hms(-1, 12, 31, 0, 0, 0).unwrap()));
    }

    #[test]
    fn timestamps_survive_a_column_round_trip() {
        let db = Db::open_in_memory().unwrap();
        let conn = db.conn();
        let ts = Utc.with_ymd_and_hms(2024, 3, 15, 23, 59, 59).unwrap().with_nanosecond(999_999_999).unwrap();

        let back = conn
            .query_row("SELECT ?1, NULL", [encode_timestamp(&ts)], |row| {
                Ok((timestamp_column(row, 0)?, optional_timestamp_column(row, 1)?))
            })
            .unwrap();

        assert_eq!(back, (ts, None));
    }
}
