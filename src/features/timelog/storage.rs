//! Time-log storage.
//!
//! Persists committed work time to the local database.

use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension, Row};

use super::record::TimeLogRecord;
use crate::config::Paths;
use crate::core::TimeLogSink;
use crate::error::QuickDevError;
use crate::storage::{format_timestamp, parse_timestamp, Database};

const SELECT_COLUMNS: &str =
    "SELECT id, project_id, task_id, start_time, end_time, duration_seconds, notes FROM time_logs";

/// Storage for time logs.
pub struct TimeLogStorage {
    db: Database,
}

impl TimeLogStorage {
    /// Open time-log storage in the given data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn new(paths: &Paths) -> Result<Self, QuickDevError> {
        let db = Database::open(paths)?;
        Ok(Self { db })
    }

    /// Create storage with an existing database connection.
    #[must_use]
    pub const fn with_database(db: Database) -> Self {
        Self { db }
    }

    /// Insert a record.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails, including on a duplicate ID.
    pub fn insert(&self, record: &TimeLogRecord) -> Result<(), QuickDevError> {
        self.db
            .connection()
            .execute(
                r"INSERT INTO time_logs
                  (id, project_id, task_id, start_time, end_time, duration_seconds, notes)
                  VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    record.id,
                    record.project_id,
                    record.task_id,
                    format_timestamp(&record.start_time),
                    format_timestamp(&record.end_time),
                    record.duration_seconds,
                    record.notes,
                ],
            )
            .map_err(|e| QuickDevError::Database(format!("Failed to insert time log: {e}")))?;

        log::debug!(
            "Stored time log {} ({}s on {})",
            record.id,
            record.duration_seconds,
            record.project_id
        );
        Ok(())
    }

    /// Get a record by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get(&self, id: &str) -> Result<Option<TimeLogRecord>, QuickDevError> {
        self.db
            .connection()
            .query_row(&format!("{SELECT_COLUMNS} WHERE id = ?1"), [id], row_to_record)
            .optional()
            .map_err(|e| QuickDevError::Database(format!("Failed to query time log: {e}")))
    }

    /// Get the most recent records, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_recent(&self, limit: usize) -> Result<Vec<TimeLogRecord>, QuickDevError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        self.query(
            &format!("{SELECT_COLUMNS} ORDER BY start_time DESC LIMIT ?1"),
            params![limit],
        )
    }

    /// Get every record for a project, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_by_project(&self, project_id: &str) -> Result<Vec<TimeLogRecord>, QuickDevError> {
        self.query(
            &format!("{SELECT_COLUMNS} WHERE project_id = ?1 ORDER BY start_time DESC"),
            params![project_id],
        )
    }

    /// Get records that started in `[start, end)`, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<TimeLogRecord>, QuickDevError> {
        self.query(
            &format!(
                "{SELECT_COLUMNS} WHERE start_time >= ?1 AND start_time < ?2 ORDER BY start_time DESC"
            ),
            params![format_timestamp(&start), format_timestamp(&end)],
        )
    }

    /// Get every record, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_all(&self) -> Result<Vec<TimeLogRecord>, QuickDevError> {
        self.query(&format!("{SELECT_COLUMNS} ORDER BY start_time DESC"), params![])
    }

    /// Total logged seconds for a project.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn total_for_project(&self, project_id: &str) -> Result<u64, QuickDevError> {
        let total: i64 = self
            .db
            .connection()
            .query_row(
                "SELECT COALESCE(SUM(duration_seconds), 0) FROM time_logs WHERE project_id = ?1",
                [project_id],
                |row| row.get(0),
            )
            .map_err(|e| QuickDevError::Database(format!("Failed to query total time: {e}")))?;

        Ok(u64::try_from(total).unwrap_or(0))
    }

    /// Delete a record. Returns whether a record was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete(&self, id: &str) -> Result<bool, QuickDevError> {
        let rows = self
            .db
            .connection()
            .execute("DELETE FROM time_logs WHERE id = ?1", [id])
            .map_err(|e| QuickDevError::Database(format!("Failed to delete time log: {e}")))?;

        Ok(rows > 0)
    }

    fn query<P: rusqlite::Params>(
        &self,
        sql: &str,
        params: P,
    ) -> Result<Vec<TimeLogRecord>, QuickDevError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| QuickDevError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map(params, row_to_record)
            .map_err(|e| QuickDevError::Database(format!("Failed to query time logs: {e}")))?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| QuickDevError::Database(e.to_string()))
    }
}

impl TimeLogSink for TimeLogStorage {
    fn record(&self, record: &TimeLogRecord) -> Result<(), QuickDevError> {
        self.insert(record)
    }
}

/// Convert a database row to a `TimeLogRecord`.
fn row_to_record(row: &Row<'_>) -> Result<TimeLogRecord, rusqlite::Error> {
    let start_time: String = row.get(3)?;
    let end_time: String = row.get(4)?;

    Ok(TimeLogRecord {
        id: row.get(0)?,
        project_id: row.get(1)?,
        task_id: row.get(2)?,
        start_time: parse_timestamp(3, &start_time)?,
        end_time: parse_timestamp(4, &end_time)?,
        duration_seconds: row.get(5)?,
        notes: row.get(6)?,
    })
}
