//! Storage layer for quickdev.
//!
//! This module provides SQLite-based persistence for:
//! - Projects and their tasks
//! - Time logs committed by the work timer

mod database;
mod migrations;

pub use database::Database;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;

/// Format a timestamp for storage.
///
/// Whole seconds with a `Z` suffix, so stored values sort lexically.
pub(crate) fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse an RFC 3339 column value, reporting failures as a column error.
pub(crate) fn parse_timestamp(idx: usize, value: &str) -> Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
