//! Time-log records.

use chrono::{DateTime, Duration, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::QuickDevError;

/// Project ID used for work logged without a selected project.
pub const UNASSIGNED_PROJECT_ID: &str = "unassigned";

/// A finished stretch of work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeLogRecord {
    /// Unique ID (UUID v4)
    pub id: String,
    /// Project the time was spent on
    pub project_id: String,
    /// Task the time was spent on, if any
    pub task_id: Option<String>,
    /// Start of the logged span
    pub start_time: DateTime<Utc>,
    /// End of the logged span
    pub end_time: DateTime<Utc>,
    /// Logged seconds; always `end_time - start_time`
    pub duration_seconds: u32,
    /// Free-form notes
    pub notes: String,
}

impl TimeLogRecord {
    /// Build a record that ends at `end_time` and spans `duration_seconds`.
    ///
    /// # Errors
    ///
    /// Returns an error if the duration is zero.
    pub fn ending_at(
        project_id: &str,
        task_id: Option<&str>,
        end_time: DateTime<Utc>,
        duration_seconds: u32,
        notes: &str,
    ) -> Result<Self, QuickDevError> {
        let start_time = end_time - Duration::seconds(i64::from(duration_seconds));
        Self::build(project_id, task_id, start_time, duration_seconds, notes)
    }

    /// Build a record that starts at `start_time` and spans `duration_seconds`.
    ///
    /// # Errors
    ///
    /// Returns an error if the duration is zero.
    pub fn starting_at(
        project_id: &str,
        task_id: Option<&str>,
        start_time: DateTime<Utc>,
        duration_seconds: u32,
        notes: &str,
    ) -> Result<Self, QuickDevError> {
        Self::build(project_id, task_id, start_time, duration_seconds, notes)
    }

    fn build(
        project_id: &str,
        task_id: Option<&str>,
        start_time: DateTime<Utc>,
        duration_seconds: u32,
        notes: &str,
    ) -> Result<Self, QuickDevError> {
        if duration_seconds == 0 {
            return Err(QuickDevError::InvalidArgument(
                "A time log must span at least one second".to_string(),
            ));
        }
        if project_id.trim().is_empty() {
            return Err(QuickDevError::InvalidArgument(
                "A time log needs a project".to_string(),
            ));
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            project_id: project_id.to_string(),
            task_id: task_id.filter(|t| !t.is_empty()).map(str::to_string),
            start_time,
            end_time: start_time + Duration::seconds(i64::from(duration_seconds)),
            duration_seconds,
            notes: notes.to_string(),
        })
    }

    /// Start time in the local timezone.
    #[must_use]
    pub fn start_time_local(&self) -> DateTime<Local> {
        self.start_time.with_timezone(&Local)
    }

    /// End time in the local timezone.
    #[must_use]
    pub fn end_time_local(&self) -> DateTime<Local> {
        self.end_time.with_timezone(&Local)
    }

    /// Local calendar date the work started on.
    #[must_use]
    pub fn local_date(&self) -> NaiveDate {
        self.start_time_local().date_naive()
    }

    /// Local `HH:MM - HH:MM` span.
    #[must_use]
    pub fn time_range(&self) -> String {
        format!(
            "{} - {}",
            self.start_time_local().format("%H:%M"),
            self.end_time_local().format("%H:%M")
        )
    }
}
