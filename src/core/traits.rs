//! Collaborator traits for the work timer.
//!
//! The timer commits finished work through a [`TimeLogSink`]; hosts read
//! selectable projects and tasks through [`ProjectStore`] and [`TaskStore`].
//! The SQLite-backed implementations live in the feature modules.

use crate::error::QuickDevError;
use crate::features::projects::{Project, Task};
use crate::features::timelog::TimeLogRecord;

/// Destination for finished time-log records.
#[cfg_attr(test, mockall::automock)]
pub trait TimeLogSink {
    /// Persist one record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record could not be stored.
    fn record(&self, record: &TimeLogRecord) -> Result<(), QuickDevError>;
}

impl<T: TimeLogSink + ?Sized> TimeLogSink for &T {
    fn record(&self, record: &TimeLogRecord) -> Result<(), QuickDevError> {
        (**self).record(record)
    }
}

/// Read access to projects.
pub trait ProjectStore {
    /// All projects, most recently opened first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn list_projects(&self) -> Result<Vec<Project>, QuickDevError>;
}

/// Read access to tasks.
pub trait TaskStore {
    /// Tasks ordered by position, optionally limited to one project.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn list_tasks(&self, project_id: Option<&str>) -> Result<Vec<Task>, QuickDevError>;

    /// Tasks of a project that can still be worked on.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn selectable_tasks(&self, project_id: &str) -> Result<Vec<Task>, QuickDevError> {
        Ok(self
            .list_tasks(Some(project_id))?
            .into_iter()
            .filter(Task::is_selectable)
            .collect())
    }
}
