//! Output formatting for quickdev.
//!
//! This module provides formatters for displaying projects, tasks and time
//! logs in various formats.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::error::QuickDevError;
use crate::features::projects::{Project, Task};
use crate::features::timelog::{TimeLogRecord, TimeSummary, WorkHoursChart};

pub use json::*;
pub use pretty::*;

/// Format projects with their logged seconds based on output format
///
/// # Errors
///
/// Returns `QuickDevError::Json` if JSON serialization fails.
pub fn format_projects(
    projects: &[(Project, u64)],
    format: OutputFormat,
) -> Result<String, QuickDevError> {
    match format {
        OutputFormat::Pretty => Ok(format_projects_pretty(projects)),
        OutputFormat::Json => format_projects_json(projects),
    }
}

/// Format a single project and its tasks based on output format
///
/// # Errors
///
/// Returns `QuickDevError::Json` if JSON serialization fails.
pub fn format_project(
    project: &Project,
    tasks: &[Task],
    total_seconds: u64,
    format: OutputFormat,
) -> Result<String, QuickDevError> {
    match format {
        OutputFormat::Pretty => Ok(format_project_pretty(project, tasks, total_seconds)),
        OutputFormat::Json => format_project_json(project, tasks, total_seconds),
    }
}

/// Format tasks based on output format
///
/// # Errors
///
/// Returns `QuickDevError::Json` if JSON serialization fails.
pub fn format_tasks(tasks: &[Task], title: &str, format: OutputFormat) -> Result<String, QuickDevError> {
    match format {
        OutputFormat::Pretty => Ok(format_tasks_pretty(tasks, title)),
        OutputFormat::Json => format_tasks_json(tasks, title),
    }
}

/// Format a single task based on output format
///
/// # Errors
///
/// Returns `QuickDevError::Json` if JSON serialization fails.
pub fn format_task(task: &Task, format: OutputFormat) -> Result<String, QuickDevError> {
    match format {
        OutputFormat::Pretty => Ok(format_task_pretty(task)),
        OutputFormat::Json => to_json(task),
    }
}

/// Format time logs based on output format
///
/// # Errors
///
/// Returns `QuickDevError::Json` if JSON serialization fails.
pub fn format_time_logs(
    logs: &[TimeLogRecord],
    projects: &[Project],
    format: OutputFormat,
) -> Result<String, QuickDevError> {
    match format {
        OutputFormat::Pretty => Ok(format_time_logs_pretty(logs, projects)),
        OutputFormat::Json => format_time_logs_json(logs),
    }
}

/// Format a single time log based on output format
///
/// # Errors
///
/// Returns `QuickDevError::Json` if JSON serialization fails.
pub fn format_time_log(log: &TimeLogRecord, format: OutputFormat) -> Result<String, QuickDevError> {
    match format {
        OutputFormat::Pretty => Ok(format_time_log_pretty(log)),
        OutputFormat::Json => to_json(log),
    }
}

/// Format a time summary based on output format
///
/// # Errors
///
/// Returns `QuickDevError::Json` if JSON serialization fails.
pub fn format_summary(summary: &TimeSummary, format: OutputFormat) -> Result<String, QuickDevError> {
    match format {
        OutputFormat::Pretty => Ok(format_summary_pretty(summary)),
        OutputFormat::Json => format_summary_json(summary),
    }
}

/// Format a work-hours chart based on output format
///
/// # Errors
///
/// Returns `QuickDevError::Json` if JSON serialization fails.
pub fn format_chart(chart: &WorkHoursChart, format: OutputFormat) -> Result<String, QuickDevError> {
    match format {
        OutputFormat::Pretty => Ok(format_chart_pretty(chart)),
        OutputFormat::Json => format_chart_json(chart),
    }
}
