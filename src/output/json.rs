//! JSON output formatting for quickdev.

use serde::Serialize;
use serde_json::json;

use crate::error::QuickDevError;
use crate::features::projects::{Project, Task, TaskProgress};
use crate::features::timelog::{group_by_date, TimeLogRecord, TimeSummary, WorkHoursChart};

/// A project with its logged time.
#[derive(Serialize)]
struct ProjectEntry<'a> {
    #[serde(flatten)]
    project: &'a Project,
    total_seconds: u64,
}

/// Format projects and their logged seconds as JSON
///
/// # Errors
///
/// Returns `QuickDevError::Json` if JSON serialization fails.
pub fn format_projects_json(projects: &[(Project, u64)]) -> Result<String, QuickDevError> {
    let items: Vec<ProjectEntry<'_>> = projects
        .iter()
        .map(|(project, total_seconds)| ProjectEntry {
            project,
            total_seconds: *total_seconds,
        })
        .collect();

    let output = json!({
        "count": items.len(),
        "items": items
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format one project with its tasks as JSON
///
/// # Errors
///
/// Returns `QuickDevError::Json` if JSON serialization fails.
pub fn format_project_json(
    project: &Project,
    tasks: &[Task],
    total_seconds: u64,
) -> Result<String, QuickDevError> {
    let entry = ProjectEntry {
        project,
        total_seconds,
    };
    let output = json!({
        "project": entry,
        "progress": TaskProgress::from_tasks(tasks),
        "tasks": tasks
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format tasks as JSON
///
/// # Errors
///
/// Returns `QuickDevError::Json` if JSON serialization fails.
pub fn format_tasks_json(tasks: &[Task], title: &str) -> Result<String, QuickDevError> {
    let output = json!({
        "list": title,
        "count": tasks.len(),
        "items": tasks
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format time logs, grouped by day, as JSON
///
/// # Errors
///
/// Returns `QuickDevError::Json` if JSON serialization fails.
pub fn format_time_logs_json(logs: &[TimeLogRecord]) -> Result<String, QuickDevError> {
    let output = json!({
        "count": logs.len(),
        "total_seconds": logs.iter().map(|l| u64::from(l.duration_seconds)).sum::<u64>(),
        "days": group_by_date(logs)
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format a time summary as JSON
///
/// # Errors
///
/// Returns `QuickDevError::Json` if JSON serialization fails.
pub fn format_summary_json(summary: &TimeSummary) -> Result<String, QuickDevError> {
    to_json(summary)
}

/// Format a work-hours chart as JSON
///
/// # Errors
///
/// Returns `QuickDevError::Json` if JSON serialization fails.
pub fn format_chart_json(chart: &WorkHoursChart) -> Result<String, QuickDevError> {
    let output = json!({
        "period": chart.period,
        "start": chart.start,
        "end": chart.end,
        "total_seconds": chart.total_seconds,
        "total_hours": chart.total_hours(),
        "buckets": chart.buckets
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Serialize any value as pretty JSON
///
/// # Errors
///
/// Returns `QuickDevError::Json` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, QuickDevError> {
    Ok(serde_json::to_string_pretty(value)?)
}
