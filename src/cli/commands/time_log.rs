//! Time log commands.

use chrono::Utc;

use crate::cli::args::{AddLogArgs, LogCommands, OutputFormat};
use crate::config::Paths;
use crate::core::{parse_datetime, parse_duration_secs};
use crate::error::QuickDevError;
use crate::features::projects::{ProjectStorage, TaskStorage};
use crate::features::timelog::{TimeLogRecord, TimeLogStorage};
use crate::output::{format_time_log, format_time_logs, to_json};

/// Execute log subcommands
///
/// # Errors
///
/// Returns an error if the database call fails, the input is invalid, or
/// output formatting fails.
pub fn log(paths: &Paths, cmd: LogCommands, format: OutputFormat) -> Result<String, QuickDevError> {
    let logs = TimeLogStorage::new(paths)?;

    match cmd {
        LogCommands::List { limit, project } => {
            let projects = ProjectStorage::new(paths)?;
            let records = match project {
                Some(key) => {
                    let project = projects.resolve(&key)?;
                    let mut records = logs.get_by_project(&project.id)?;
                    records.truncate(limit);
                    records
                }
                None => logs.get_recent(limit)?,
            };
            format_time_logs(&records, &projects.list()?, format)
        }
        LogCommands::Add(args) => add_log(paths, &logs, &args, format),
        LogCommands::Remove { id } => {
            let record = resolve_log(&logs, &id)?;
            logs.delete(&record.id)?;
            match format {
                OutputFormat::Json => {
                    to_json(&serde_json::json!({ "action": "removed", "id": record.id }))
                }
                OutputFormat::Pretty => Ok(format!(
                    "Removed time log {} ({} {})",
                    record.id,
                    record.local_date(),
                    record.time_range()
                )),
            }
        }
    }
}

fn add_log(
    paths: &Paths,
    logs: &TimeLogStorage,
    args: &AddLogArgs,
    format: OutputFormat,
) -> Result<String, QuickDevError> {
    let project = ProjectStorage::new(paths)?.resolve(&args.project)?;

    let task_id = match &args.task {
        Some(key) => {
            let task = TaskStorage::new(paths)?.resolve(key)?;
            if task.project_id != project.id {
                return Err(QuickDevError::InvalidArgument(format!(
                    "Task '{}' does not belong to project '{}'",
                    task.title, project.name
                )));
            }
            Some(task.id)
        }
        None => None,
    };

    let duration = parse_duration_secs(&args.duration).ok_or_else(|| {
        QuickDevError::InvalidArgument(format!(
            "Invalid duration '{}', expected e.g. 25m, 1h30m or 90s",
            args.duration
        ))
    })?;

    let record = match &args.start {
        Some(input) => {
            let start = parse_datetime(input).ok_or_else(|| {
                QuickDevError::InvalidArgument(format!(
                    "Invalid start time '{input}', expected RFC 3339 or YYYY-MM-DD HH:MM"
                ))
            })?;
            TimeLogRecord::starting_at(&project.id, task_id.as_deref(), start, duration, &args.notes)?
        }
        None => TimeLogRecord::ending_at(&project.id, task_id.as_deref(), Utc::now(), duration, &args.notes)?,
    };

    logs.insert(&record)?;
    format_time_log(&record, format)
}

/// Find a time log by exact ID or unique ID prefix.
fn resolve_log(logs: &TimeLogStorage, key: &str) -> Result<TimeLogRecord, QuickDevError> {
    if let Some(record) = logs.get(key)? {
        return Ok(record);
    }

    let mut matches: Vec<TimeLogRecord> = logs
        .get_all()?
        .into_iter()
        .filter(|l| l.id.starts_with(key))
        .collect();

    match matches.len() {
        1 => Ok(matches.remove(0)),
        0 => Err(QuickDevError::NotFound(format!("Time log '{key}'"))),
        n => Err(QuickDevError::InvalidArgument(format!(
            "'{key}' matches {n} time logs, use a longer ID"
        ))),
    }
}
