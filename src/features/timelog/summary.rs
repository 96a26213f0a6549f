//! Time-log summaries.
//!
//! Totals for today, the current week and each project, task progress, plus
//! the per-day grouping used when listing logs.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::record::TimeLogRecord;
use crate::core::start_of_week;
use crate::features::projects::{Project, Task, TaskProgress};

/// Label for time logged against projects that no longer exist.
pub const UNKNOWN_PROJECT: &str = "Unknown Project";

/// Logs that started on one local day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayLogs {
    /// Local calendar date
    pub date: NaiveDate,
    /// Sum of the day's durations
    pub total_seconds: u64,
    /// The day's logs, in input order
    pub logs: Vec<TimeLogRecord>,
}

/// Group logs by local start date, newest date first.
///
/// Order within a day follows the input.
#[must_use]
pub fn group_by_date(logs: &[TimeLogRecord]) -> Vec<DayLogs> {
    let mut days: BTreeMap<NaiveDate, Vec<TimeLogRecord>> = BTreeMap::new();
    for log in logs {
        days.entry(log.local_date()).or_default().push(log.clone());
    }

    days.into_iter()
        .rev()
        .map(|(date, logs)| DayLogs {
            date,
            total_seconds: total_seconds(&logs),
            logs,
        })
        .collect()
}

/// Logged time for one project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectTime {
    /// Project ID, `None` for the unknown-project bucket
    pub project_id: Option<String>,
    /// Project name
    pub name: String,
    /// Project color
    pub color: Option<String>,
    /// Total logged seconds
    pub seconds: u64,
    /// The project's tasks by status, empty for the unknown bucket
    pub tasks: TaskProgress,
}

/// Summary of tracked time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSummary {
    /// Seconds logged today (local)
    pub today_seconds: u64,
    /// Seconds logged since Sunday 00:00 (local)
    pub week_seconds: u64,
    /// Seconds logged overall
    pub total_seconds: u64,
    /// Number of logs
    pub log_count: usize,
    /// Number of projects
    pub project_count: usize,
    /// Number of projects shown in the timer
    pub active_projects: usize,
    /// All tasks by status
    pub tasks: TaskProgress,
    /// Every known project, then the unknown bucket if it has time
    pub by_project: Vec<ProjectTime>,
}

impl TimeSummary {
    /// Compute a summary as of `now`.
    #[must_use]
    pub fn compute(
        logs: &[TimeLogRecord],
        projects: &[Project],
        tasks: &[Task],
        now: DateTime<Utc>,
    ) -> Self {
        let now_local = now.with_timezone(&Local);
        let today = now_local.date_naive();
        let week_start = start_of_week(now_local).with_timezone(&Utc);

        let today_seconds = logs
            .iter()
            .filter(|l| l.local_date() == today)
            .map(|l| u64::from(l.duration_seconds))
            .sum();

        let week_seconds = logs
            .iter()
            .filter(|l| l.start_time >= week_start)
            .map(|l| u64::from(l.duration_seconds))
            .sum();

        let mut per_project: HashMap<&str, u64> = HashMap::new();
        for log in logs {
            *per_project.entry(log.project_id.as_str()).or_default() +=
                u64::from(log.duration_seconds);
        }

        let mut by_project: Vec<ProjectTime> = projects
            .iter()
            .map(|p| ProjectTime {
                project_id: Some(p.id.clone()),
                name: p.name.clone(),
                color: Some(p.color.clone()),
                seconds: per_project.remove(p.id.as_str()).unwrap_or(0),
                tasks: TaskProgress::from_tasks(tasks.iter().filter(|t| t.project_id == p.id)),
            })
            .collect();

        let unknown: u64 = per_project.values().sum();
        if unknown > 0 {
            by_project.push(ProjectTime {
                project_id: None,
                name: UNKNOWN_PROJECT.to_string(),
                color: None,
                seconds: unknown,
                tasks: TaskProgress::default(),
            });
        }

        Self {
            today_seconds,
            week_seconds,
            total_seconds: total_seconds(logs),
            log_count: logs.len(),
            project_count: projects.len(),
            active_projects: projects.iter().filter(|p| p.is_active).count(),
            tasks: TaskProgress::from_tasks(tasks),
            by_project,
        }
    }
}

fn total_seconds(logs: &[TimeLogRecord]) -> u64 {
    logs.iter().map(|l| u64::from(l.duration_seconds)).sum()
}
