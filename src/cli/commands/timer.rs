//! Interactive timer command.

use chrono::Utc;
use log::info;

use crate::cli::args::{OutputFormat, TimerArgs};
use crate::config::{Config, Paths};
use crate::core::{ProjectStore, SystemClock, TaskStore};
use crate::error::QuickDevError;
use crate::features::projects::{ProjectStorage, Task, TaskStorage};
use crate::features::timelog::TimeLogStorage;
use crate::features::timer::{Attribution, TimerSession};
use crate::output::format_time_logs;
use crate::tui::{self, Alerts, App};

/// Execute timer command
///
/// Runs the timer TUI and prints the time logged while it was open.
///
/// # Errors
///
/// Returns an error if the config is invalid, the database call fails, or
/// the terminal cannot be used.
pub fn timer(
    paths: &Paths,
    config: &Config,
    args: &TimerArgs,
    format: OutputFormat,
) -> Result<String, QuickDevError> {
    let app = build_app(paths, args, config)?;
    let projects = app.projects.clone();

    let records = tui::run(app)?;

    if records.is_empty() && format == OutputFormat::Pretty {
        return Ok("No time logged".to_string());
    }
    format_time_logs(&records, &projects, format)
}

/// Set up the timer session and its selectable projects and tasks.
fn build_app(
    paths: &Paths,
    args: &TimerArgs,
    config: &Config,
) -> Result<App<SystemClock, TimeLogStorage>, QuickDevError> {
    let project_store = ProjectStorage::new(paths)?;
    let task_store = TaskStorage::new(paths)?;

    let attribution = resolve_attribution(&project_store, &task_store, args)?;
    if let Some(id) = &attribution.project_id {
        project_store.update_last_opened(id, Utc::now())?;
    }

    let projects: Vec<_> = project_store
        .list_projects()?
        .into_iter()
        .filter(|p| p.is_active || attribution.project_id.as_deref() == Some(p.id.as_str()))
        .collect();
    let mut tasks: Vec<Task> = Vec::new();
    for project in &projects {
        tasks.extend(task_store.selectable_tasks(&project.id)?);
    }

    let mut session = TimerSession::new(
        SystemClock,
        TimeLogStorage::new(paths)?,
        config.timer.durations()?,
        config.timer.options()?,
    );
    session.set_attribution(attribution);
    if let Some(mode) = args.mode {
        session.select_mode(mode);
    }

    info!(
        "Timer ready with {} projects and {} open tasks",
        projects.len(),
        tasks.len()
    );

    let alerts = Alerts {
        notify: config.timer.show_notifications,
        sound: config.timer.play_sound,
    };
    Ok(App::new(session, projects, tasks, alerts))
}

/// Turn `--project`, `--task` and `--notes` into an attribution.
///
/// A task without a project selects the task's project.
fn resolve_attribution(
    projects: &ProjectStorage,
    tasks: &TaskStorage,
    args: &TimerArgs,
) -> Result<Attribution, QuickDevError> {
    let project = args.project.as_deref().map(|key| projects.resolve(key)).transpose()?;
    let task = args.task.as_deref().map(|key| tasks.resolve(key)).transpose()?;

    let project_id = match (&project, &task) {
        (Some(project), Some(task)) if task.project_id != project.id => {
            return Err(QuickDevError::InvalidArgument(format!(
                "Task '{}' does not belong to project '{}'",
                task.title, project.name
            )));
        }
        (Some(project), _) => Some(project.id.clone()),
        (None, Some(task)) => Some(task.project_id.clone()),
        (None, None) => None,
    };

    Ok(Attribution {
        project_id,
        task_id: task.map(|t| t.id),
        notes: args.notes.clone().unwrap_or_default(),
    })
}
