//! Command implementations for quickdev.
//!
//! Every command takes the resolved data paths and returns the text to print.

mod config;
mod time_log;
mod timer;

pub use config::config;
pub use time_log::log;
pub use timer::timer;

use chrono::{Local, NaiveDate, Utc};
use clap_complete::Shell;

use crate::cli::args::{
    AddProjectArgs, AddTaskArgs, EditProjectArgs, EditTaskArgs, OutputFormat, ProjectCommands,
    TaskCommands,
};
use crate::config::Paths;
use crate::core::parse_date;
use crate::error::QuickDevError;
use crate::features::projects::{
    Project, ProjectChanges, ProjectStorage, Task, TaskChanges, TaskStorage,
};
use crate::features::shell::{completion_install_instructions, generate_completions};
use crate::features::timelog::{ChartPeriod, TimeLogStorage, TimeSummary, WorkHoursChart};
use crate::output::{
    format_chart, format_project, format_projects, format_summary, format_task, format_tasks,
    to_json,
};

/// Execute project subcommands
///
/// # Errors
///
/// Returns an error if the database call fails or output formatting fails.
pub fn project(
    paths: &Paths,
    cmd: ProjectCommands,
    format: OutputFormat,
) -> Result<String, QuickDevError> {
    let projects = ProjectStorage::new(paths)?;

    match cmd {
        ProjectCommands::List => {
            let logs = TimeLogStorage::new(paths)?;
            let rows = projects
                .list()?
                .into_iter()
                .map(|p| {
                    let total = logs.total_for_project(&p.id)?;
                    Ok::<_, QuickDevError>((p, total))
                })
                .collect::<Result<Vec<_>, _>>()?;
            format_projects(&rows, format)
        }
        ProjectCommands::Add(args) => add_project(&projects, &args, format),
        ProjectCommands::Show { id } => {
            let project = projects.resolve(&id)?;
            let tasks = TaskStorage::new(paths)?.list(Some(&project.id))?;
            let total = TimeLogStorage::new(paths)?.total_for_project(&project.id)?;
            format_project(&project, &tasks, total, format)
        }
        ProjectCommands::Edit(args) => edit_project(&projects, args, format),
        ProjectCommands::Remove { id } => {
            let project = projects.resolve(&id)?;
            projects.delete(&project.id)?;
            message(format, "removed", &project.id, &format!("Removed project: {}", project.name))
        }
    }
}

fn add_project(
    projects: &ProjectStorage,
    args: &AddProjectArgs,
    format: OutputFormat,
) -> Result<String, QuickDevError> {
    let project = Project::new(&args.name, &args.description, args.color.as_deref(), &args.icon)?;
    projects.add(&project)?;

    match format {
        OutputFormat::Json => to_json(&project),
        OutputFormat::Pretty => Ok(format!("Created project: {} ({})", project.name, project.id)),
    }
}

fn edit_project(
    projects: &ProjectStorage,
    args: EditProjectArgs,
    format: OutputFormat,
) -> Result<String, QuickDevError> {
    let is_active = match (args.active, args.inactive) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    };
    let changes = ProjectChanges {
        name: args.name,
        description: args.description,
        color: args.color,
        icon: args.icon,
        is_active,
    };
    if changes.is_empty() {
        return Err(QuickDevError::InvalidArgument(
            "Nothing to change, pass at least one option".to_string(),
        ));
    }

    let id = projects.resolve(&args.id)?.id;
    let project = projects.update(&id, changes)?;

    match format {
        OutputFormat::Json => to_json(&project),
        OutputFormat::Pretty => Ok(format!("Updated project: {} ({})", project.name, project.id)),
    }
}

/// Execute task subcommands
///
/// # Errors
///
/// Returns an error if the database call fails or output formatting fails.
pub fn task(paths: &Paths, cmd: TaskCommands, format: OutputFormat) -> Result<String, QuickDevError> {
    let tasks = TaskStorage::new(paths)?;

    match cmd {
        TaskCommands::List { project, all } => {
            let (project_id, title) = match project {
                Some(key) => {
                    let project = ProjectStorage::new(paths)?.resolve(&key)?;
                    (Some(project.id), project.name)
                }
                None => (None, "All Tasks".to_string()),
            };
            let list: Vec<Task> = tasks
                .list(project_id.as_deref())?
                .into_iter()
                .filter(|t| all || t.is_selectable())
                .collect();
            format_tasks(&list, &title, format)
        }
        TaskCommands::Add(args) => add_task(paths, &tasks, args, format),
        TaskCommands::Show { id } => format_task(&tasks.resolve(&id)?, format),
        TaskCommands::Edit(args) => edit_task(&tasks, args, format),
        TaskCommands::Status { id, status } => {
            let task = tasks.resolve(&id)?;
            tasks.update_status(&task.id, status)?;
            message(format, "updated", &task.id, &format!("{}: {status}", task.title))
        }
        TaskCommands::Move { id, position } => {
            let task = tasks.move_to(&tasks.resolve(&id)?.id, position)?;
            message(
                format,
                "moved",
                &task.id,
                &format!("Moved '{}' to position {}", task.title, task.position),
            )
        }
        TaskCommands::Remove { id } => {
            let task = tasks.resolve(&id)?;
            tasks.delete(&task.id)?;
            message(format, "removed", &task.id, &format!("Removed task: {}", task.title))
        }
    }
}

fn add_task(
    paths: &Paths,
    tasks: &TaskStorage,
    args: AddTaskArgs,
    format: OutputFormat,
) -> Result<String, QuickDevError> {
    let project = ProjectStorage::new(paths)?.resolve(&args.project)?;
    let due_date = args.due.as_deref().map(parse_due).transpose()?;

    let task = Task::new(&project.id, &args.title, &args.description, args.priority, due_date)?;
    let task = tasks.add(task)?;

    match format {
        OutputFormat::Json => to_json(&task),
        OutputFormat::Pretty => Ok(format!(
            "Created task: {} ({}) in {}",
            task.title, task.id, project.name
        )),
    }
}

fn edit_task(
    tasks: &TaskStorage,
    args: EditTaskArgs,
    format: OutputFormat,
) -> Result<String, QuickDevError> {
    let due_date = if args.no_due {
        Some(None)
    } else {
        args.due.as_deref().map(parse_due).transpose()?.map(Some)
    };
    let changes = TaskChanges {
        title: args.title,
        description: args.description,
        priority: args.priority,
        due_date,
    };
    if changes.is_empty() {
        return Err(QuickDevError::InvalidArgument(
            "Nothing to change, pass at least one option".to_string(),
        ));
    }

    let id = tasks.resolve(&args.id)?.id;
    let task = tasks.update(&id, changes)?;

    match format {
        OutputFormat::Json => to_json(&task),
        OutputFormat::Pretty => Ok(format!("Updated task: {} ({})", task.title, task.id)),
    }
}

fn parse_due(input: &str) -> Result<NaiveDate, QuickDevError> {
    parse_date(input, Local::now().date_naive())
        .ok_or_else(|| QuickDevError::InvalidArgument(format!("Invalid due date: {input}")))
}

/// Execute summary command
///
/// # Errors
///
/// Returns an error if the database call fails or output formatting fails.
pub fn summary(paths: &Paths, format: OutputFormat) -> Result<String, QuickDevError> {
    let logs = TimeLogStorage::new(paths)?.get_all()?;
    let projects = ProjectStorage::new(paths)?.list()?;
    let tasks = TaskStorage::new(paths)?.list(None)?;
    format_summary(
        &TimeSummary::compute(&logs, &projects, &tasks, Utc::now()),
        format,
    )
}

/// Execute chart command
///
/// # Errors
///
/// Returns an error if the database call fails or output formatting fails.
pub fn chart(paths: &Paths, period: ChartPeriod, format: OutputFormat) -> Result<String, QuickDevError> {
    let logs = TimeLogStorage::new(paths)?.get_all()?;
    format_chart(&WorkHoursChart::compute(&logs, period, Utc::now()), format)
}

/// Execute completions command
///
/// # Errors
///
/// Returns an error if the script cannot be generated.
pub fn completions(shell: Shell, install: bool) -> Result<String, QuickDevError> {
    if install {
        Ok(completion_install_instructions(shell))
    } else {
        generate_completions(shell)
    }
}

/// Short confirmation for a mutating command.
fn message(
    format: OutputFormat,
    action: &str,
    id: &str,
    text: &str,
) -> Result<String, QuickDevError> {
    match format {
        OutputFormat::Json => to_json(&serde_json::json!({ "action": action, "id": id })),
        OutputFormat::Pretty => Ok(text.to_string()),
    }
}
