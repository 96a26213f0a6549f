use std::collections::HashMap;

use colored::Colorize;

use crate::core::format_hms;
use crate::features::projects::{Priority, Project, Task, TaskProgress, TaskStatus};
use crate::features::timelog::{
    group_by_date, TimeLogRecord, TimeSummary, WorkHoursChart, UNASSIGNED_PROJECT_ID,
    UNKNOWN_PROJECT,
};

const CHART_BAR_WIDTH: usize = 40;

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

fn status_icon(status: TaskStatus) -> colored::ColoredString {
    match status {
        TaskStatus::NotStarted => "[ ]".white(),
        TaskStatus::InProgress => "[~]".yellow(),
        TaskStatus::Completed => "[x]".green(),
    }
}

fn priority_label(priority: Priority) -> colored::ColoredString {
    match priority {
        Priority::Low => "low".green(),
        Priority::Medium => "medium".yellow(),
        Priority::High => "high".red(),
    }
}

/// "50% done (2/4, 1 in progress)" or "no tasks".
fn progress_label(progress: &TaskProgress) -> String {
    if progress.total == 0 {
        return "no tasks".to_string();
    }
    let mut label = format!(
        "{}% done ({}/{}",
        progress.completion_percent, progress.completed, progress.total
    );
    if progress.in_progress > 0 {
        label.push_str(&format!(", {} in progress", progress.in_progress));
    }
    label.push(')');
    label
}

/// Display name for a time log's project.
fn project_label(names: &HashMap<&str, &str>, project_id: &str) -> String {
    if project_id == UNASSIGNED_PROJECT_ID {
        return "Unassigned".to_string();
    }
    names
        .get(project_id)
        .map_or_else(|| UNKNOWN_PROJECT.to_string(), |name| (*name).to_string())
}

/// Format projects with their logged time
pub fn format_projects_pretty(projects: &[(Project, u64)]) -> String {
    if projects.is_empty() {
        return "Projects (0)\n  No projects".to_string();
    }

    let mut output = format!("Projects ({})\n", projects.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for (project, total) in projects {
        let icon = if project.is_active {
            "▸".white()
        } else {
            "▹".dimmed()
        };

        let mut line = format!(
            "{} {}  {}",
            icon,
            project.name.bold(),
            short_id(&project.id).dimmed()
        );
        line.push_str(&format!("  {}", format_hms(*total).cyan()));

        if let Some(opened) = project.last_opened {
            line.push_str(&format!(
                "  {}",
                format!("opened {}", opened.format("%Y-%m-%d")).dimmed()
            ));
        }

        output.push_str(&line);
        output.push('\n');
    }

    output
}

/// Format one project with its tasks
pub fn format_project_pretty(project: &Project, tasks: &[Task], total_seconds: u64) -> String {
    let mut output = format!("{}\n", project.name.bold());
    output.push_str(&format!("  {}: {}\n", "ID".dimmed(), project.id));

    if !project.description.is_empty() {
        output.push_str(&format!(
            "  {}: {}\n",
            "Description".dimmed(),
            project.description
        ));
    }

    output.push_str(&format!("  {}: {}\n", "Color".dimmed(), project.color));

    if !project.icon.is_empty() {
        output.push_str(&format!("  {}: {}\n", "Icon".dimmed(), project.icon));
    }

    output.push_str(&format!(
        "  {}: {}\n",
        "Logged".dimmed(),
        format_hms(total_seconds)
    ));

    if let Some(opened) = project.last_opened {
        output.push_str(&format!(
            "  {}: {}\n",
            "Last opened".dimmed(),
            opened.format("%Y-%m-%d %H:%M")
        ));
    }

    output.push_str(&format!(
        "  {}: {}\n",
        "Created".dimmed(),
        project.created_at.format("%Y-%m-%d %H:%M")
    ));

    output.push_str(&format!(
        "  {}: {}\n",
        "Progress".dimmed(),
        progress_label(&TaskProgress::from_tasks(tasks))
    ));

    if !project.is_active {
        output.push_str(&format!("  {}\n", "Inactive".yellow()));
    }

    if !tasks.is_empty() {
        output.push_str(&format!("  {} ({}):\n", "Tasks".dimmed(), tasks.len()));
        for task in tasks {
            output.push_str(&format!("    {} {}\n", status_icon(task.status), task.title));
        }
    }

    output
}

/// Format a list of tasks
pub fn format_tasks_pretty(tasks: &[Task], title: &str) -> String {
    if tasks.is_empty() {
        return format!("{title} (0 items)\n  No items");
    }

    let mut output = format!("{} ({} items)\n", title, tasks.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for task in tasks {
        let name = match task.status {
            TaskStatus::Completed => task.title.dimmed().to_string(),
            _ => task.title.bold().to_string(),
        };

        let mut line = format!(
            "{} {}  {}  {}",
            status_icon(task.status),
            name,
            short_id(&task.id).dimmed(),
            priority_label(task.priority)
        );

        if let Some(due) = task.due_date {
            line.push_str(&format!("  {}", due.to_string().yellow()));
        }

        output.push_str(&line);
        output.push('\n');
    }

    output
}

/// Format a single task
pub fn format_task_pretty(task: &Task) -> String {
    let mut output = format!("{} {}\n", status_icon(task.status), task.title.bold());
    output.push_str(&format!("  {}: {}\n", "ID".dimmed(), task.id));
    output.push_str(&format!("  {}: {}\n", "Project".dimmed(), task.project_id));
    output.push_str(&format!(
        "  {}: {}\n",
        "Status".dimmed(),
        task.status.display_name()
    ));
    output.push_str(&format!(
        "  {}: {}\n",
        "Priority".dimmed(),
        priority_label(task.priority)
    ));
    output.push_str(&format!("  {}: {}\n", "Position".dimmed(), task.position));

    if !task.description.is_empty() {
        output.push_str(&format!(
            "  {}: {}\n",
            "Description".dimmed(),
            task.description
        ));
    }

    if let Some(due) = task.due_date {
        output.push_str(&format!("  {}: {}\n", "Due".dimmed(), due));
    }

    output
}

/// Format time logs grouped by day, newest day first
pub fn format_time_logs_pretty(logs: &[TimeLogRecord], projects: &[Project]) -> String {
    if logs.is_empty() {
        return "Time logs (0)\n  No time logged yet".to_string();
    }

    let names: HashMap<&str, &str> = projects
        .iter()
        .map(|p| (p.id.as_str(), p.name.as_str()))
        .collect();

    let mut output = format!("Time logs ({})\n", logs.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for day in group_by_date(logs) {
        output.push_str(&format!(
            "{}  {}\n",
            day.date.format("%a %Y-%m-%d").to_string().bold(),
            format_hms(day.total_seconds).cyan()
        ));

        for log in &day.logs {
            let mut line = format!(
                "  {}  {:>8}  {}  {}",
                log.time_range(),
                format_hms(u64::from(log.duration_seconds)),
                project_label(&names, &log.project_id),
                short_id(&log.id).dimmed()
            );
            if !log.notes.is_empty() {
                line.push_str(&format!("  {}", log.notes.dimmed()));
            }
            output.push_str(&line);
            output.push('\n');
        }
    }

    output
}

/// Format a single time log
pub fn format_time_log_pretty(log: &TimeLogRecord) -> String {
    let mut output = format!(
        "{} {} on {}\n",
        "Logged".green(),
        format_hms(u64::from(log.duration_seconds)).bold(),
        log.project_id
    );
    output.push_str(&format!("  {}: {}\n", "ID".dimmed(), log.id));
    output.push_str(&format!(
        "  {}: {} {}\n",
        "When".dimmed(),
        log.local_date(),
        log.time_range()
    ));

    if let Some(task) = &log.task_id {
        output.push_str(&format!("  {}: {}\n", "Task".dimmed(), task));
    }

    if !log.notes.is_empty() {
        output.push_str(&format!("  {}: {}\n", "Notes".dimmed(), log.notes));
    }

    output
}

/// Format a time summary
pub fn format_summary_pretty(summary: &TimeSummary) -> String {
    let mut output = "Time summary\n".bold().to_string();
    output.push_str(&"─".repeat(40));
    output.push('\n');

    output.push_str(&format!(
        "  {:<12} {}\n",
        "Today",
        format_hms(summary.today_seconds).bold()
    ));
    output.push_str(&format!(
        "  {:<12} {}\n",
        "This week",
        format_hms(summary.week_seconds).bold()
    ));
    output.push_str(&format!(
        "  {:<12} {} ({} logs)\n",
        "All time",
        format_hms(summary.total_seconds).bold(),
        summary.log_count
    ));
    output.push_str(&format!(
        "  {:<12} {} ({} active)\n",
        "Projects", summary.project_count, summary.active_projects
    ));
    output.push_str(&format!(
        "  {:<12} {}\n",
        "Tasks",
        progress_label(&summary.tasks)
    ));

    if !summary.by_project.is_empty() {
        output.push_str(&format!("\n{}\n", "By project".bold()));
        let width = summary
            .by_project
            .iter()
            .map(|p| p.name.chars().count())
            .max()
            .unwrap_or(0);

        for project in &summary.by_project {
            let mut line = format!(
                "  {:<width$}  {}",
                project.name,
                format_hms(project.seconds).cyan()
            );
            if project.tasks.total > 0 {
                line.push_str(&format!(
                    "  {}",
                    format!("{}% done", project.tasks.completion_percent).dimmed()
                ));
            }
            output.push_str(&line);
            output.push('\n');
        }
    }

    output
}

/// Format a work-hours chart
pub fn format_chart_pretty(chart: &WorkHoursChart) -> String {
    let mut output = format!(
        "{} ({:.1}h)\n",
        format!("Work hours, {}", chart.period.display_name().to_lowercase()).bold(),
        chart.total_hours()
    );
    output.push_str(&chart.render(CHART_BAR_WIDTH));
    output
}
