use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::QuickDevError;

/// Color given to projects created without one.
pub const DEFAULT_PROJECT_COLOR: &str = "#3b82f6";

static HEX_COLOR: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").ok());

fn is_hex_color(value: &str) -> bool {
    HEX_COLOR.as_ref().is_some_and(|re| re.is_match(value))
}

fn project_name(name: &str) -> Result<String, QuickDevError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(QuickDevError::InvalidArgument(
            "Project name cannot be empty".to_string(),
        ));
    }
    Ok(name.to_string())
}

fn project_color(color: &str) -> Result<String, QuickDevError> {
    if !is_hex_color(color) {
        return Err(QuickDevError::InvalidArgument(format!(
            "Invalid color '{color}', expected #rgb or #rrggbb"
        )));
    }
    Ok(color.to_string())
}

fn task_title(title: &str) -> Result<String, QuickDevError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(QuickDevError::InvalidArgument(
            "Task title cannot be empty".to_string(),
        ));
    }
    Ok(title.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub color: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub last_opened: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Project {
    /// Build a new active project with a fresh ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty or the color is not `#rgb`/`#rrggbb`.
    pub fn new(
        name: &str,
        description: &str,
        color: Option<&str>,
        icon: &str,
    ) -> Result<Self, QuickDevError> {
        let name = project_name(name)?;
        let color = project_color(color.unwrap_or(DEFAULT_PROJECT_COLOR))?;

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name,
            description: description.to_string(),
            color,
            icon: icon.to_string(),
            last_opened: None,
            is_active: true,
            created_at: Utc::now(),
        })
    }

    /// Apply an edit. Nothing changes if any field is invalid.
    ///
    /// # Errors
    ///
    /// Returns an error if the new name is empty or the new color is not a hex color.
    pub fn apply(&mut self, changes: ProjectChanges) -> Result<(), QuickDevError> {
        let name = changes.name.as_deref().map(project_name).transpose()?;
        let color = changes.color.as_deref().map(project_color).transpose()?;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(color) = color {
            self.color = color;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(icon) = changes.icon {
            self.icon = icon;
        }
        if let Some(is_active) = changes.is_active {
            self.is_active = is_active;
        }
        Ok(())
    }
}

/// Fields to change on a project. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub is_active: Option<bool>,
}

impl ProjectChanges {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.color.is_none()
            && self.icon.is_none()
            && self.is_active.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub const ALL: [Self; 3] = [Self::NotStarted, Self::InProgress, Self::Completed];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::NotStarted => "Not started",
            Self::InProgress => "In progress",
            Self::Completed => "Completed",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = QuickDevError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "not_started" | "not-started" | "todo" => Ok(Self::NotStarted),
            "in_progress" | "in-progress" | "doing" => Ok(Self::InProgress),
            "completed" | "done" => Ok(Self::Completed),
            _ => Err(QuickDevError::InvalidArgument(format!(
                "Unknown task status '{s}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Priority {
    type Err = QuickDevError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" | "l" => Ok(Self::Low),
            "medium" | "med" | "m" => Ok(Self::Medium),
            "high" | "h" => Ok(Self::High),
            _ => Err(QuickDevError::InvalidArgument(format!(
                "Unknown priority '{s}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub project_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: TaskStatus,
    pub priority: Priority,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    /// Order within the project, starting at 0
    pub position: u32,
}

impl Task {
    /// Build a new, not-started task. The position is assigned on insert.
    ///
    /// # Errors
    ///
    /// Returns an error if the title or project ID is empty.
    pub fn new(
        project_id: &str,
        title: &str,
        description: &str,
        priority: Priority,
        due_date: Option<NaiveDate>,
    ) -> Result<Self, QuickDevError> {
        let title = task_title(title)?;
        if project_id.trim().is_empty() {
            return Err(QuickDevError::InvalidArgument(
                "A task needs a project".to_string(),
            ));
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            project_id: project_id.to_string(),
            title,
            description: description.to_string(),
            status: TaskStatus::NotStarted,
            priority,
            due_date,
            created_at: Utc::now(),
            position: 0,
        })
    }

    /// Whether the task can be picked in the timer.
    #[must_use]
    pub fn is_selectable(&self) -> bool {
        self.status != TaskStatus::Completed
    }

    /// Apply an edit. Nothing changes if the new title is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the new title is empty.
    pub fn apply(&mut self, changes: TaskChanges) -> Result<(), QuickDevError> {
        if let Some(title) = changes.title.as_deref() {
            self.title = task_title(title)?;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(priority) = changes.priority {
            self.priority = priority;
        }
        if let Some(due_date) = changes.due_date {
            self.due_date = due_date;
        }
        Ok(())
    }
}

/// Fields to change on a task. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    /// `Some(None)` clears the due date
    #[allow(clippy::option_option)]
    pub due_date: Option<Option<NaiveDate>>,
}

impl TaskChanges {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
    }
}

/// Task counts by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskProgress {
    pub total: usize,
    pub not_started: usize,
    pub in_progress: usize,
    pub completed: usize,
    /// Completed share of all tasks, rounded; 0 without tasks
    pub completion_percent: u8,
}

impl TaskProgress {
    #[must_use]
    pub fn from_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        let mut progress = Self::default();
        for task in tasks {
            progress.total += 1;
            match task.status {
                TaskStatus::NotStarted => progress.not_started += 1,
                TaskStatus::InProgress => progress.in_progress += 1,
                TaskStatus::Completed => progress.completed += 1,
            }
        }
        if progress.total > 0 {
            let percent = (progress.completed * 200 + progress.total) / (2 * progress.total);
            progress.completion_percent = u8::try_from(percent).unwrap_or(100);
        }
        progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_new_defaults() {
        let project = Project::new("  Dashboard ", "", None, "").unwrap();
        assert_eq!(project.name, "Dashboard");
        assert_eq!(project.color, DEFAULT_PROJECT_COLOR);
        assert!(project.is_active);
        assert!(project.last_opened.is_none());
    }

    #[test]
    fn test_project_color_validation() {
        assert!(Project::new("A", "", Some("#fff"), "").is_ok());
        assert!(Project::new("A", "", Some("#10B981"), "").is_ok());
        assert!(Project::new("A", "", Some("red"), "").is_err());
        assert!(Project::new("A", "", Some("#12345"), "").is_err());
    }

    #[test]
    fn test_project_empty_name() {
        assert!(Project::new("   ", "", None, "").is_err());
    }

    #[test]
    fn test_task_status_parse() {
        assert_eq!("todo".parse::<TaskStatus>().unwrap(), TaskStatus::NotStarted);
        assert_eq!(
            "in-progress".parse::<TaskStatus>().unwrap(),
            TaskStatus::InProgress
        );
        assert_eq!("DONE".parse::<TaskStatus>().unwrap(), TaskStatus::Completed);
        assert!("blocked".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn test_task_status_round_trip_str() {
        for status in TaskStatus::ALL {
            assert_eq!(status.as_str().parse::<TaskStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_priority_parse_and_order() {
        assert_eq!("h".parse::<Priority>().unwrap(), Priority::High);
        assert!(Priority::High > Priority::Low);
        assert_eq!(Priority::default(), Priority::Medium);
    }

    #[test]
    fn test_task_selectable() {
        let mut task = Task::new("p1", "Auth", "", Priority::High, None).unwrap();
        assert!(task.is_selectable());
        task.status = TaskStatus::InProgress;
        assert!(task.is_selectable());
        task.status = TaskStatus::Completed;
        assert!(!task.is_selectable());
    }

    #[test]
    fn test_project_apply_changes() {
        let mut project = Project::new("Dashboard", "", None, "").unwrap();
        project
            .apply(ProjectChanges {
                name: Some(" Admin ".to_string()),
                color: Some("#10b981".to_string()),
                is_active: Some(false),
                ..ProjectChanges::default()
            })
            .unwrap();

        assert_eq!(project.name, "Admin");
        assert_eq!(project.color, "#10b981");
        assert!(!project.is_active);
        assert!(project.description.is_empty());
    }

    #[test]
    fn test_project_apply_rejects_bad_color() {
        let mut project = Project::new("Dashboard", "", None, "").unwrap();
        let result = project.apply(ProjectChanges {
            name: Some("Admin".to_string()),
            color: Some("green".to_string()),
            ..ProjectChanges::default()
        });

        assert!(result.is_err());
        assert_eq!(project.name, "Dashboard");
        assert_eq!(project.color, DEFAULT_PROJECT_COLOR);
    }

    #[test]
    fn test_task_apply_changes() {
        let due = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        let mut task = Task::new("p1", "Auth", "", Priority::Low, Some(due)).unwrap();

        task.apply(TaskChanges {
            title: Some("OAuth".to_string()),
            priority: Some(Priority::High),
            due_date: Some(None),
            ..TaskChanges::default()
        })
        .unwrap();

        assert_eq!(task.title, "OAuth");
        assert_eq!(task.priority, Priority::High);
        assert!(task.due_date.is_none());
        assert!(task.apply(TaskChanges {
            title: Some("  ".to_string()),
            ..TaskChanges::default()
        })
        .is_err());
        assert_eq!(task.title, "OAuth");
    }

    #[test]
    fn test_changes_is_empty() {
        assert!(ProjectChanges::default().is_empty());
        assert!(TaskChanges::default().is_empty());
        assert!(!TaskChanges {
            due_date: Some(None),
            ..TaskChanges::default()
        }
        .is_empty());
    }

    #[test]
    fn test_task_progress_counts_and_rounds() {
        let mut tasks: Vec<Task> = (0..3)
            .map(|i| Task::new("p1", &format!("T{i}"), "", Priority::Low, None).unwrap())
            .collect();
        tasks[0].status = TaskStatus::Completed;
        tasks[1].status = TaskStatus::InProgress;

        let progress = TaskProgress::from_tasks(&tasks);
        assert_eq!(progress.total, 3);
        assert_eq!(progress.completed, 1);
        assert_eq!(progress.in_progress, 1);
        assert_eq!(progress.not_started, 1);
        assert_eq!(progress.completion_percent, 33);

        tasks[1].status = TaskStatus::Completed;
        assert_eq!(TaskProgress::from_tasks(&tasks).completion_percent, 67);
        assert_eq!(
            TaskProgress::from_tasks(std::iter::empty::<&Task>()),
            TaskProgress::default()
        );
    }

    #[test]
    fn test_task_requires_title() {
        assert!(Task::new("p1", " ", "", Priority::Low, None).is_err());
        assert!(Task::new("", "Auth", "", Priority::Low, None).is_err());
    }
}
