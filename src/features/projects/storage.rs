//! Project and task storage.
//!
//! Persists projects and their ordered tasks to the local database.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::types::{Priority, Project, ProjectChanges, Task, TaskChanges, TaskStatus};
use crate::config::Paths;
use crate::core::{ProjectStore, TaskStore};
use crate::error::QuickDevError;
use crate::storage::{format_timestamp, parse_timestamp, Database};

const PROJECT_COLUMNS: &str =
    "SELECT id, name, description, color, icon, last_opened, is_active, created_at FROM projects";

const TASK_COLUMNS: &str = "SELECT id, project_id, title, description, status, priority, due_date, created_at, position FROM tasks";

/// Storage for projects.
pub struct ProjectStorage {
    db: Database,
}

impl ProjectStorage {
    /// Open project storage in the given data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn new(paths: &Paths) -> Result<Self, QuickDevError> {
        Ok(Self {
            db: Database::open(paths)?,
        })
    }

    /// Create storage with an existing database connection.
    #[must_use]
    pub const fn with_database(db: Database) -> Self {
        Self { db }
    }

    /// Insert a project.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn add(&self, project: &Project) -> Result<(), QuickDevError> {
        self.db
            .connection()
            .execute(
                r"INSERT INTO projects
                  (id, name, description, color, icon, last_opened, is_active, created_at)
                  VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    project.id,
                    project.name,
                    project.description,
                    project.color,
                    project.icon,
                    project.last_opened.as_ref().map(format_timestamp),
                    project.is_active,
                    format_timestamp(&project.created_at),
                ],
            )
            .map_err(|e| QuickDevError::Database(format!("Failed to insert project: {e}")))?;

        log::info!("Added project {} ({})", project.name, project.id);
        Ok(())
    }

    /// Get a project by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get(&self, id: &str) -> Result<Option<Project>, QuickDevError> {
        self.db
            .connection()
            .query_row(&format!("{PROJECT_COLUMNS} WHERE id = ?1"), [id], row_to_project)
            .optional()
            .map_err(|e| QuickDevError::Database(format!("Failed to query project: {e}")))
    }

    /// All projects, most recently opened first, then by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list(&self) -> Result<Vec<Project>, QuickDevError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare(&format!(
                "{PROJECT_COLUMNS} ORDER BY last_opened DESC NULLS LAST, name COLLATE NOCASE"
            ))
            .map_err(|e| QuickDevError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map([], row_to_project)
            .map_err(|e| QuickDevError::Database(format!("Failed to query projects: {e}")))?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| QuickDevError::Database(e.to_string()))
    }

    /// Find a project by exact ID, ID prefix or case-insensitive name.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when nothing matches and `InvalidArgument` when the
    /// key is ambiguous.
    pub fn resolve(&self, key: &str) -> Result<Project, QuickDevError> {
        if let Some(project) = self.get(key)? {
            return Ok(project);
        }

        let needle = key.to_lowercase();
        let mut matches: Vec<Project> = self
            .list()?
            .into_iter()
            .filter(|p| p.id.starts_with(key) || p.name.to_lowercase() == needle)
            .collect();

        match matches.len() {
            1 => Ok(matches.remove(0)),
            0 => Err(QuickDevError::NotFound(format!("Project '{key}'"))),
            n => Err(QuickDevError::InvalidArgument(format!(
                "'{key}' matches {n} projects, use a longer ID"
            ))),
        }
    }

    /// Edit a project's name, description, color, icon or active flag.
    /// Returns the updated project.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the project does not exist, or `InvalidArgument`
    /// if a new value is invalid.
    pub fn update(&self, id: &str, changes: ProjectChanges) -> Result<Project, QuickDevError> {
        let mut project = self
            .get(id)?
            .ok_or_else(|| QuickDevError::NotFound(format!("Project '{id}'")))?;
        project.apply(changes)?;

        self.db
            .connection()
            .execute(
                r"UPDATE projects
                  SET name = ?1, description = ?2, color = ?3, icon = ?4, is_active = ?5
                  WHERE id = ?6",
                params![
                    project.name,
                    project.description,
                    project.color,
                    project.icon,
                    project.is_active,
                    project.id,
                ],
            )
            .map_err(|e| QuickDevError::Database(format!("Failed to update project: {e}")))?;

        log::info!("Updated project {} ({})", project.name, project.id);
        Ok(project)
    }

    /// Record that a project was opened.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the project does not exist.
    pub fn update_last_opened(&self, id: &str, when: DateTime<Utc>) -> Result<(), QuickDevError> {
        let rows = self
            .db
            .connection()
            .execute(
                "UPDATE projects SET last_opened = ?1 WHERE id = ?2",
                params![format_timestamp(&when), id],
            )
            .map_err(|e| QuickDevError::Database(format!("Failed to update project: {e}")))?;

        if rows == 0 {
            return Err(QuickDevError::NotFound(format!("Project '{id}'")));
        }
        Ok(())
    }

    /// Delete a project and its tasks. Time logs keep the project ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete(&self, id: &str) -> Result<bool, QuickDevError> {
        let rows = self
            .db
            .connection()
            .execute("DELETE FROM projects WHERE id = ?1", [id])
            .map_err(|e| QuickDevError::Database(format!("Failed to delete project: {e}")))?;

        if rows > 0 {
            log::info!("Deleted project {id}");
        }
        Ok(rows > 0)
    }
}

impl ProjectStore for ProjectStorage {
    fn list_projects(&self) -> Result<Vec<Project>, QuickDevError> {
        self.list()
    }
}

/// Storage for tasks.
pub struct TaskStorage {
    db: Database,
}

impl TaskStorage {
    /// Open task storage in the given data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn new(paths: &Paths) -> Result<Self, QuickDevError> {
        Ok(Self {
            db: Database::open(paths)?,
        })
    }

    /// Create storage with an existing database connection.
    #[must_use]
    pub const fn with_database(db: Database) -> Self {
        Self { db }
    }

    /// Insert a task at the end of its project. Returns the stored task.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the project does not exist.
    pub fn add(&self, mut task: Task) -> Result<Task, QuickDevError> {
        let conn = self.db.connection();

        let project_exists: bool = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM projects WHERE id = ?1)",
                [&task.project_id],
                |row| row.get(0),
            )
            .map_err(|e| QuickDevError::Database(format!("Failed to query project: {e}")))?;
        if !project_exists {
            return Err(QuickDevError::NotFound(format!(
                "Project '{}'",
                task.project_id
            )));
        }

        task.position = conn
            .query_row(
                "SELECT COALESCE(MAX(position) + 1, 0) FROM tasks WHERE project_id = ?1",
                [&task.project_id],
                |row| row.get(0),
            )
            .map_err(|e| QuickDevError::Database(format!("Failed to query positions: {e}")))?;

        conn.execute(
            r"INSERT INTO tasks
              (id, project_id, title, description, status, priority, due_date, created_at, position)
              VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                task.id,
                task.project_id,
                task.title,
                task.description,
                task.status.as_str(),
                task.priority.as_str(),
                task.due_date.map(|d| d.to_string()),
                format_timestamp(&task.created_at),
                task.position,
            ],
        )
        .map_err(|e| QuickDevError::Database(format!("Failed to insert task: {e}")))?;

        log::info!("Added task {} ({})", task.title, task.id);
        Ok(task)
    }

    /// Get a task by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get(&self, id: &str) -> Result<Option<Task>, QuickDevError> {
        self.db
            .connection()
            .query_row(&format!("{TASK_COLUMNS} WHERE id = ?1"), [id], row_to_task)
            .optional()
            .map_err(|e| QuickDevError::Database(format!("Failed to query task: {e}")))
    }

    /// Tasks ordered by position, optionally limited to one project.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list(&self, project_id: Option<&str>) -> Result<Vec<Task>, QuickDevError> {
        let conn = self.db.connection();

        let (sql, filter) = match project_id {
            Some(id) => (
                format!("{TASK_COLUMNS} WHERE project_id = ?1 ORDER BY position"),
                Some(id),
            ),
            None => (format!("{TASK_COLUMNS} ORDER BY project_id, position"), None),
        };

        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| QuickDevError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = match filter {
            Some(id) => stmt.query_map([id], row_to_task),
            None => stmt.query_map([], row_to_task),
        }
        .map_err(|e| QuickDevError::Database(format!("Failed to query tasks: {e}")))?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| QuickDevError::Database(e.to_string()))
    }

    /// Find a task by exact ID or unique ID prefix.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when nothing matches and `InvalidArgument` when the
    /// prefix is ambiguous.
    pub fn resolve(&self, key: &str) -> Result<Task, QuickDevError> {
        if let Some(task) = self.get(key)? {
            return Ok(task);
        }

        let mut matches: Vec<Task> = self
            .list(None)?
            .into_iter()
            .filter(|t| t.id.starts_with(key))
            .collect();

        match matches.len() {
            1 => Ok(matches.remove(0)),
            0 => Err(QuickDevError::NotFound(format!("Task '{key}'"))),
            n => Err(QuickDevError::InvalidArgument(format!(
                "'{key}' matches {n} tasks, use a longer ID"
            ))),
        }
    }

    /// Change a task's status.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the task does not exist.
    pub fn update_status(&self, id: &str, status: TaskStatus) -> Result<(), QuickDevError> {
        let rows = self
            .db
            .connection()
            .execute(
                "UPDATE tasks SET status = ?1 WHERE id = ?2",
                params![status.as_str(), id],
            )
            .map_err(|e| QuickDevError::Database(format!("Failed to update task: {e}")))?;

        if rows == 0 {
            return Err(QuickDevError::NotFound(format!("Task '{id}'")));
        }
        Ok(())
    }

    /// Edit a task's title, description, priority or due date.
    /// Returns the updated task.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the task does not exist, or `InvalidArgument`
    /// if the new title is empty.
    pub fn update(&self, id: &str, changes: TaskChanges) -> Result<Task, QuickDevError> {
        let mut task = self
            .get(id)?
            .ok_or_else(|| QuickDevError::NotFound(format!("Task '{id}'")))?;
        task.apply(changes)?;

        self.db
            .connection()
            .execute(
                r"UPDATE tasks
                  SET title = ?1, description = ?2, priority = ?3, due_date = ?4
                  WHERE id = ?5",
                params![
                    task.title,
                    task.description,
                    task.priority.as_str(),
                    task.due_date.map(|d| d.to_string()),
                    task.id,
                ],
            )
            .map_err(|e| QuickDevError::Database(format!("Failed to update task: {e}")))?;

        log::info!("Updated task {} ({})", task.title, task.id);
        Ok(task)
    }

    /// Move a task to `position` within its project, shifting the others.
    ///
    /// Positions past the end place the task last.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the task does not exist.
    pub fn move_to(&self, id: &str, position: u32) -> Result<Task, QuickDevError> {
        let task = self
            .get(id)?
            .ok_or_else(|| QuickDevError::NotFound(format!("Task '{id}'")))?;

        let mut ordered: Vec<String> = self
            .list(Some(&task.project_id))?
            .into_iter()
            .map(|t| t.id)
            .filter(|other| other != &task.id)
            .collect();
        let index = usize::try_from(position).map_or(ordered.len(), |p| p.min(ordered.len()));
        ordered.insert(index, task.id.clone());

        let conn = self.db.connection();
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| QuickDevError::Database(format!("Failed to start transaction: {e}")))?;
        write_positions(&tx, &ordered)?;
        tx.commit()
            .map_err(|e| QuickDevError::Database(format!("Failed to reorder tasks: {e}")))?;

        self.get(id)?
            .ok_or_else(|| QuickDevError::NotFound(format!("Task '{id}'")))
    }

    /// Delete a task and close the gap in its project's ordering.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete(&self, id: &str) -> Result<bool, QuickDevError> {
        let Some(task) = self.get(id)? else {
            return Ok(false);
        };

        let conn = self.db.connection();
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| QuickDevError::Database(format!("Failed to start transaction: {e}")))?;

        tx.execute("DELETE FROM tasks WHERE id = ?1", [id])
            .map_err(|e| QuickDevError::Database(format!("Failed to delete task: {e}")))?;

        let remaining = ordered_ids(&tx, &task.project_id)?;
        write_positions(&tx, &remaining)?;

        tx.commit()
            .map_err(|e| QuickDevError::Database(format!("Failed to delete task: {e}")))?;
        Ok(true)
    }
}

impl TaskStore for TaskStorage {
    fn list_tasks(&self, project_id: Option<&str>) -> Result<Vec<Task>, QuickDevError> {
        self.list(project_id)
    }
}

fn ordered_ids(conn: &Connection, project_id: &str) -> Result<Vec<String>, QuickDevError> {
    let mut stmt = conn
        .prepare("SELECT id FROM tasks WHERE project_id = ?1 ORDER BY position")
        .map_err(|e| QuickDevError::Database(format!("Failed to prepare query: {e}")))?;

    let rows = stmt
        .query_map([project_id], |row| row.get(0))
        .map_err(|e| QuickDevError::Database(format!("Failed to query tasks: {e}")))?;

    rows.collect::<Result<Vec<String>, _>>()
        .map_err(|e| QuickDevError::Database(e.to_string()))
}

fn write_positions(conn: &Connection, ordered: &[String]) -> Result<(), QuickDevError> {
    let mut stmt = conn
        .prepare("UPDATE tasks SET position = ?1 WHERE id = ?2")
        .map_err(|e| QuickDevError::Database(format!("Failed to prepare update: {e}")))?;

    for (position, id) in ordered.iter().enumerate() {
        stmt.execute(params![i64::try_from(position).unwrap_or(i64::MAX), id])
            .map_err(|e| QuickDevError::Database(format!("Failed to reorder tasks: {e}")))?;
    }
    Ok(())
}

/// Convert a database row to a `Project`.
fn row_to_project(row: &Row<'_>) -> Result<Project, rusqlite::Error> {
    let last_opened: Option<String> = row.get(5)?;
    let created_at: String = row.get(7)?;

    Ok(Project {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        color: row.get(3)?,
        icon: row.get(4)?,
        last_opened: last_opened
            .map(|s| parse_timestamp(5, &s))
            .transpose()?,
        is_active: row.get(6)?,
        created_at: parse_timestamp(7, &created_at)?,
    })
}

/// Convert a database row to a `Task`.
fn row_to_task(row: &Row<'_>) -> Result<Task, rusqlite::Error> {
    use rusqlite::types::Type;

    let status: String = row.get(4)?;
    let priority: String = row.get(5)?;
    let due_date: Option<String> = row.get(6)?;
    let created_at: String = row.get(7)?;

    let conversion = |idx: usize, e: QuickDevError| {
        rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
    };

    Ok(Task {
        id: row.get(0)?,
        project_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        status: status.parse().map_err(|e| conversion(4, e))?,
        priority: priority.parse::<Priority>().map_err(|e| conversion(5, e))?,
        due_date: due_date
            .map(|s| {
                s.parse::<NaiveDate>().map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e))
                })
            })
            .transpose()?,
        created_at: parse_timestamp(7, &created_at)?,
        position: row.get(8)?,
    })
}
