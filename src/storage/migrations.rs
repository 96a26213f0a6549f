//! Database migrations for quickdev.
//!
//! Each migration is a function that upgrades the schema by one version.
//! Migrations are run automatically when the database is opened.

use rusqlite::Connection;

use crate::error::QuickDevError;

/// Current schema version.
pub const CURRENT_VERSION: i32 = 1;

/// Get the current schema version from the database.
///
/// Returns 0 if no version has been set (new database).
pub fn get_version(conn: &Connection) -> Result<i32, QuickDevError> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| QuickDevError::Database(format!("Failed to get schema version: {e}")))
}

/// Set the schema version in the database.
fn set_version(conn: &Connection, version: i32) -> Result<(), QuickDevError> {
    conn.execute_batch(&format!("PRAGMA user_version = {version};"))
        .map_err(|e| QuickDevError::Database(format!("Failed to set schema version: {e}")))
}

/// Run all pending migrations.
pub fn run(conn: &Connection) -> Result<(), QuickDevError> {
    let current = get_version(conn)?;

    if current >= CURRENT_VERSION {
        return Ok(());
    }

    for version in (current + 1)..=CURRENT_VERSION {
        log::info!("Migrating database to schema v{version}");
        run_migration(conn, version)?;
        set_version(conn, version)?;
    }

    Ok(())
}

/// Run a specific migration.
fn run_migration(conn: &Connection, version: i32) -> Result<(), QuickDevError> {
    match version {
        1 => migrate_v1(conn),
        _ => Err(QuickDevError::Database(format!(
            "Unknown migration version: {version}"
        ))),
    }
}

/// Migration v1: Initial schema.
///
/// Creates tables for:
/// - `projects`: development projects
/// - `tasks`: per-project tasks, ordered by `position`
/// - `time_logs`: committed work time
fn migrate_v1(conn: &Connection) -> Result<(), QuickDevError> {
    conn.execute_batch(
        r"
        CREATE TABLE IF NOT EXISTS projects (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            color TEXT NOT NULL DEFAULT '#3b82f6',
            icon TEXT NOT NULL DEFAULT '',
            last_opened TEXT,
            is_active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS tasks (
            id TEXT PRIMARY KEY,
            project_id TEXT NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
            title TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            status TEXT NOT NULL DEFAULT 'not_started',
            priority TEXT NOT NULL DEFAULT 'medium',
            due_date TEXT,
            created_at TEXT NOT NULL,
            position INTEGER NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_tasks_project
        ON tasks(project_id, position);

        -- Time logs keep their project id when a project is deleted
        CREATE TABLE IF NOT EXISTS time_logs (
            id TEXT PRIMARY KEY,
            project_id TEXT NOT NULL,
            task_id TEXT,
            start_time TEXT NOT NULL,
            end_time TEXT NOT NULL,
            duration_seconds INTEGER NOT NULL CHECK (duration_seconds > 0),
            notes TEXT NOT NULL DEFAULT ''
        );

        CREATE INDEX IF NOT EXISTS idx_time_logs_start
        ON time_logs(start_time);

        CREATE INDEX IF NOT EXISTS idx_time_logs_project
        ON time_logs(project_id);
        ",
    )
    .map_err(|e| QuickDevError::Database(format!("Migration v1 failed: {e}")))
}
