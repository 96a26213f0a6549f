//! Application state for the timer TUI.

use crate::core::{format_hms, Clock, TimeLogSink};
use crate::error::QuickDevError;
use crate::features::projects::{Project, Task};
use crate::features::timelog::{TimeLogRecord, UNASSIGNED_PROJECT_ID};
use crate::features::timer::{Attribution, TickOutcome, TimerMode, TimerSession};

/// How the app reacts when a countdown finishes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Alerts {
    /// Show a status message.
    pub notify: bool,
    /// Ring the terminal bell.
    pub sound: bool,
}

/// Application state.
pub struct App<C: Clock, S: TimeLogSink> {
    /// The running timer.
    pub session: TimerSession<C, S>,
    /// Projects that can be selected, in display order.
    pub projects: Vec<Project>,
    /// Selectable tasks of every project, in board order.
    tasks: Vec<Task>,
    /// Index into `projects`, `None` for no project.
    project_index: Option<usize>,
    /// Task ID within the selected project.
    task_id: Option<String>,
    /// Status message to display.
    pub status: Option<String>,
    /// Records committed while the app ran.
    pub logged: Vec<TimeLogRecord>,
    /// Set when the bell should ring on the next frame.
    pub bell: bool,
    alerts: Alerts,
}

impl<C: Clock, S: TimeLogSink> App<C, S> {
    /// Create a new app around `session`.
    ///
    /// The initial selection follows the session's attribution.
    pub fn new(
        session: TimerSession<C, S>,
        projects: Vec<Project>,
        tasks: Vec<Task>,
        alerts: Alerts,
    ) -> Self {
        let attribution = session.attribution().clone();
        let project_index = attribution
            .project_id
            .as_deref()
            .and_then(|id| projects.iter().position(|p| p.id == id));
        let task_id = attribution
            .task_id
            .filter(|id| tasks.iter().any(|t| &t.id == id));

        Self {
            session,
            projects,
            tasks,
            project_index,
            task_id,
            status: Some("Press ? for help".to_string()),
            logged: Vec::new(),
            bell: false,
            alerts,
        }
    }

    /// Currently selected project.
    #[must_use]
    pub fn selected_project(&self) -> Option<&Project> {
        self.project_index.and_then(|i| self.projects.get(i))
    }

    /// Currently selected task.
    #[must_use]
    pub fn selected_task(&self) -> Option<&Task> {
        let id = self.task_id.as_deref()?;
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Tasks of the selected project.
    #[must_use]
    pub fn visible_tasks(&self) -> Vec<&Task> {
        match self.selected_project() {
            Some(project) => self
                .tasks
                .iter()
                .filter(|t| t.project_id == project.id)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Start or pause the countdown.
    pub fn toggle(&mut self) {
        self.session.toggle();
        self.status = None;
    }

    /// Switch to `mode`, rewinding the countdown.
    pub fn select_mode(&mut self, mode: TimerMode) {
        self.session.select_mode(mode);
        self.status = Some(format!("{} selected", mode.display_name()));
    }

    /// Advance the countdown by one second.
    pub fn tick(&mut self) {
        if let TickOutcome::Completed { finished, next, .. } = self.session.tick() {
            if self.alerts.notify {
                self.status = Some(match finished {
                    TimerMode::Pomodoro => format!(
                        "Pomodoro finished, time for a {}",
                        next.display_name().to_lowercase()
                    ),
                    _ => "Break is over, back to work".to_string(),
                });
            }
            self.bell = self.alerts.sound;
        }
    }

    /// Rewind the countdown, logging accrued pomodoro time.
    ///
    /// Work time retained into a break is dropped by a break reset; the
    /// status line reports how much.
    pub fn reset(&mut self) {
        let pending = self.session.elapsed_seconds();
        let result = self.session.reset();
        let discarded = pending > 0 && matches!(result, Ok(None));
        self.record_commit(result);

        if discarded {
            self.status = Some(format!(
                "{} reset, discarded {} of unlogged work",
                self.session.mode().display_name(),
                format_hms(u64::from(pending))
            ));
        }
    }

    /// Select the next project, wrapping through "no project".
    pub fn cycle_project(&mut self) {
        self.project_index = match self.project_index {
            None if self.projects.is_empty() => None,
            None => Some(0),
            Some(i) if i + 1 < self.projects.len() => Some(i + 1),
            Some(_) => None,
        };
        self.task_id = None;
        self.sync_attribution();

        self.status = Some(match self.selected_project() {
            Some(project) => format!("Project: {}", project.name),
            None => "No project".to_string(),
        });
    }

    /// Select the next task of the current project, wrapping through "no task".
    pub fn cycle_task(&mut self) {
        let ids: Vec<String> = self.visible_tasks().iter().map(|t| t.id.clone()).collect();
        if ids.is_empty() {
            self.status = Some("No open tasks for this project".to_string());
            return;
        }

        self.task_id = match self
            .task_id
            .as_ref()
            .and_then(|id| ids.iter().position(|other| other == id))
        {
            None => ids.first().cloned(),
            Some(i) => ids.get(i + 1).cloned(),
        };
        self.sync_attribution();

        self.status = Some(match self.selected_task() {
            Some(task) => format!("Task: {}", task.title),
            None => "No task".to_string(),
        });
    }

    /// Commit work time that is still waiting when the app closes.
    ///
    /// # Errors
    ///
    /// Returns an error if the record could not be saved.
    pub fn finish(&mut self) -> Result<Option<TimeLogRecord>, QuickDevError> {
        self.session.pause();
        if !self.session.state().has_accrual() {
            return Ok(None);
        }

        let Attribution {
            project_id,
            task_id,
            notes,
        } = self.session.attribution().clone();
        let project_id = project_id.unwrap_or_else(|| UNASSIGNED_PROJECT_ID.to_string());

        let record = self.session.commit(&project_id, task_id.as_deref(), &notes)?;
        self.logged.push(record.clone());
        Ok(Some(record))
    }

    fn sync_attribution(&mut self) {
        let notes = self.session.attribution().notes.clone();
        let attribution = Attribution {
            project_id: self.selected_project().map(|p| p.id.clone()),
            task_id: self.task_id.clone(),
            notes,
        };
        self.session.set_attribution(attribution);
    }

    fn record_commit(&mut self, result: Result<Option<TimeLogRecord>, QuickDevError>) {
        match result {
            Ok(Some(record)) => {
                self.status = Some(format!(
                    "Logged {}",
                    format_hms(u64::from(record.duration_seconds))
                ));
                self.logged.push(record);
            }
            Ok(None) => {
                self.status = Some(format!("{} reset", self.session.mode().display_name()));
            }
            Err(e) => {
                self.status = Some(format!("Error: {e}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ManualClock;
    use crate::features::projects::Priority;
    use crate::features::timelog::MemoryTimeLogSink;
    use crate::features::timer::{Durations, TimerOptions};
    use chrono::{TimeZone, Utc};

    type TestApp<'a> = App<&'a ManualClock, &'a MemoryTimeLogSink>;

    fn make_app<'a>(
        clock: &'a ManualClock,
        sink: &'a MemoryTimeLogSink,
        alerts: Alerts,
    ) -> TestApp<'a> {
        let durations = Durations::new(3, 2, 4).unwrap();
        let session = TimerSession::new(clock, sink, durations, TimerOptions::default());

        let alpha = Project::new("Alpha", "", None, "").unwrap();
        let beta = Project::new("Beta", "", None, "").unwrap();
        let tasks = vec![
            Task::new(&alpha.id, "First", "", Priority::High, None).unwrap(),
            Task::new(&alpha.id, "Second", "", Priority::Low, None).unwrap(),
        ];
        App::new(session, vec![alpha, beta], tasks, alerts)
    }

    fn start_clock() -> ManualClock {
        ManualClock::new(Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap())
    }

    fn run_for(app: &mut TestApp<'_>, clock: &ManualClock, secs: u32) {
        for _ in 0..secs {
            clock.advance_secs(1);
            app.tick();
        }
    }

    #[test]
    fn test_new_app_has_no_selection() {
        let clock = start_clock();
        let sink = MemoryTimeLogSink::new();
        let app = make_app(&clock, &sink, Alerts::default());
        assert!(app.selected_project().is_none());
        assert!(app.selected_task().is_none());
        assert!(app.visible_tasks().is_empty());
    }

    #[test]
    fn test_cycle_project_wraps_through_none() {
        let clock = start_clock();
        let sink = MemoryTimeLogSink::new();
        let mut app = make_app(&clock, &sink, Alerts::default());

        app.cycle_project();
        assert_eq!(app.selected_project().unwrap().name, "Alpha");
        assert_eq!(app.visible_tasks().len(), 2);

        app.cycle_project();
        assert_eq!(app.selected_project().unwrap().name, "Beta");
        assert!(app.visible_tasks().is_empty());

        app.cycle_project();
        assert!(app.selected_project().is_none());
        assert!(app.session.attribution().project_id.is_none());
    }

    #[test]
    fn test_cycle_task_updates_attribution() {
        let clock = start_clock();
        let sink = MemoryTimeLogSink::new();
        let mut app = make_app(&clock, &sink, Alerts::default());
        app.cycle_project();

        app.cycle_task();
        assert_eq!(app.selected_task().unwrap().title, "First");
        app.cycle_task();
        assert_eq!(app.selected_task().unwrap().title, "Second");
        assert_eq!(
            app.session.attribution().task_id.as_deref(),
            app.selected_task().map(|t| t.id.as_str())
        );

        app.cycle_task();
        assert!(app.selected_task().is_none());
    }

    #[test]
    fn test_cycle_task_without_tasks_sets_status() {
        let clock = start_clock();
        let sink = MemoryTimeLogSink::new();
        let mut app = make_app(&clock, &sink, Alerts::default());
        app.cycle_task();
        assert_eq!(app.status.as_deref(), Some("No open tasks for this project"));
    }

    #[test]
    fn test_changing_project_clears_task() {
        let clock = start_clock();
        let sink = MemoryTimeLogSink::new();
        let mut app = make_app(&clock, &sink, Alerts::default());
        app.cycle_project();
        app.cycle_task();
        app.cycle_project();
        assert!(app.selected_task().is_none());
        assert!(app.session.attribution().task_id.is_none());
    }

    #[test]
    fn test_reset_logs_against_selection() {
        let clock = start_clock();
        let sink = MemoryTimeLogSink::new();
        let mut app = make_app(&clock, &sink, Alerts::default());
        app.cycle_project();
        app.toggle();
        run_for(&mut app, &clock, 2);

        app.reset();

        assert_eq!(app.logged.len(), 1);
        assert_eq!(app.logged[0].duration_seconds, 2);
        assert_eq!(app.logged[0].project_id, app.selected_project().unwrap().id);
        assert_eq!(sink.len(), 1);
        assert_eq!(app.status.as_deref(), Some("Logged 2s"));
    }

    #[test]
    fn test_reset_without_accrual_logs_nothing() {
        let clock = start_clock();
        let sink = MemoryTimeLogSink::new();
        let mut app = make_app(&clock, &sink, Alerts::default());
        app.reset();
        assert!(app.logged.is_empty());
        assert_eq!(app.status.as_deref(), Some("Pomodoro reset"));
    }

    #[test]
    fn test_break_reset_reports_discarded_work() {
        let clock = start_clock();
        let sink = MemoryTimeLogSink::new();
        let mut app = make_app(&clock, &sink, Alerts::default());
        app.toggle();
        run_for(&mut app, &clock, 3);
        assert_eq!(app.session.mode(), TimerMode::ShortBreak);

        app.reset();

        assert!(app.logged.is_empty());
        assert!(sink.is_empty());
        assert_eq!(
            app.status.as_deref(),
            Some("Short Break reset, discarded 3s of unlogged work")
        );
        assert_eq!(app.session.elapsed_seconds(), 0);
    }

    #[test]
    fn test_completion_sets_alerts() {
        let clock = start_clock();
        let sink = MemoryTimeLogSink::new();
        let alerts = Alerts {
            notify: true,
            sound: true,
        };
        let mut app = make_app(&clock, &sink, alerts);
        app.toggle();
        run_for(&mut app, &clock, 3);

        assert!(app.bell);
        assert_eq!(app.session.mode(), TimerMode::ShortBreak);
        assert!(app.status.as_deref().unwrap().starts_with("Pomodoro finished"));
    }

    #[test]
    fn test_completion_without_alerts_is_quiet() {
        let clock = start_clock();
        let sink = MemoryTimeLogSink::new();
        let mut app = make_app(&clock, &sink, Alerts::default());
        app.toggle();
        run_for(&mut app, &clock, 3);

        assert!(!app.bell);
        assert!(app.status.is_none());
    }

    #[test]
    fn test_finish_commits_retained_accrual() {
        let clock = start_clock();
        let sink = MemoryTimeLogSink::new();
        let mut app = make_app(&clock, &sink, Alerts::default());
        app.toggle();
        run_for(&mut app, &clock, 3);

        let record = app.finish().unwrap().unwrap();

        assert_eq!(record.duration_seconds, 3);
        assert_eq!(record.project_id, UNASSIGNED_PROJECT_ID);
        assert_eq!(app.logged.len(), 1);
        assert!(!app.session.state().has_accrual());
    }

    #[test]
    fn test_finish_with_nothing_accrued() {
        let clock = start_clock();
        let sink = MemoryTimeLogSink::new();
        let mut app = make_app(&clock, &sink, Alerts::default());
        assert!(app.finish().unwrap().is_none());
        assert!(app.logged.is_empty());
    }
}
