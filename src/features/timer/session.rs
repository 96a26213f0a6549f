//! The work timer state machine.
//!
//! A [`TimerSession`] drives one countdown through pomodoro and break cycles.
//! The host calls [`TimerSession::tick`] once per second while the timer is
//! running; every other mutation goes through the named operations. Work
//! seconds accrue only while a pomodoro is ticking and are turned into a
//! [`TimeLogRecord`] on commit.

use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};

use super::mode::{Durations, TimerMode};
use crate::core::{format_hms, format_mmss, Clock, TimeLogSink};
use crate::error::QuickDevError;
use crate::features::timelog::{TimeLogRecord, UNASSIGNED_PROJECT_ID};

/// Cycle behaviour that is not part of the countdown itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerOptions {
    /// Every n-th finished pomodoro is followed by a long break.
    pub long_break_interval: u32,
    /// Start a break countdown as soon as a pomodoro finishes.
    pub auto_start_breaks: bool,
    /// Start a pomodoro countdown as soon as a break finishes.
    pub auto_start_pomodoros: bool,
}

impl Default for TimerOptions {
    fn default() -> Self {
        Self {
            long_break_interval: 4,
            auto_start_breaks: false,
            auto_start_pomodoros: false,
        }
    }
}

/// Mutable timer state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    /// Current mode
    pub mode: TimerMode,
    /// Seconds left on the countdown
    pub seconds_remaining: u32,
    /// Whether the countdown is ticking
    pub running: bool,
    /// Pomodoros finished by reaching zero
    pub completed_pomodoros: u32,
    /// When the current accrual began
    pub session_start: Option<DateTime<Utc>>,
    /// Work seconds accrued since `session_start`
    pub elapsed_seconds: u32,
}

impl TimerState {
    /// Fresh state: an idle pomodoro with a full countdown.
    #[must_use]
    pub const fn new(durations: &Durations) -> Self {
        Self {
            mode: TimerMode::Pomodoro,
            seconds_remaining: durations.get(TimerMode::Pomodoro),
            running: false,
            completed_pomodoros: 0,
            session_start: None,
            elapsed_seconds: 0,
        }
    }

    /// Whether work time is waiting to be committed.
    #[must_use]
    pub const fn has_accrual(&self) -> bool {
        self.session_start.is_some() && self.elapsed_seconds > 0
    }
}

/// Project, task and notes that a reset commits against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribution {
    /// Selected project
    pub project_id: Option<String>,
    /// Selected task
    pub task_id: Option<String>,
    /// Free-form notes for the log entry
    pub notes: String,
}

impl Attribution {
    /// Attribution to a project, without task or notes.
    #[must_use]
    pub fn project(project_id: impl Into<String>) -> Self {
        Self {
            project_id: Some(project_id.into()),
            ..Self::default()
        }
    }
}

/// What a call to [`TimerSession::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The timer was not running; nothing changed.
    Idle,
    /// One second elapsed.
    Ticked,
    /// The countdown reached zero and the timer moved to the next mode.
    Completed {
        /// Mode that just finished
        finished: TimerMode,
        /// Mode the timer switched to
        next: TimerMode,
        /// Whether the next countdown started on its own
        auto_started: bool,
    },
}

/// A single work-timer session.
pub struct TimerSession<C: Clock, S: TimeLogSink> {
    clock: C,
    sink: S,
    durations: Durations,
    options: TimerOptions,
    state: TimerState,
    attribution: Attribution,
}

impl<C: Clock, S: TimeLogSink> TimerSession<C, S> {
    /// Create a session with the given countdown lengths and options.
    pub fn new(clock: C, sink: S, durations: Durations, options: TimerOptions) -> Self {
        Self {
            state: TimerState::new(&durations),
            clock,
            sink,
            durations,
            options,
            attribution: Attribution::default(),
        }
    }

    /// Create a session with the standard 25/5/15 minute cycle.
    pub fn with_defaults(clock: C, sink: S) -> Self {
        Self::new(clock, sink, Durations::default(), TimerOptions::default())
    }

    /// Switch to `mode` with a full, stopped countdown.
    ///
    /// Accrued work time is kept; it is committed by the next pomodoro reset.
    pub fn select_mode(&mut self, mode: TimerMode) {
        if self.state.running {
            debug!("Stopping {} timer to switch to {mode}", self.state.mode);
        }
        self.state.mode = mode;
        self.state.seconds_remaining = self.durations.get(mode);
        self.state.running = false;
    }

    /// Start or resume the countdown.
    pub fn start(&mut self) {
        if self.state.running {
            return;
        }

        self.state.running = true;
        if self.state.mode == TimerMode::Pomodoro && self.state.session_start.is_none() {
            let now = self.clock.now();
            debug!("Work session started at {now}");
            self.state.session_start = Some(now);
        }
    }

    /// Stop the countdown, keeping its position.
    pub fn pause(&mut self) {
        self.state.running = false;
    }

    /// Start if idle, pause if running.
    pub fn toggle(&mut self) {
        if self.state.running {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Advance the countdown by one second.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.state.running {
            return TickOutcome::Idle;
        }

        self.state.seconds_remaining = self.state.seconds_remaining.saturating_sub(1);
        if self.state.mode == TimerMode::Pomodoro {
            self.state.elapsed_seconds = self.state.elapsed_seconds.saturating_add(1);
        }

        if self.state.seconds_remaining == 0 {
            return self.complete_cycle();
        }

        TickOutcome::Ticked
    }

    /// Stop and rewind the countdown.
    ///
    /// In pomodoro mode any accrued work time is committed against the
    /// current [`Attribution`] first. The accrual is cleared in every mode.
    ///
    /// # Errors
    ///
    /// Returns `LogNotSaved` if the sink rejected the committed record.
    pub fn reset(&mut self) -> Result<Option<TimeLogRecord>, QuickDevError> {
        self.state.running = false;
        self.state.seconds_remaining = self.durations.get(self.state.mode);

        let committed = if self.state.mode == TimerMode::Pomodoro && self.state.has_accrual() {
            let Attribution {
                project_id,
                task_id,
                notes,
            } = self.attribution.clone();
            let project_id = project_id.unwrap_or_else(|| UNASSIGNED_PROJECT_ID.to_string());
            Some(self.commit(&project_id, task_id.as_deref(), &notes))
        } else {
            if self.state.elapsed_seconds > 0 {
                warn!(
                    "Discarding {}s of work accrued before a {} reset",
                    self.state.elapsed_seconds, self.state.mode
                );
            }
            None
        };

        self.state.session_start = None;
        self.state.elapsed_seconds = 0;

        committed.transpose()
    }

    /// Turn the accrued work time into a time log.
    ///
    /// The record ends now and spans exactly the accrued seconds. A blank
    /// `project_id` is logged as unassigned. The accrual is cleared before
    /// the record is handed to the sink.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if nothing has accrued, or `LogNotSaved` if
    /// the sink rejected the record.
    pub fn commit(
        &mut self,
        project_id: &str,
        task_id: Option<&str>,
        notes: &str,
    ) -> Result<TimeLogRecord, QuickDevError> {
        if self.state.session_start.is_none() {
            return Err(QuickDevError::InvalidState(
                "no work session has been started".to_string(),
            ));
        }
        if self.state.elapsed_seconds == 0 {
            return Err(QuickDevError::InvalidState(
                "no work time has accrued".to_string(),
            ));
        }

        let project_id = if project_id.trim().is_empty() {
            UNASSIGNED_PROJECT_ID
        } else {
            project_id
        };
        let record = TimeLogRecord::ending_at(
            project_id,
            task_id,
            self.clock.now(),
            self.state.elapsed_seconds,
            notes,
        )?;

        self.state.session_start = None;
        self.state.elapsed_seconds = 0;

        match self.sink.record(&record) {
            Ok(()) => {
                info!(
                    "Logged {} on project {}",
                    format_hms(u64::from(record.duration_seconds)),
                    record.project_id
                );
                Ok(record)
            }
            Err(e) => {
                error!("Failed to save time log {}: {e}", record.id);
                Err(QuickDevError::LogNotSaved {
                    record: Box::new(record),
                    reason: e.to_string(),
                })
            }
        }
    }

    fn complete_cycle(&mut self) -> TickOutcome {
        let finished = self.state.mode;
        self.state.running = false;

        let next = if finished == TimerMode::Pomodoro {
            self.state.completed_pomodoros += 1;
            if self.state.completed_pomodoros % self.options.long_break_interval.max(1) == 0 {
                TimerMode::LongBreak
            } else {
                TimerMode::ShortBreak
            }
        } else {
            TimerMode::Pomodoro
        };

        info!("{finished} finished, switching to {next}");
        self.select_mode(next);

        let auto_start = if next.is_break() {
            self.options.auto_start_breaks
        } else {
            self.options.auto_start_pomodoros
        };
        if auto_start {
            self.start();
        }

        TickOutcome::Completed {
            finished,
            next,
            auto_started: auto_start,
        }
    }

    /// Set the project, task and notes used by [`TimerSession::reset`].
    pub fn set_attribution(&mut self, attribution: Attribution) {
        self.attribution = attribution;
    }

    /// Current attribution.
    #[must_use]
    pub const fn attribution(&self) -> &Attribution {
        &self.attribution
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &TimerState {
        &self.state
    }

    /// Current mode.
    #[must_use]
    pub const fn mode(&self) -> TimerMode {
        self.state.mode
    }

    /// Seconds left on the countdown.
    #[must_use]
    pub const fn seconds_remaining(&self) -> u32 {
        self.state.seconds_remaining
    }

    /// Whether the countdown is ticking.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.state.running
    }

    /// Pomodoros finished so far.
    #[must_use]
    pub const fn completed_pomodoros(&self) -> u32 {
        self.state.completed_pomodoros
    }

    /// Work seconds waiting to be committed.
    #[must_use]
    pub const fn elapsed_seconds(&self) -> u32 {
        self.state.elapsed_seconds
    }

    /// When the current accrual began.
    #[must_use]
    pub const fn session_start(&self) -> Option<DateTime<Utc>> {
        self.state.session_start
    }

    /// Countdown lengths.
    #[must_use]
    pub const fn durations(&self) -> &Durations {
        &self.durations
    }

    /// Cycle options.
    #[must_use]
    pub const fn options(&self) -> &TimerOptions {
        &self.options
    }

    /// Fraction of the current countdown that has elapsed, in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        let total = self.durations.get(self.state.mode);
        if total == 0 {
            return 1.0;
        }
        let remaining = f64::from(self.state.seconds_remaining) / f64::from(total);
        (1.0 - remaining).clamp(0.0, 1.0)
    }

    /// Remaining time as `MM:SS`.
    #[must_use]
    pub fn formatted_time_remaining(&self) -> String {
        format_mmss(self.state.seconds_remaining)
    }

    /// Accrued work time, e.g. `12m 30s`.
    #[must_use]
    pub fn formatted_elapsed(&self) -> String {
        format_hms(u64::from(self.state.elapsed_seconds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ManualClock, MockTimeLogSink};
    use crate::features::timelog::MemoryTimeLogSink;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap()
    }

    /// Tick once per simulated second, keeping the clock in step.
    fn run_for(session: &mut TimerSession<&ManualClock, &MemoryTimeLogSink>, clock: &ManualClock, secs: u32) {
        for _ in 0..secs {
            clock.advance_secs(1);
            session.tick();
        }
    }

    #[test]
    fn test_new_session_defaults() {
        let clock = ManualClock::new(t0());
        let sink = MemoryTimeLogSink::new();
        let session = TimerSession::with_defaults(&clock, &sink);

        assert_eq!(session.mode(), TimerMode::Pomodoro);
        assert_eq!(session.seconds_remaining(), 1500);
        assert!(!session.is_running());
        assert_eq!(session.completed_pomodoros(), 0);
        assert_eq!(session.elapsed_seconds(), 0);
        assert!(session.session_start().is_none());
        assert_eq!(session.formatted_time_remaining(), "25:00");
    }

    #[test]
    fn test_start_records_session_start_once() {
        let clock = ManualClock::new(t0());
        let sink = MemoryTimeLogSink::new();
        let mut session = TimerSession::with_defaults(&clock, &sink);

        session.start();
        assert!(session.is_running());
        assert_eq!(session.session_start(), Some(t0()));

        run_for(&mut session, &clock, 10);
        session.pause();
        session.start();
        assert_eq!(session.session_start(), Some(t0()));
    }

    #[test]
    fn test_start_in_break_does_not_open_accrual() {
        let clock = ManualClock::new(t0());
        let sink = MemoryTimeLogSink::new();
        let mut session = TimerSession::with_defaults(&clock, &sink);

        session.select_mode(TimerMode::ShortBreak);
        session.start();
        assert!(session.session_start().is_none());
    }

    #[test]
    fn test_pause_is_idempotent() {
        let clock = ManualClock::new(t0());
        let sink = MemoryTimeLogSink::new();
        let mut session = TimerSession::with_defaults(&clock, &sink);

        session.start();
        session.pause();
        session.pause();
        assert!(!session.is_running());
        assert_eq!(session.tick(), TickOutcome::Idle);
        assert_eq!(session.seconds_remaining(), 1500);
    }

    #[test]
    fn test_countdown_is_monotonic_and_never_negative() {
        let clock = ManualClock::new(t0());
        let sink = MemoryTimeLogSink::new();
        let durations = Durations::new(3, 2, 4).unwrap();
        let mut session = TimerSession::new(&clock, &sink, durations, TimerOptions::default());

        session.start();
        let mut last = session.seconds_remaining();
        for _ in 0..2 {
            assert_eq!(session.tick(), TickOutcome::Ticked);
            assert!(session.seconds_remaining() < last);
            last = session.seconds_remaining();
        }
        assert!(matches!(session.tick(), TickOutcome::Completed { .. }));

        // Idle ticks after completion change nothing
        let after = session.seconds_remaining();
        for _ in 0..5 {
            assert_eq!(session.tick(), TickOutcome::Idle);
        }
        assert_eq!(session.seconds_remaining(), after);
    }

    #[test]
    fn test_accrual_only_while_pomodoro_runs() {
        let clock = ManualClock::new(t0());
        let sink = MemoryTimeLogSink::new();
        let mut session = TimerSession::with_defaults(&clock, &sink);

        // Paused pomodoro: no accrual
        session.tick();
        assert_eq!(session.elapsed_seconds(), 0);

        session.start();
        run_for(&mut session, &clock, 5);
        assert_eq!(session.elapsed_seconds(), 5);

        // Running break: no accrual, earlier accrual retained
        session.select_mode(TimerMode::ShortBreak);
        session.start();
        run_for(&mut session, &clock, 7);
        assert_eq!(session.elapsed_seconds(), 5);
        assert_eq!(session.seconds_remaining(), 293);
    }

    #[test]
    fn test_mode_switch_resets_countdown() {
        let clock = ManualClock::new(t0());
        let sink = MemoryTimeLogSink::new();
        let mut session = TimerSession::with_defaults(&clock, &sink);

        session.select_mode(TimerMode::ShortBreak);
        session.start();
        run_for(&mut session, &clock, 100);
        assert_eq!(session.seconds_remaining(), 200);

        session.select_mode(TimerMode::ShortBreak);
        assert_eq!(session.seconds_remaining(), 300);
        assert!(!session.is_running());

        session.select_mode(TimerMode::LongBreak);
        assert_eq!(session.seconds_remaining(), 900);
    }

    #[test]
    fn test_full_pomodoro_completes_into_short_break() {
        let clock = ManualClock::new(t0());
        let sink = MemoryTimeLogSink::new();
        let mut session = TimerSession::with_defaults(&clock, &sink);

        session.start();
        for i in 1..=1500 {
            clock.advance_secs(1);
            let outcome = session.tick();
            if i < 1500 {
                assert_eq!(outcome, TickOutcome::Ticked);
            } else {
                assert_eq!(
                    outcome,
                    TickOutcome::Completed {
                        finished: TimerMode::Pomodoro,
                        next: TimerMode::ShortBreak,
                        auto_started: false,
                    }
                );
            }
        }

        assert_eq!(session.completed_pomodoros(), 1);
        assert_eq!(session.mode(), TimerMode::ShortBreak);
        assert_eq!(session.seconds_remaining(), 300);
        assert!(!session.is_running());

        // Natural completion does not commit; the work is retained
        assert!(sink.is_empty());
        assert_eq!(session.elapsed_seconds(), 1500);
        assert_eq!(session.session_start(), Some(t0()));
    }

    #[test]
    fn test_cycle_rule_long_break_every_fourth() {
        let clock = ManualClock::new(t0());
        let sink = MemoryTimeLogSink::new();
        let durations = Durations::new(2, 1, 3).unwrap();
        let mut session = TimerSession::new(&clock, &sink, durations, TimerOptions::default());

        let mut breaks = Vec::new();
        for _ in 0..8 {
            assert_eq!(session.mode(), TimerMode::Pomodoro);
            session.start();
            run_for(&mut session, &clock, 2);
            breaks.push(session.mode());

            session.start();
            let secs = session.seconds_remaining();
            run_for(&mut session, &clock, secs);
        }

        assert_eq!(
            breaks,
            vec![
                TimerMode::ShortBreak,
                TimerMode::ShortBreak,
                TimerMode::ShortBreak,
                TimerMode::LongBreak,
                TimerMode::ShortBreak,
                TimerMode::ShortBreak,
                TimerMode::ShortBreak,
                TimerMode::LongBreak,
            ]
        );
        assert_eq!(session.completed_pomodoros(), 8);
    }

    #[test]
    fn test_custom_long_break_interval() {
        let clock = ManualClock::new(t0());
        let sink = MemoryTimeLogSink::new();
        let durations = Durations::new(1, 1, 1).unwrap();
        let options = TimerOptions {
            long_break_interval: 2,
            ..TimerOptions::default()
        };
        let mut session = TimerSession::new(&clock, &sink, durations, options);

        session.start();
        session.tick();
        assert_eq!(session.mode(), TimerMode::ShortBreak);
        session.start();
        session.tick();
        session.start();
        session.tick();
        assert_eq!(session.mode(), TimerMode::LongBreak);
    }

    #[test]
    fn test_auto_start_options() {
        let clock = ManualClock::new(t0());
        let sink = MemoryTimeLogSink::new();
        let durations = Durations::new(2, 1, 1).unwrap();
        let options = TimerOptions {
            auto_start_breaks: true,
            ..TimerOptions::default()
        };
        let mut session = TimerSession::new(&clock, &sink, durations, options);

        session.start();
        session.tick();
        let outcome = session.tick();
        assert_eq!(
            outcome,
            TickOutcome::Completed {
                finished: TimerMode::Pomodoro,
                next: TimerMode::ShortBreak,
                auto_started: true,
            }
        );
        assert!(session.is_running());

        // Pomodoros do not auto-start
        session.tick();
        assert_eq!(session.mode(), TimerMode::Pomodoro);
        assert!(!session.is_running());
    }

    #[test]
    fn test_commit_without_accrual_fails() {
        let clock = ManualClock::new(t0());
        let sink = MemoryTimeLogSink::new();
        let mut session = TimerSession::with_defaults(&clock, &sink);

        let err = session.commit("p1", None, "").unwrap_err();
        assert!(err.is_invalid_state());

        // Started but not yet ticked
        session.start();
        let err = session.commit("p1", None, "").unwrap_err();
        assert!(err.is_invalid_state());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_commit_produces_consistent_record() {
        let clock = ManualClock::new(t0());
        let sink = MemoryTimeLogSink::new();
        let mut session = TimerSession::with_defaults(&clock, &sink);

        session.start();
        run_for(&mut session, &clock, 120);
        session.pause();
        clock.advance_secs(600);

        let record = session.commit("p1", Some("t1"), "auth flow").unwrap();

        assert_eq!(record.duration_seconds, 120);
        assert_eq!(record.end_time, t0() + Duration::seconds(720));
        assert_eq!((record.end_time - record.start_time).num_seconds(), 120);
        assert_eq!(record.project_id, "p1");
        assert_eq!(record.task_id.as_deref(), Some("t1"));
        assert_eq!(record.notes, "auth flow");

        assert_eq!(session.elapsed_seconds(), 0);
        assert!(session.session_start().is_none());
        assert_eq!(sink.records(), vec![record]);
    }

    #[test]
    fn test_commit_with_blank_project_is_unassigned() {
        let clock = ManualClock::new(t0());
        let sink = MemoryTimeLogSink::new();
        let mut session = TimerSession::with_defaults(&clock, &sink);

        session.start();
        run_for(&mut session, &clock, 1);

        let record = session.commit("", None, "").unwrap();
        assert_eq!(record.project_id, UNASSIGNED_PROJECT_ID);
        assert_eq!(record.duration_seconds, 1);
        assert_eq!(session.elapsed_seconds(), 0);

        session.start();
        run_for(&mut session, &clock, 2);
        let record = session.commit("   ", None, "").unwrap();
        assert_eq!(record.project_id, UNASSIGNED_PROJECT_ID);
        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn test_reset_commits_accrual() {
        let clock = ManualClock::new(t0());
        let sink = MemoryTimeLogSink::new();
        let mut session = TimerSession::with_defaults(&clock, &sink);
        session.set_attribution(Attribution {
            project_id: Some("p1".to_string()),
            task_id: None,
            notes: "api".to_string(),
        });

        session.start();
        run_for(&mut session, &clock, 930);
        assert_eq!(session.elapsed_seconds(), 930);

        let record = session.reset().unwrap().unwrap();

        assert_eq!(record.duration_seconds, 930);
        assert_eq!(record.start_time, t0());
        assert_eq!(record.end_time, t0() + Duration::seconds(930));
        assert_eq!(session.elapsed_seconds(), 0);
        assert!(session.session_start().is_none());
        assert_eq!(session.seconds_remaining(), 1500);
        assert!(!session.is_running());
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_reset_without_project_is_unassigned() {
        let clock = ManualClock::new(t0());
        let sink = MemoryTimeLogSink::new();
        let mut session = TimerSession::with_defaults(&clock, &sink);

        session.start();
        run_for(&mut session, &clock, 30);
        let record = session.reset().unwrap().unwrap();
        assert_eq!(record.project_id, UNASSIGNED_PROJECT_ID);
    }

    #[test]
    fn test_reset_without_accrual_commits_nothing() {
        let clock = ManualClock::new(t0());
        let sink = MemoryTimeLogSink::new();
        let mut session = TimerSession::with_defaults(&clock, &sink);

        session.start();
        assert!(session.reset().unwrap().is_none());
        assert!(session.session_start().is_none());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_reset_in_break_never_commits() {
        let clock = ManualClock::new(t0());
        let sink = MemoryTimeLogSink::new();
        let mut session = TimerSession::with_defaults(&clock, &sink);

        session.start();
        run_for(&mut session, &clock, 60);
        session.select_mode(TimerMode::LongBreak);
        session.start();
        run_for(&mut session, &clock, 10);

        assert!(session.reset().unwrap().is_none());
        assert!(sink.is_empty());
        assert_eq!(session.seconds_remaining(), 900);
        assert_eq!(session.elapsed_seconds(), 0);
    }

    #[test]
    fn test_retained_accrual_logged_on_next_pomodoro_reset() {
        let clock = ManualClock::new(t0());
        let sink = MemoryTimeLogSink::new();
        let durations = Durations::new(10, 5, 5).unwrap();
        let mut session = TimerSession::new(&clock, &sink, durations, TimerOptions::default());

        session.start();
        run_for(&mut session, &clock, 10);
        assert_eq!(session.mode(), TimerMode::ShortBreak);

        session.select_mode(TimerMode::Pomodoro);
        session.start();
        run_for(&mut session, &clock, 4);

        let record = session.reset().unwrap().unwrap();
        assert_eq!(record.duration_seconds, 14);
        assert_eq!((record.end_time - record.start_time).num_seconds(), 14);
    }

    #[test]
    fn test_sink_failure_still_clears_accrual() {
        let clock = ManualClock::new(t0());
        let mut sink = MockTimeLogSink::new();
        sink.expect_record()
            .times(1)
            .returning(|_| Err(QuickDevError::Database("disk full".to_string())));
        let mut session = TimerSession::with_defaults(&clock, sink);

        session.start();
        clock.advance_secs(1);
        session.tick();
        clock.advance_secs(1);
        session.tick();

        let err = session.commit("p1", None, "").unwrap_err();
        match err {
            QuickDevError::LogNotSaved { record, reason } => {
                assert_eq!(record.duration_seconds, 2);
                assert!(reason.contains("disk full"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(session.elapsed_seconds(), 0);
        assert!(session.session_start().is_none());
    }

    #[test]
    fn test_progress_bounds() {
        let clock = ManualClock::new(t0());
        let sink = MemoryTimeLogSink::new();
        let durations = Durations::new(4, 2, 3).unwrap();
        let mut session = TimerSession::new(&clock, &sink, durations, TimerOptions::default());

        assert!(session.progress().abs() < f64::EPSILON);

        session.start();
        let mut last = session.progress();
        for _ in 0..3 {
            session.tick();
            let progress = session.progress();
            assert!((0.0..=1.0).contains(&progress));
            assert!(progress >= last);
            last = progress;
        }
        assert!((session.progress() - 0.75).abs() < 1e-9);

        session.tick();
        assert!((0.0..=1.0).contains(&session.progress()));
    }

    #[test]
    fn test_toggle() {
        let clock = ManualClock::new(t0());
        let sink = MemoryTimeLogSink::new();
        let mut session = TimerSession::with_defaults(&clock, &sink);

        session.toggle();
        assert!(session.is_running());
        session.toggle();
        assert!(!session.is_running());
    }

    #[test]
    fn test_formatted_elapsed() {
        let clock = ManualClock::new(t0());
        let sink = MemoryTimeLogSink::new();
        let mut session = TimerSession::with_defaults(&clock, &sink);

        session.start();
        run_for(&mut session, &clock, 75);
        assert_eq!(session.formatted_elapsed(), "1m 15s");
        assert_eq!(session.formatted_time_remaining(), "23:45");
    }
}
