//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::core::{Clock, TimeLogSink};
use crate::error::QuickDevError;
use crate::features::timer::TimerMode;
use crate::tui::app::App;

/// Key help shown in the status bar.
pub const HELP: &str =
    "space:start/pause | r:reset | 1/2/3:mode | p:project | t:task | ?:help | q:quit";

/// Action to take after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Start or pause the countdown.
    Toggle,
    /// Rewind the countdown.
    Reset,
    /// Switch to a mode.
    Mode(TimerMode),
    /// Select the next project.
    CycleProject,
    /// Select the next task.
    CycleTask,
    /// Show key help.
    Help,
}

/// Map a key press to an action.
#[must_use]
pub fn key_action(key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char(' ' | 's') | KeyCode::Enter => Some(Action::Toggle),
        KeyCode::Char('r') => Some(Action::Reset),
        KeyCode::Char('1') => Some(Action::Mode(TimerMode::Pomodoro)),
        KeyCode::Char('2') => Some(Action::Mode(TimerMode::ShortBreak)),
        KeyCode::Char('3') => Some(Action::Mode(TimerMode::LongBreak)),
        KeyCode::Char('p') => Some(Action::CycleProject),
        KeyCode::Char('t') => Some(Action::CycleTask),
        KeyCode::Char('?') => Some(Action::Help),
        _ => None,
    }
}

/// Handle terminal events, waiting at most `timeout` for one.
///
/// Returns an action to take, or None if no action is needed.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn handle_events<C: Clock, S: TimeLogSink>(
    app: &mut App<C, S>,
    timeout: Duration,
) -> Result<Option<Action>, QuickDevError> {
    if !event::poll(timeout).map_err(|e| QuickDevError::Terminal(format!("Event poll failed: {e}")))? {
        return Ok(None);
    }

    let Event::Key(key) =
        event::read().map_err(|e| QuickDevError::Terminal(format!("Event read failed: {e}")))?
    else {
        return Ok(None);
    };

    let action = key_action(key);
    if action == Some(Action::Help) {
        app.status = Some(HELP.to_string());
        return Ok(None);
    }
    Ok(action)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(key_action(press(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(key_action(press(KeyCode::Esc)), Some(Action::Quit));
        assert_eq!(
            key_action(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_timer_keys() {
        assert_eq!(key_action(press(KeyCode::Char(' '))), Some(Action::Toggle));
        assert_eq!(key_action(press(KeyCode::Char('s'))), Some(Action::Toggle));
        assert_eq!(key_action(press(KeyCode::Char('r'))), Some(Action::Reset));
        assert_eq!(
            key_action(press(KeyCode::Char('2'))),
            Some(Action::Mode(TimerMode::ShortBreak))
        );
        assert_eq!(
            key_action(press(KeyCode::Char('3'))),
            Some(Action::Mode(TimerMode::LongBreak))
        );
    }

    #[test]
    fn test_selection_keys() {
        assert_eq!(key_action(press(KeyCode::Char('p'))), Some(Action::CycleProject));
        assert_eq!(key_action(press(KeyCode::Char('t'))), Some(Action::CycleTask));
    }

    #[test]
    fn test_unbound_and_released_keys() {
        assert_eq!(key_action(press(KeyCode::Char('z'))), None);

        let mut release = press(KeyCode::Char('q'));
        release.kind = KeyEventKind::Release;
        assert_eq!(key_action(release), None);
    }
}
