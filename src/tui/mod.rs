//! Terminal User Interface (TUI) for the work timer.
//!
//! Hosts a [`TimerSession`](crate::features::timer::TimerSession): draws the
//! countdown, ticks it once per second, and maps key presses onto timer
//! operations. Built with ratatui and crossterm.

mod app;
mod event;
mod ui;

pub use app::{Alerts, App};
pub use event::{key_action, Action};

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::warn;
use ratatui::prelude::*;

use crate::core::{Clock, TimeLogSink};
use crate::error::QuickDevError;
use crate::features::timelog::TimeLogRecord;

const TICK: Duration = Duration::from_secs(1);

/// Run the timer TUI until the user quits.
///
/// Returns every record committed while the app ran, including work time
/// committed on quit.
///
/// # Errors
///
/// Returns an error if the terminal fails to initialize or draw.
pub fn run<C: Clock, S: TimeLogSink>(
    mut app: App<C, S>,
) -> Result<Vec<TimeLogRecord>, QuickDevError> {
    enable_raw_mode()
        .map_err(|e| QuickDevError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| QuickDevError::Terminal(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| QuickDevError::Terminal(format!("Failed to create terminal: {e}")))?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    // Work time is committed even if the loop failed.
    let finished = app.finish();
    result?;
    if let Err(e) = finished {
        warn!("Could not save work time on exit: {e}");
        return Err(e);
    }

    Ok(app.logged)
}

/// Run the main application loop.
fn run_app<B: Backend + Write, C: Clock, S: TimeLogSink>(
    terminal: &mut Terminal<B>,
    app: &mut App<C, S>,
) -> Result<(), QuickDevError> {
    let mut last_tick = Instant::now();

    loop {
        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| QuickDevError::Terminal(format!("Failed to draw: {e}")))?;

        if app.bell {
            app.bell = false;
            let backend = terminal.backend_mut();
            backend.write_all(b"\x07").ok();
            Write::flush(backend).ok();
        }

        let timeout = TICK.saturating_sub(last_tick.elapsed());
        if let Some(action) = event::handle_events(app, timeout)? {
            match action {
                Action::Quit => break,
                Action::Toggle => {
                    app.toggle();
                    last_tick = Instant::now();
                }
                Action::Reset => app.reset(),
                Action::Mode(mode) => app.select_mode(mode),
                Action::CycleProject => app.cycle_project(),
                Action::CycleTask => app.cycle_task(),
                Action::Help => {}
            }
        }

        while last_tick.elapsed() >= TICK {
            last_tick += TICK;
            app.tick();
        }
    }

    Ok(())
}
