//! The work timer.
//!
//! A single countdown that cycles through pomodoros and breaks:
//! - Start, pause and reset the countdown
//! - Accrue work time while a pomodoro runs
//! - Commit the accrued time as a time log

pub mod mode;
pub mod session;

pub use mode::{Durations, TimerMode};
pub use session::{Attribution, TickOutcome, TimerOptions, TimerSession, TimerState};
