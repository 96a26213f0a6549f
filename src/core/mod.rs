//! Core abstractions for quickdev.
//!
//! This module provides the clock and collaborator traits the timer is built
//! against, plus shared date/duration helpers.

mod clock;
mod datetime;
mod traits;

pub use clock::{Clock, ManualClock, SystemClock};
pub use datetime::{
    days_in_month, format_hms, format_mmss, local_midnight, parse_date, parse_datetime,
    parse_duration_secs, start_of_week,
};
#[cfg(test)]
pub use traits::MockTimeLogSink;
pub use traits::{ProjectStore, TaskStore, TimeLogSink};
