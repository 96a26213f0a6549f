//! Feature implementations for quickdev.
//!
//! This module contains:
//! - The work timer state machine
//! - Projects and tasks
//! - Time logs, summaries and charts
//! - Shell completions

pub mod projects;
pub mod shell;
pub mod timelog;
pub mod timer;
