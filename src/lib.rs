//! quickdev - a terminal work timer for development projects
//!
//! This crate provides a pomodoro timer that logs the time spent on projects
//! and tasks to a local SQLite database, plus commands to list, summarise
//! and chart the logged time.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod features;
pub mod output;
pub mod storage;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::QuickDevError;
