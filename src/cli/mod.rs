//! Command-line interface for quickdev.

pub mod args;
pub mod commands;
