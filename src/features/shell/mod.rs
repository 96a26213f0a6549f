//! Shell integration.
//!
//! Generates completion scripts for the `quickdev` binary.

pub mod completions;

pub use completions::{completion_install_instructions, generate_completions};
