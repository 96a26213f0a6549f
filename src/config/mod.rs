//! Configuration management for quickdev.
//!
//! This module handles loading and saving configuration from `~/.quickdev/`.

mod paths;
mod settings;

pub use paths::{Paths, HOME_ENV};
pub use settings::{ColorSetting, Config, GeneralConfig, TimerConfig};
