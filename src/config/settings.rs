//! Configuration settings for quickdev.
//!
//! Settings are loaded from `~/.quickdev/config.yaml`.

use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::config::Paths;
use crate::error::QuickDevError;
use crate::features::timer::{Durations, TimerOptions};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Work timer settings.
    pub timer: TimerConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format.
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    /// Color output setting.
    #[serde(default = "default_color")]
    pub color: ColorSetting,
}

/// Color output setting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorSetting {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

/// Work timer settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TimerConfig {
    /// Pomodoro length in minutes.
    #[serde(default = "default_pomodoro_minutes")]
    pub pomodoro_minutes: u32,
    /// Short break length in minutes.
    #[serde(default = "default_short_break_minutes")]
    pub short_break_minutes: u32,
    /// Long break length in minutes.
    #[serde(default = "default_long_break_minutes")]
    pub long_break_minutes: u32,
    /// Number of pomodoros before a long break.
    #[serde(default = "default_long_break_interval")]
    pub long_break_interval: u32,
    /// Start the break countdown as soon as a pomodoro finishes.
    #[serde(default)]
    pub auto_start_breaks: bool,
    /// Start the next pomodoro as soon as a break finishes.
    #[serde(default)]
    pub auto_start_pomodoros: bool,
    /// Announce finished cycles in the timer status line.
    #[serde(default = "default_true")]
    pub show_notifications: bool,
    /// Ring the terminal bell when a cycle finishes.
    #[serde(default = "default_true")]
    pub play_sound: bool,
}

const fn default_output_format() -> OutputFormat {
    OutputFormat::Pretty
}

const fn default_color() -> ColorSetting {
    ColorSetting::Auto
}

const fn default_pomodoro_minutes() -> u32 {
    25
}

const fn default_short_break_minutes() -> u32 {
    5
}

const fn default_long_break_minutes() -> u32 {
    15
}

const fn default_long_break_interval() -> u32 {
    4
}

const fn default_true() -> bool {
    true
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: default_output_format(),
            color: default_color(),
        }
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            pomodoro_minutes: default_pomodoro_minutes(),
            short_break_minutes: default_short_break_minutes(),
            long_break_minutes: default_long_break_minutes(),
            long_break_interval: default_long_break_interval(),
            auto_start_breaks: false,
            auto_start_pomodoros: false,
            show_notifications: default_true(),
            play_sound: default_true(),
        }
    }
}

impl TimerConfig {
    /// Countdown lengths for each mode, in seconds.
    ///
    /// # Errors
    ///
    /// Returns an error if any length is zero.
    pub fn durations(&self) -> Result<Durations, QuickDevError> {
        Durations::new(
            self.pomodoro_minutes.saturating_mul(60),
            self.short_break_minutes.saturating_mul(60),
            self.long_break_minutes.saturating_mul(60),
        )
    }

    /// Cycle behaviour options for the timer.
    ///
    /// # Errors
    ///
    /// Returns an error if `long_break_interval` is zero.
    pub fn options(&self) -> Result<TimerOptions, QuickDevError> {
        if self.long_break_interval == 0 {
            return Err(QuickDevError::Config(
                "timer.long_break_interval must be at least 1".to_string(),
            ));
        }

        Ok(TimerOptions {
            long_break_interval: self.long_break_interval,
            auto_start_breaks: self.auto_start_breaks,
            auto_start_pomodoros: self.auto_start_pomodoros,
        })
    }
}

impl Config {
    /// Load configuration from the given paths.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load(paths: &Paths) -> Result<Self, QuickDevError> {
        Self::load_from_path(&paths.config_file)
    }

    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, QuickDevError> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            QuickDevError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        serde_yaml::from_str(&contents).map_err(|e| {
            QuickDevError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Save configuration to the given paths.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save(&self, paths: &Paths) -> Result<(), QuickDevError> {
        paths.ensure_dirs()?;
        self.save_to_path(&paths.config_file)
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), QuickDevError> {
        let contents = self.to_yaml()?;

        std::fs::write(path, contents).map_err(|e| {
            QuickDevError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Render the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String, QuickDevError> {
        serde_yaml::to_string(self)
            .map_err(|e| QuickDevError::Config(format!("Failed to serialize config: {e}")))
    }
}
