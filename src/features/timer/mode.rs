//! Timer modes and their countdown lengths.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QuickDevError;

/// Which countdown the timer is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerMode {
    /// Work interval; the only mode that accrues logged time.
    Pomodoro,
    /// Short rest between pomodoros.
    ShortBreak,
    /// Long rest after a full set of pomodoros.
    LongBreak,
}

impl TimerMode {
    /// All modes, in tab order.
    pub const ALL: [Self; 3] = [Self::Pomodoro, Self::ShortBreak, Self::LongBreak];

    /// Get display name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Pomodoro => "Pomodoro",
            Self::ShortBreak => "Short Break",
            Self::LongBreak => "Long Break",
        }
    }

    /// Stable machine name, as stored and serialized.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pomodoro => "pomodoro",
            Self::ShortBreak => "short_break",
            Self::LongBreak => "long_break",
        }
    }

    /// Check if this is a break mode.
    #[must_use]
    pub const fn is_break(&self) -> bool {
        matches!(self, Self::ShortBreak | Self::LongBreak)
    }
}

impl fmt::Display for TimerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for TimerMode {
    type Err = QuickDevError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pomodoro" | "pomo" | "p" | "work" => Ok(Self::Pomodoro),
            "short" | "short-break" | "short_break" | "sb" => Ok(Self::ShortBreak),
            "long" | "long-break" | "long_break" | "lb" => Ok(Self::LongBreak),
            other => Err(QuickDevError::InvalidArgument(format!(
                "Unknown timer mode '{other}' (expected pomodoro, short or long)"
            ))),
        }
    }
}

/// Countdown length of each mode, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Durations {
    pomodoro: u32,
    short_break: u32,
    long_break: u32,
}

impl Durations {
    /// Build a duration table.
    ///
    /// # Errors
    ///
    /// Returns an error if any duration is zero.
    pub fn new(pomodoro: u32, short_break: u32, long_break: u32) -> Result<Self, QuickDevError> {
        for (mode, secs) in [
            (TimerMode::Pomodoro, pomodoro),
            (TimerMode::ShortBreak, short_break),
            (TimerMode::LongBreak, long_break),
        ] {
            if secs == 0 {
                return Err(QuickDevError::Config(format!(
                    "{mode} duration must be greater than zero"
                )));
            }
        }

        Ok(Self {
            pomodoro,
            short_break,
            long_break,
        })
    }

    /// Countdown length for `mode`.
    #[must_use]
    pub const fn get(&self, mode: TimerMode) -> u32 {
        match mode {
            TimerMode::Pomodoro => self.pomodoro,
            TimerMode::ShortBreak => self.short_break,
            TimerMode::LongBreak => self.long_break,
        }
    }
}

impl Default for Durations {
    fn default() -> Self {
        Self {
            pomodoro: 25 * 60,
            short_break: 5 * 60,
            long_break: 15 * 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_durations() {
        let durations = Durations::default();
        assert_eq!(durations.get(TimerMode::Pomodoro), 1500);
        assert_eq!(durations.get(TimerMode::ShortBreak), 300);
        assert_eq!(durations.get(TimerMode::LongBreak), 900);
    }

    #[test]
    fn test_durations_reject_zero() {
        assert!(Durations::new(1500, 0, 900).is_err());
        assert!(Durations::new(60, 30, 90).is_ok());
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!("pomodoro".parse::<TimerMode>().unwrap(), TimerMode::Pomodoro);
        assert_eq!("pomo".parse::<TimerMode>().unwrap(), TimerMode::Pomodoro);
        assert_eq!("short".parse::<TimerMode>().unwrap(), TimerMode::ShortBreak);
        assert_eq!("LB".parse::<TimerMode>().unwrap(), TimerMode::LongBreak);
        assert!("nap".parse::<TimerMode>().is_err());
    }

    #[test]
    fn test_mode_is_break() {
        assert!(!TimerMode::Pomodoro.is_break());
        assert!(TimerMode::ShortBreak.is_break());
        assert!(TimerMode::LongBreak.is_break());
    }

    #[test]
    fn test_mode_serde_names() {
        let json = serde_json::to_string(&TimerMode::ShortBreak).unwrap();
        assert_eq!(json, "\"short_break\"");
        assert_eq!(TimerMode::LongBreak.as_str(), "long_break");
    }
}
