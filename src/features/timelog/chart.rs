//! Work-hours chart data.
//!
//! Buckets logged time by weekday, day of month or month, and renders the
//! result as a horizontal bar chart for the terminal.

use chrono::{DateTime, Datelike, Duration, Local, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::record::TimeLogRecord;
use crate::core::{days_in_month, local_midnight};
use crate::error::QuickDevError;

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const FULL_BLOCK: char = '█';

/// Range covered by a chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartPeriod {
    /// Last 7 days, by weekday
    #[default]
    Week,
    /// Last 30 days, by day of month
    Month,
    /// Last 12 months, by month
    Year,
}

impl ChartPeriod {
    /// Human-readable range, e.g. "Last 7 days".
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Week => "Last 7 days",
            Self::Month => "Last 30 days",
            Self::Year => "Last 12 months",
        }
    }

    /// Local start of the range ending at `today`.
    fn start(self, today: NaiveDate) -> NaiveDate {
        match self {
            Self::Week => today - Duration::days(6),
            Self::Month => today - Duration::days(29),
            Self::Year => today
                .checked_sub_months(Months::new(11))
                .and_then(|d| d.with_day(1))
                .unwrap_or(today),
        }
    }
}

impl std::str::FromStr for ChartPeriod {
    type Err = QuickDevError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "week" | "w" | "7d" => Ok(Self::Week),
            "month" | "m" | "30d" => Ok(Self::Month),
            "year" | "y" | "12m" => Ok(Self::Year),
            _ => Err(QuickDevError::InvalidArgument(format!(
                "Unknown chart period '{s}', expected week, month or year"
            ))),
        }
    }
}

impl std::fmt::Display for ChartPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        };
        write!(f, "{name}")
    }
}

/// One bar of the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartBucket {
    /// `Sun`, `14` or `Mar`
    pub label: String,
    /// Logged seconds
    pub seconds: u64,
    /// Logged hours, rounded to one decimal
    pub hours: f64,
}

/// Logged hours for a period, ready to draw.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkHoursChart {
    /// Range the chart covers
    pub period: ChartPeriod,
    /// Earliest start time counted
    pub start: DateTime<Utc>,
    /// Latest start time counted
    pub end: DateTime<Utc>,
    /// One bar per weekday (Sun first), day of month or calendar month
    pub buckets: Vec<ChartBucket>,
    /// Sum of all buckets
    pub total_seconds: u64,
}

impl WorkHoursChart {
    /// Bucket `logs` for `period` as of `now`.
    ///
    /// Logs that started before the period or after `now` are ignored.
    #[must_use]
    pub fn compute(logs: &[TimeLogRecord], period: ChartPeriod, now: DateTime<Utc>) -> Self {
        let today = now.with_timezone(&Local).date_naive();
        let start = local_midnight(period.start(today))
            .map_or(now, |t| t.with_timezone(&Utc));

        let mut seconds: Vec<u64> = match period {
            ChartPeriod::Week => vec![0; WEEKDAYS.len()],
            ChartPeriod::Month => vec![0; 31],
            ChartPeriod::Year => vec![0; MONTHS.len()],
        };

        for log in logs.iter().filter(|l| l.start_time >= start && l.start_time <= now) {
            let date = log.local_date();
            let slot = match period {
                ChartPeriod::Week => date.weekday().num_days_from_sunday(),
                ChartPeriod::Month => date.day0(),
                ChartPeriod::Year => date.month0(),
            };
            if let Some(total) = usize::try_from(slot).ok().and_then(|i| seconds.get_mut(i)) {
                *total += u64::from(log.duration_seconds);
            }
        }

        if period == ChartPeriod::Month {
            // Days past the end of this month only show when last month filled them
            let shown = seconds
                .iter()
                .rposition(|&s| s > 0)
                .map_or(0, |i| i + 1)
                .max(days_in_month(today) as usize);
            seconds.truncate(shown);
        }

        let buckets: Vec<ChartBucket> = seconds
            .into_iter()
            .enumerate()
            .map(|(i, secs)| ChartBucket {
                label: match period {
                    ChartPeriod::Week => WEEKDAYS[i].to_string(),
                    ChartPeriod::Month => (i + 1).to_string(),
                    ChartPeriod::Year => MONTHS[i].to_string(),
                },
                seconds: secs,
                hours: round_hours(secs),
            })
            .collect();

        Self {
            period,
            start,
            end: now,
            total_seconds: buckets.iter().map(|b| b.seconds).sum(),
            buckets,
        }
    }

    /// Total hours, rounded to one decimal.
    #[must_use]
    pub fn total_hours(&self) -> f64 {
        round_hours(self.total_seconds)
    }

    /// Render the buckets as a horizontal bar chart.
    #[must_use]
    pub fn render(&self, bar_width: usize) -> String {
        let data: Vec<(String, f64)> = self
            .buckets
            .iter()
            .map(|b| (b.label.clone(), b.hours))
            .collect();
        let label_width = data.iter().map(|(l, _)| l.len()).max().unwrap_or(0);

        render_bar_chart(&data, label_width, bar_width)
    }
}

#[allow(clippy::cast_precision_loss)]
fn round_hours(seconds: u64) -> f64 {
    (seconds as f64 / 3600.0 * 10.0).round() / 10.0
}

/// Render `(label, hours)` pairs as horizontal bars scaled to the largest value.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn render_bar_chart(data: &[(String, f64)], label_width: usize, bar_width: usize) -> String {
    if data.is_empty() {
        return String::new();
    }

    let max_value = data.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);

    data.iter()
        .map(|(label, value)| {
            let bar_length = if max_value > 0.0 {
                ((value / max_value) * bar_width as f64).round() as usize
            } else {
                0
            };
            let bar = FULL_BLOCK.to_string().repeat(bar_length.min(bar_width));
            let padding = " ".repeat(bar_width - bar_length.min(bar_width));

            format!("{label:>label_width$} |{bar}{padding} {value:.1}h")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
