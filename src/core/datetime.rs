//! Date, time and duration helpers.
//!
//! Parsing for CLI input (due dates, durations) and the display formats used
//! by the timer and the reports.

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

static RELATIVE_DAYS: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^in (\d+) (day|days|week|weeks)$").ok());

static DURATION_PART: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"(\d+)([hms])").ok());

/// Parse a due date.
///
/// Supports:
/// - `today`, `tomorrow`, `yesterday`
/// - `in 3 days`, `in 2 weeks`
/// - `2024-12-15` (ISO format)
///
/// Returns `None` if the input cannot be parsed.
#[must_use]
pub fn parse_date(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let input = input.trim().to_lowercase();

    match input.as_str() {
        "today" | "tod" => return Some(today),
        "tomorrow" | "tom" => return today.succ_opt(),
        "yesterday" => return today.pred_opt(),
        _ => {}
    }

    if let Some(caps) = RELATIVE_DAYS.as_ref().and_then(|re| re.captures(&input)) {
        let n: i64 = caps.get(1)?.as_str().parse().ok()?;
        let days = if caps.get(2)?.as_str().starts_with("week") {
            n * 7
        } else {
            n
        };
        return today.checked_add_signed(Duration::days(days));
    }

    NaiveDate::parse_from_str(&input, "%Y-%m-%d").ok()
}

/// Parse a duration string like "25m", "1h30m", "90s" into seconds.
///
/// A bare number is taken as minutes.
#[must_use]
pub fn parse_duration_secs(input: &str) -> Option<u32> {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return None;
    }

    if let Ok(minutes) = input.parse::<u32>() {
        return minutes.checked_mul(60).filter(|&s| s > 0);
    }

    let re = DURATION_PART.as_ref()?;

    // Every character must belong to a `<number><unit>` pair.
    let matched: usize = re.find_iter(&input).map(|m| m.as_str().len()).sum();
    if matched != input.len() {
        return None;
    }

    let mut total: u32 = 0;
    for caps in re.captures_iter(&input) {
        let n: u32 = caps.get(1)?.as_str().parse().ok()?;
        let factor = match caps.get(2)?.as_str() {
            "h" => 3600,
            "m" => 60,
            _ => 1,
        };
        total = total.checked_add(n.checked_mul(factor)?)?;
    }

    (total > 0).then_some(total)
}

/// Parse a start time: RFC 3339, or `YYYY-MM-DD HH:MM` in local time.
#[must_use]
pub fn parse_datetime(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }

    let naive = chrono::NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M").ok()?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Format seconds as `MM:SS`. Minutes are not wrapped into hours.
#[must_use]
pub fn format_mmss(seconds: u32) -> String {
    let minutes = seconds / 60;
    let seconds = seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

/// Format seconds as a compact span: `2h 05m`, `12m 30s`, `45s`.
#[must_use]
pub fn format_hms(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{hours}h {minutes:02}m")
    } else if minutes > 0 {
        format!("{minutes}m {secs:02}s")
    } else {
        format!("{secs}s")
    }
}

/// Start of the local week containing `now`: the preceding Sunday at 00:00.
#[must_use]
pub fn start_of_week(now: DateTime<Local>) -> DateTime<Local> {
    let days_from_sunday = i64::from(now.weekday().num_days_from_sunday());
    let sunday = now.date_naive() - Duration::days(days_from_sunday);
    local_midnight(sunday).unwrap_or(now)
}

/// Local midnight at the start of `date`.
#[must_use]
pub fn local_midnight(date: NaiveDate) -> Option<DateTime<Local>> {
    Local
        .from_local_datetime(&date.and_time(NaiveTime::MIN))
        .earliest()
}

/// Number of days in the month containing `date`.
#[must_use]
pub fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };

    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.pred_opt())
        .map_or(31, |last| last.day())
}
