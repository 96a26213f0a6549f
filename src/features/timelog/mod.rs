//! Time logs.
//!
//! Records of finished work, committed by the timer or added by hand:
//! - Storage in the local database, or in memory
//! - Per-day grouping for listings
//! - Today/week/project summaries
//! - Work-hours charts by week, month and year

pub mod chart;
pub mod memory;
pub mod record;
pub mod storage;
pub mod summary;

pub use chart::{render_bar_chart, ChartBucket, ChartPeriod, WorkHoursChart};
pub use memory::MemoryTimeLogSink;
pub use record::{TimeLogRecord, UNASSIGNED_PROJECT_ID};
pub use storage::TimeLogStorage;
pub use summary::{group_by_date, DayLogs, ProjectTime, TimeSummary, UNKNOWN_PROJECT};
