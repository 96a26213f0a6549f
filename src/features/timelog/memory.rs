//! In-memory time-log sink.

use std::cell::RefCell;

use super::record::TimeLogRecord;
use crate::core::TimeLogSink;
use crate::error::QuickDevError;

/// Keeps committed records in memory, oldest first.
#[derive(Debug, Default)]
pub struct MemoryTimeLogSink {
    records: RefCell<Vec<TimeLogRecord>>,
}

impl MemoryTimeLogSink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the stored records.
    #[must_use]
    pub fn records(&self) -> Vec<TimeLogRecord> {
        self.records.borrow().clone()
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }
}

impl TimeLogSink for MemoryTimeLogSink {
    fn record(&self, record: &TimeLogRecord) -> Result<(), QuickDevError> {
        self.records.borrow_mut().push(record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_memory_sink_keeps_order() {
        let sink = MemoryTimeLogSink::new();
        assert!(sink.is_empty());

        let first = TimeLogRecord::ending_at("p1", None, Utc::now(), 10, "a").unwrap();
        let second = TimeLogRecord::ending_at("p2", None, Utc::now(), 20, "b").unwrap();
        sink.record(&first).unwrap();
        sink.record(&second).unwrap();

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.records(), vec![first, second]);
    }
}
