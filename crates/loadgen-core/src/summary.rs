//! Run accounting: live counters and the final summary.

use serde::{Deserialize, Serialize};

/// Records and bytes handed to the destination so far.
///
/// Owned by one sink for one run; both fields only ever grow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters {
    pub records_written: u64,
    pub bytes_written: u64,
}

impl Counters {
    /// Account for one transmitted record of `bytes` bytes.
    pub fn record(&mut self, bytes: u64) {
        self.records_written += 1;
        self.bytes_written += bytes;
    }
}

/// Expected-vs-actual outcome of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Records transmitted, including injected duplicates
    pub records_sent: u64,
    /// Payload bytes transmitted
    pub bytes_sent: u64,
    /// Rows the destination should hold once dedupe (if any) has applied
    pub expected_records_after_dedup: u64,
}

impl Summary {
    /// Summary of an append run: every transmitted record is expected downstream.
    pub fn append(counters: Counters) -> Self {
        Self {
            records_sent: counters.records_written,
            bytes_sent: counters.bytes_written,
            expected_records_after_dedup: counters.records_written,
        }
    }

    /// Summary of a dedupe run over `distinct_records` distinct keys.
    pub fn dedupe(counters: Counters, distinct_records: u64) -> Self {
        Self {
            records_sent: counters.records_written,
            bytes_sent: counters.bytes_written,
            expected_records_after_dedup: distinct_records.min(counters.records_written),
        }
    }

    /// Records the destination is expected to collapse away.
    pub fn duplicates(&self) -> u64 {
        self.records_sent - self.expected_records_after_dedup
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_accumulate() {
        let mut counters = Counters::default();
        counters.record(10);
        counters.record(5);
        assert_eq!(counters.records_written, 2);
        assert_eq!(counters.bytes_written, 15);
    }

    #[test]
    fn test_append_summary_expects_everything() {
        let counters = Counters {
            records_written: 12,
            bytes_written: 340,
        };
        let summary = Summary::append(counters);
        assert_eq!(summary.records_sent, 12);
        assert_eq!(summary.bytes_sent, 340);
        assert_eq!(summary.expected_records_after_dedup, 12);
        assert_eq!(summary.duplicates(), 0);
    }

    #[test]
    fn test_dedupe_summary_expects_distinct() {
        let counters = Counters {
            records_written: 12,
            bytes_written: 340,
        };
        let summary = Summary::dedupe(counters, 10);
        assert_eq!(summary.expected_records_after_dedup, 10);
        assert_eq!(summary.duplicates(), 2);
    }
}
