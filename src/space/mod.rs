//! Space accounting and profiling
//!
//! Tracks replay buffer occupancy to verify that repeated mark/reset
//! cycles stay bounded

mod tracker;

pub use tracker::SpaceTracker;

/// Detailed buffer profile (if enabled)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BufferProfile {
    /// Maximum number of items buffered at once
    pub max_buffered: usize,

    /// Buffer size after each reset
    pub timeline: Vec<(usize, usize)>, // (reset_number, buffered)

    /// Number of `mark` calls
    pub marks: usize,
    /// Number of successful `reset` calls
    pub resets: usize,
    /// Number of successful `clear_mark` calls
    pub cleared_marks: usize,
    /// Items handed out from the buffer rather than the source
    pub replayed: usize,
    /// Items released from the buffer
    pub trimmed: usize,
}

impl BufferProfile {
    /// Verify bound is satisfied
    pub fn satisfies_bound(&self, bound: usize) -> bool {
        self.max_buffered <= bound
    }

    /// Generate report
    pub fn report(&self) -> String {
        format!(
            "Max buffered: {} items\nOperations:\n  Marks: {}\n  Resets: {}\n  Cleared: {}\nItems:\n  Replayed: {}\n  Trimmed: {}",
            self.max_buffered,
            self.marks,
            self.resets,
            self.cleared_marks,
            self.replayed,
            self.trimmed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_lists_counters() {
        let profile = BufferProfile {
            max_buffered: 12,
            marks: 3,
            resets: 2,
            replayed: 7,
            ..BufferProfile::default()
        };
        let report = profile.report();
        assert!(report.starts_with("Max buffered: 12 items"));
        assert!(report.contains("Resets: 2"));
        assert!(report.contains("Replayed: 7"));
        assert!(profile.satisfies_bound(12));
        assert!(!profile.satisfies_bound(11));
    }
}
