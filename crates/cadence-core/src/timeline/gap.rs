//! Free gap detection inside working windows.
//!
//! Subtracts a merged busy set from a window and reports the remaining
//! free spans in chronological order.

use chrono::{DateTime, Utc};

use super::interval::{BusyInterval, TimeSlot};

/// Detector for finding free gaps in a window
#[derive(Debug, Clone)]
pub struct TimeGapDetector {
    /// Minimum gap duration to report (in minutes)
    min_gap_minutes: i64,
}

impl TimeGapDetector {
    /// Create a detector that reports every gap of positive length
    pub fn new() -> Self {
        Self { min_gap_minutes: 1 }
    }

    /// Set the minimum gap duration
    pub fn with_min_gap(mut self, minutes: i64) -> Self {
        self.min_gap_minutes = minutes.max(1);
        self
    }

    /// Find free gaps inside `[window_start, window_end]`.
    ///
    /// # Arguments
    /// * `busy` - Merged busy intervals, sorted by start and non-overlapping
    /// * `window_start` - Start of the window to check
    /// * `window_end` - End of the window to check
    ///
    /// # Returns
    /// Vector of free slots sorted by start time
    pub fn find_gaps(
        &self,
        busy: &[BusyInterval],
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> Vec<TimeSlot> {
        let mut gaps = Vec::new();
        if window_end <= window_start {
            return gaps;
        }

        // Skip runs that end before the window opens
        let first = busy.partition_point(|interval| interval.end <= window_start);

        let mut cursor = window_start;
        for interval in &busy[first..] {
            if interval.start >= window_end {
                break;
            }

            if interval.start > cursor {
                self.push_gap(&mut gaps, cursor, interval.start);
            }

            if interval.end > cursor {
                cursor = interval.end.min(window_end);
            }
        }

        if cursor < window_end {
            self.push_gap(&mut gaps, cursor, window_end);
        }

        gaps
    }

    fn push_gap(&self, gaps: &mut Vec<TimeSlot>, start: DateTime<Utc>, end: DateTime<Utc>) {
        let gap = TimeSlot::new(start, end);
        if gap.duration_minutes() >= self.min_gap_minutes {
            gaps.push(gap);
        }
    }
}

impl Default for TimeGapDetector {
    fn default() -> Self {
        Self::new()
    }
}
