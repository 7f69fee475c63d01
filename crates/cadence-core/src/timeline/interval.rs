//! Interval primitives and busy-set normalization.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A committed time range the scheduler must avoid.
///
/// Every busy source (time blocks, scheduled tasks, external events) is
/// reduced to this shape before it reaches the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl BusyInterval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// True for zero-length (or inverted) intervals.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Check if this interval overlaps with a time range
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start < end && self.end > start
    }

    /// Expand the interval by `minutes` on each side, saturating at the
    /// representable range.
    pub fn padded(&self, minutes: i64) -> Self {
        let pad = Duration::try_minutes(minutes);
        Self {
            start: pad
                .and_then(|pad| self.start.checked_sub_signed(pad))
                .unwrap_or(DateTime::<Utc>::MIN_UTC),
            end: pad
                .and_then(|pad| self.end.checked_add_signed(pad))
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }
}

/// A proposed (or free) span of time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeSlot {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Slot of `minutes` length starting at `start`.
    pub fn starting_at(start: DateTime<Utc>, minutes: i64) -> Self {
        Self {
            start,
            end: start + Duration::minutes(minutes),
        }
    }

    /// Get duration in minutes
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Check if this slot can fit a task of given duration
    pub fn can_fit(&self, minutes: i64) -> bool {
        self.duration_minutes() >= minutes
    }

    pub fn overlaps(&self, other: &BusyInterval) -> bool {
        other.overlaps(self.start, self.end)
    }
}

impl From<TimeSlot> for BusyInterval {
    fn from(slot: TimeSlot) -> Self {
        BusyInterval::new(slot.start, slot.end)
    }
}

/// Merge busy intervals into a sorted, non-overlapping list.
///
/// Each interval is padded by `buffer_minutes` before merging so the buffer
/// holds transitively between neighbours. Touching runs are folded together;
/// zero-length entries are dropped before padding.
pub fn merge_intervals(intervals: &[BusyInterval], buffer_minutes: i64) -> Vec<BusyInterval> {
    let mut padded: Vec<BusyInterval> = intervals
        .iter()
        .filter(|interval| !interval.is_empty())
        .map(|interval| interval.padded(buffer_minutes))
        .collect();
    padded.sort_by_key(|interval| interval.start);

    let mut merged: Vec<BusyInterval> = Vec::with_capacity(padded.len());
    for interval in padded {
        match merged.last_mut() {
            Some(last) if interval.start <= last.end => {
                if interval.end > last.end {
                    last.end = interval.end;
                }
            }
            _ => merged.push(interval),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, hour, minute, 0).unwrap()
    }

    #[test]
    fn merge_folds_overlapping_and_unsorted_input() {
        let intervals = vec![
            BusyInterval::new(at(13, 0), at(14, 0)),
            BusyInterval::new(at(9, 0), at(10, 30)),
            BusyInterval::new(at(10, 0), at(11, 0)),
        ];

        let merged = merge_intervals(&intervals, 0);

        assert_eq!(
            merged,
            vec![
                BusyInterval::new(at(9, 0), at(11, 0)),
                BusyInterval::new(at(13, 0), at(14, 0)),
            ]
        );
    }

    #[test]
    fn merge_folds_touching_intervals() {
        let intervals = vec![
            BusyInterval::new(at(9, 0), at(10, 0)),
            BusyInterval::new(at(10, 0), at(11, 0)),
        ];

        let merged = merge_intervals(&intervals, 0);
        assert_eq!(merged, vec![BusyInterval::new(at(9, 0), at(11, 0))]);
    }

    #[test]
    fn merge_applies_buffer_before_folding() {
        // 20 minutes apart: separate without buffer, one run with a 15 minute buffer
        let intervals = vec![
            BusyInterval::new(at(9, 0), at(10, 0)),
            BusyInterval::new(at(10, 20), at(11, 0)),
        ];

        assert_eq!(merge_intervals(&intervals, 0).len(), 2);
        assert_eq!(
            merge_intervals(&intervals, 15),
            vec![BusyInterval::new(at(8, 45), at(11, 15))]
        );
    }

    #[test]
    fn merge_drops_zero_length_entries() {
        let intervals = vec![
            BusyInterval::new(at(9, 0), at(9, 0)),
            BusyInterval::new(at(12, 0), at(13, 0)),
        ];

        let merged = merge_intervals(&intervals, 30);
        assert_eq!(merged, vec![BusyInterval::new(at(11, 30), at(13, 30))]);
    }

    #[test]
    fn merge_keeps_contained_interval_inside_run() {
        let intervals = vec![
            BusyInterval::new(at(9, 0), at(12, 0)),
            BusyInterval::new(at(10, 0), at(11, 0)),
            BusyInterval::new(at(9, 0), at(12, 0)),
        ];

        assert_eq!(
            merge_intervals(&intervals, 0),
            vec![BusyInterval::new(at(9, 0), at(12, 0))]
        );
    }

    #[test]
    fn padding_saturates_instead_of_overflowing() {
        let interval = BusyInterval::new(at(9, 0), at(10, 0));

        let padded = interval.padded(1_000_000_000_000);
        assert_eq!(padded.start, DateTime::<Utc>::MIN_UTC);
        assert_eq!(padded.end, DateTime::<Utc>::MAX_UTC);

        let padded = interval.padded(i64::MAX);
        assert_eq!(padded.start, DateTime::<Utc>::MIN_UTC);
        assert_eq!(padded.end, DateTime::<Utc>::MAX_UTC);
    }

    #[test]
    fn slot_overlap_is_half_open() {
        let slot = TimeSlot::new(at(10, 0), at(11, 0));
        assert!(!slot.overlaps(&BusyInterval::new(at(11, 0), at(12, 0))));
        assert!(slot.overlaps(&BusyInterval::new(at(10, 59), at(12, 0))));
    }
}
