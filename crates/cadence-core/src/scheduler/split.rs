//! Greedy chunk splitting for estimates above the max chunk size.

use chrono::Duration;

use crate::timeline::TimeSlot;

/// Session size limits for a split task.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ChunkLimits {
    pub min_minutes: i64,
    pub max_minutes: i64,
    /// Spacing kept between two sessions carved from the same gap
    pub separation_minutes: i64,
}

impl ChunkLimits {
    /// Length of the next session given what is left to place and what the
    /// current gap still offers.
    ///
    /// Never leaves a remainder in `1..min_minutes`; returns `None` when the
    /// gap cannot host a compliant session.
    fn next_chunk(&self, remaining: i64, available: i64) -> Option<i64> {
        if available < self.min_minutes {
            return None;
        }

        let cap = available.min(self.max_minutes);
        if remaining <= cap {
            return Some(remaining);
        }

        let mut take = cap;
        if remaining - take < self.min_minutes {
            take = remaining - self.min_minutes;
        }
        (take >= self.min_minutes).then_some(take)
    }
}

/// Allocate `total_minutes` across `gaps` earliest-first.
///
/// Consumed gap time is never revisited. Returns `None` if the gaps run out
/// before the full estimate is placed.
pub(crate) fn allocate_sessions(
    gaps: impl IntoIterator<Item = TimeSlot>,
    total_minutes: i64,
    limits: ChunkLimits,
) -> Option<Vec<TimeSlot>> {
    let mut remaining = total_minutes;
    let mut sessions = Vec::new();

    for gap in gaps {
        let mut cursor = gap.start;
        while remaining > 0 {
            let available = (gap.end - cursor).num_minutes();
            let Some(take) = limits.next_chunk(remaining, available) else {
                break;
            };

            let session = TimeSlot::starting_at(cursor, take);
            sessions.push(session);
            remaining -= take;
            cursor = session.end + Duration::minutes(limits.separation_minutes);
        }

        if remaining == 0 {
            return Some(sessions);
        }
    }

    None
}
