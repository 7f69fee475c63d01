use serde::{Deserialize, Serialize};

use crate::timeline::TimeSlot;

/// Why no proposal could be made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoSlotReason {
    /// The policy has no eligible weekday
    NoWorkingDays,
    /// Free time exists in the horizon but not before the task's due date
    DeadlineUnreachable,
    /// The lookahead horizon holds too little free time
    HorizonExhausted,
}

impl NoSlotReason {
    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            NoSlotReason::NoWorkingDays => "No working days are configured",
            NoSlotReason::DeadlineUnreachable => "Not enough free time before the due date",
            NoSlotReason::HorizonExhausted => "Not enough free time within the lookahead window",
        }
    }
}

/// Outcome of a scheduling request.
///
/// Always a proposal: nothing is persisted by producing one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SchedulingResult {
    /// One contiguous slot
    Slot(TimeSlot),
    /// Ordered sessions whose lengths sum to the estimate
    Sessions { sessions: Vec<TimeSlot> },
    /// No feasible placement
    NoSlot { reason: NoSlotReason },
}

impl SchedulingResult {
    pub fn is_found(&self) -> bool {
        !matches!(self, SchedulingResult::NoSlot { .. })
    }

    /// Proposed slots in chronological order; empty when nothing was found.
    pub fn slots(&self) -> &[TimeSlot] {
        match self {
            SchedulingResult::Slot(slot) => std::slice::from_ref(slot),
            SchedulingResult::Sessions { sessions } => sessions,
            SchedulingResult::NoSlot { .. } => &[],
        }
    }

    pub fn total_minutes(&self) -> i64 {
        self.slots().iter().map(TimeSlot::duration_minutes).sum()
    }

    pub fn no_slot_reason(&self) -> Option<NoSlotReason> {
        match self {
            SchedulingResult::NoSlot { reason } => Some(*reason),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn slot_serializes_with_outcome_tag() {
        let start = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
        let result = SchedulingResult::Slot(TimeSlot::starting_at(start, 60));

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["outcome"], "slot");
        assert_eq!(json["start"], "2026-03-02T09:00:00Z");
        assert_eq!(json["end"], "2026-03-02T10:00:00Z");
    }

    #[test]
    fn no_slot_has_no_slots() {
        let result = SchedulingResult::NoSlot {
            reason: NoSlotReason::HorizonExhausted,
        };
        assert!(!result.is_found());
        assert!(result.slots().is_empty());
        assert_eq!(result.total_minutes(), 0);

        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"outcome":"no_slot","reason":"horizon_exhausted"}"#);
    }

    #[test]
    fn sessions_report_total_minutes() {
        let start = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
        let result = SchedulingResult::Sessions {
            sessions: vec![
                TimeSlot::starting_at(start, 120),
                TimeSlot::starting_at(start + chrono::Duration::hours(3), 60),
            ],
        };
        assert_eq!(result.total_minutes(), 180);
        assert_eq!(result.slots().len(), 2);
    }
}
