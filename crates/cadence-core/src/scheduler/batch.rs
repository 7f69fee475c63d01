//! Batch planning: proposals for several tasks against one busy snapshot.

use std::cmp::{Ordering, Reverse};

use serde::{Deserialize, Serialize};

use super::result::SchedulingResult;
use crate::schedule::TaskToSchedule;

/// Proposal for one task of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchProposal {
    pub task_id: String,
    pub result: SchedulingResult,
}

/// Order tasks for placement: most urgent priority first, then earliest due
/// date (undated last), then id for a stable result.
pub(crate) fn placement_order(a: &TaskToSchedule, b: &TaskToSchedule) -> Ordering {
    Reverse(a.priority)
        .cmp(&Reverse(b.priority))
        .then_with(|| match (a.due_date, b.due_date) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| a.id.cmp(&b.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::Priority;
    use chrono::{TimeZone, Utc};

    #[test]
    fn orders_by_priority_then_due_date_then_id() {
        let due = |day| Utc.with_ymd_and_hms(2026, 3, day, 12, 0, 0).unwrap();
        let mut tasks = vec![
            TaskToSchedule::new("b").with_priority(Priority::Medium),
            TaskToSchedule::new("late").with_priority(Priority::High).with_due_date(due(5)),
            TaskToSchedule::new("a").with_priority(Priority::Medium),
            TaskToSchedule::new("undated").with_priority(Priority::High),
            TaskToSchedule::new("soon").with_priority(Priority::High).with_due_date(due(3)),
            TaskToSchedule::new("fire").with_priority(Priority::Urgent),
            TaskToSchedule::new("later").with_priority(Priority::Low),
        ];

        tasks.sort_by(placement_order);

        let ids: Vec<_> = tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["fire", "soon", "late", "undated", "a", "b", "later"]);
    }
}
