//! Availability scheduler.
//!
//! Finds free time for a task inside the user's working hours:
//! - Merges busy intervals after padding them by the buffer
//! - Walks eligible working days up to the lookahead horizon
//! - Places the task in the earliest gap that fits, or splits long
//!   estimates into sessions
//! - Never places anything past the task's due date
//!
//! Every operation is a pure function of its inputs. The result is a
//! proposal; persisting it is the caller's decision.

mod batch;
mod result;
mod split;

pub use batch::BatchProposal;
pub use result::{NoSlotReason, SchedulingResult};

use std::iter::successors;

use chrono::{DateTime, Days, Duration, NaiveDate, Timelike, Utc};
use tracing::{debug, trace};

use crate::error::{ScheduleError, ValidationError};
use crate::schedule::{SchedulingPolicy, TaskToSchedule, WorkingHours};
use crate::timeline::{merge_intervals, BusyInterval, TimeGapDetector, TimeSlot};
use split::{allocate_sessions, ChunkLimits};

/// Scheduler bound to one validated policy.
#[derive(Debug, Clone)]
pub struct AvailabilityScheduler {
    policy: SchedulingPolicy,
    hours: WorkingHours,
}

/// Working windows to search, produced lazily in chronological order.
struct SearchSpace {
    policy: SchedulingPolicy,
    hours: WorkingHours,
    anchor: DateTime<Utc>,
    due: Option<DateTime<Utc>>,
}

impl SearchSpace {
    fn windows(self) -> impl Iterator<Item = TimeSlot> {
        let SearchSpace {
            policy,
            hours,
            anchor,
            due,
        } = self;
        let first_day = anchor.date_naive();

        (0..policy.lookahead_days)
            .map_while(move |offset| first_day.checked_add_days(Days::new(offset as u64)))
            // Later days open even further past the due date
            .take_while(move |date| due.map_or(true, |due| hours.on(*date).0 < due))
            .filter(move |date| policy.is_working_day(*date))
            .filter_map(move |date| {
                let (open, close) = hours.on(date);
                let start = open.max(anchor);
                let end = due.map_or(close, |due| close.min(due));
                (start < end).then(|| {
                    trace!(%date, %start, %end, "working window");
                    TimeSlot::new(start, end)
                })
            })
    }

    fn gaps(
        self,
        busy: &[BusyInterval],
        min_gap_minutes: i64,
    ) -> impl Iterator<Item = TimeSlot> + '_ {
        let detector = TimeGapDetector::new().with_min_gap(min_gap_minutes);
        self.windows()
            .flat_map(move |window| detector.find_gaps(busy, window.start, window.end))
    }

    /// Close of the last working window inside the horizon.
    fn horizon_end(&self) -> DateTime<Utc> {
        let first_day = self.anchor.date_naive();
        let last_offset = (self.policy.lookahead_days - 1).max(0) as u64;
        let last_day = first_day
            .checked_add_days(Days::new(last_offset))
            .unwrap_or(NaiveDate::MAX);

        // Any seven consecutive days cover every weekday
        successors(Some(last_day), |day| day.pred_opt())
            .take(7)
            .take_while(|day| *day >= first_day)
            .find(|day| self.policy.is_working_day(*day))
            .map_or(self.anchor, |day| self.hours.on(day).1.max(self.anchor))
    }

    fn exhausted_reason(&self) -> NoSlotReason {
        if self.due.is_some_and(|due| due < self.horizon_end()) {
            NoSlotReason::DeadlineUnreachable
        } else {
            NoSlotReason::HorizonExhausted
        }
    }
}

impl AvailabilityScheduler {
    /// Create a scheduler, validating the policy.
    pub fn new(policy: SchedulingPolicy) -> Result<Self, ScheduleError> {
        let hours = policy.validate()?;
        Ok(Self { policy, hours })
    }

    /// The validated policy this scheduler applies.
    pub fn policy(&self) -> &SchedulingPolicy {
        &self.policy
    }

    /// Propose a slot (or split sessions) for `task`.
    ///
    /// # Arguments
    /// * `task` - Task to place
    /// * `busy` - Busy snapshot; may be unsorted or overlapping
    ///
    /// # Returns
    /// The earliest feasible placement, or `NoSlot` with the reason
    pub fn propose(
        &self,
        task: &TaskToSchedule,
        busy: &[BusyInterval],
    ) -> Result<SchedulingResult, ScheduleError> {
        let minutes = validated_estimate(task)?;
        let merged = self.merged_busy(busy)?;

        if self.policy.working_days.is_empty() {
            debug!(task_id = %task.id, "no working days configured");
            return Ok(SchedulingResult::NoSlot {
                reason: NoSlotReason::NoWorkingDays,
            });
        }

        let search = self.search_space(task.due_date);
        let exhausted = search.exhausted_reason();

        let result = if minutes <= self.policy.max_chunk_minutes {
            search
                .gaps(&merged, 1)
                .find(|gap| gap.can_fit(minutes))
                .map(|gap| SchedulingResult::Slot(TimeSlot::starting_at(gap.start, minutes)))
        } else {
            let limits = ChunkLimits {
                min_minutes: self.policy.min_chunk_minutes,
                max_minutes: self.policy.max_chunk_minutes,
                separation_minutes: self.policy.buffer_minutes,
            };
            allocate_sessions(search.gaps(&merged, limits.min_minutes), minutes, limits)
                .map(|sessions| SchedulingResult::Sessions { sessions })
        };

        let result = result.unwrap_or(SchedulingResult::NoSlot { reason: exhausted });

        match &result {
            SchedulingResult::NoSlot { reason } => {
                debug!(task_id = %task.id, minutes, ?reason, "no slot found")
            }
            found => debug!(
                task_id = %task.id,
                minutes,
                sessions = found.slots().len(),
                "slot proposed"
            ),
        }

        Ok(result)
    }

    /// Up to `limit` single-slot candidates, earliest first, one per free gap.
    ///
    /// Chunking limits are not applied; each candidate holds the whole
    /// estimate.
    pub fn candidates(
        &self,
        task: &TaskToSchedule,
        busy: &[BusyInterval],
        limit: usize,
    ) -> Result<Vec<TimeSlot>, ScheduleError> {
        let minutes = validated_estimate(task)?;
        let merged = self.merged_busy(busy)?;
        Ok(self
            .search_space(task.due_date)
            .gaps(&merged, minutes)
            .map(|gap| TimeSlot::starting_at(gap.start, minutes))
            .take(limit)
            .collect())
    }

    /// All free gaps within working hours over the lookahead horizon.
    ///
    /// Gaps are measured against the buffer-padded busy set.
    pub fn free_slots(&self, busy: &[BusyInterval]) -> Result<Vec<TimeSlot>, ScheduleError> {
        let merged = self.merged_busy(busy)?;
        Ok(self.search_space(None).gaps(&merged, 1).collect())
    }

    /// Propose slots for several tasks.
    ///
    /// Tasks are placed most urgent first; each found proposal is added to
    /// the busy snapshot before the next task is placed. Results are returned
    /// in placement order.
    pub fn plan_batch(
        &self,
        tasks: &[TaskToSchedule],
        busy: &[BusyInterval],
    ) -> Result<Vec<BatchProposal>, ScheduleError> {
        let mut ordered: Vec<&TaskToSchedule> = tasks.iter().collect();
        ordered.sort_by(|a, b| batch::placement_order(a, b));

        let mut snapshot = busy.to_vec();
        let mut proposals = Vec::with_capacity(ordered.len());

        for task in ordered {
            debug!(task_id = %task.id, priority = task.priority.as_str(), "placing batch task");
            let result = self.propose(task, &snapshot)?;
            snapshot.extend(result.slots().iter().copied().map(BusyInterval::from));
            proposals.push(BatchProposal {
                task_id: task.id.clone(),
                result,
            });
        }

        Ok(proposals)
    }

    fn merged_busy(&self, busy: &[BusyInterval]) -> Result<Vec<BusyInterval>, ScheduleError> {
        if let Some(bad) = busy.iter().find(|interval| interval.start > interval.end) {
            return Err(ValidationError::InvalidTimeRange {
                start: bad.start,
                end: bad.end,
            });
        }
        Ok(merge_intervals(busy, self.policy.buffer_minutes))
    }

    fn search_space(&self, due: Option<DateTime<Utc>>) -> SearchSpace {
        SearchSpace {
            policy: self.policy.clone(),
            hours: self.hours,
            anchor: ceil_to_minute(self.policy.current_date),
            due,
        }
    }
}

fn validated_estimate(task: &TaskToSchedule) -> Result<i64, ScheduleError> {
    let minutes = task.duration_minutes();
    if minutes <= 0 {
        return Err(ValidationError::invalid_value(
            "estimated_minutes",
            format!("task '{}' has non-positive estimate {minutes}", task.id),
        ));
    }
    Ok(minutes)
}

/// Round up to a whole minute; the scheduler works at minute granularity.
fn ceil_to_minute(instant: DateTime<Utc>) -> DateTime<Utc> {
    let floored = instant
        .with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(instant);
    if floored < instant {
        floored + Duration::minutes(1)
    } else {
        floored
    }
}

/// Propose a slot for `task` under `policy`.
pub fn propose_slot(
    task: &TaskToSchedule,
    policy: &SchedulingPolicy,
    busy: &[BusyInterval],
) -> Result<SchedulingResult, ScheduleError> {
    AvailabilityScheduler::new(policy.clone())?.propose(task, busy)
}

/// Up to `limit` ranked single-slot candidates for `task`.
pub fn propose_candidates(
    task: &TaskToSchedule,
    policy: &SchedulingPolicy,
    busy: &[BusyInterval],
    limit: usize,
) -> Result<Vec<TimeSlot>, ScheduleError> {
    AvailabilityScheduler::new(policy.clone())?.candidates(task, busy, limit)
}

/// Free working time over the lookahead horizon.
pub fn list_free_slots(
    policy: &SchedulingPolicy,
    busy: &[BusyInterval],
) -> Result<Vec<TimeSlot>, ScheduleError> {
    AvailabilityScheduler::new(policy.clone())?.free_slots(busy)
}

/// Proposals for several tasks, placed most urgent first.
pub fn plan_batch(
    tasks: &[TaskToSchedule],
    policy: &SchedulingPolicy,
    busy: &[BusyInterval],
) -> Result<Vec<BatchProposal>, ScheduleError> {
    AvailabilityScheduler::new(policy.clone())?.plan_batch(tasks, busy)
}
