//! Busy-source adapters.
//!
//! Time blocks, scheduled tasks and external calendar events arrive as
//! different records; they are flattened into [`BusyInterval`]s here so the
//! scheduler only ever sees one shape.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::task::DEFAULT_TASK_MINUTES;
use crate::timeline::BusyInterval;

/// A committed period from any upstream source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BusySource {
    /// A user-created time block
    TimeBlock {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    /// A task that already has a scheduled start
    ScheduledTask {
        start: DateTime<Utc>,
        #[serde(default)]
        end: Option<DateTime<Utc>>,
    },
    /// An event mirrored from the external calendar provider
    ExternalEvent {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        #[serde(default)]
        all_day: bool,
    },
}

impl BusySource {
    /// Normalize to a busy interval.
    ///
    /// All-day external events do not constrain hourly scheduling and yield
    /// `None`. A scheduled task without an end occupies
    /// [`DEFAULT_TASK_MINUTES`] from its start.
    pub fn to_interval(&self) -> Option<BusyInterval> {
        match self {
            BusySource::TimeBlock { start, end } => Some(BusyInterval::new(*start, *end)),
            BusySource::ScheduledTask { start, end } => {
                let end = end.unwrap_or_else(|| *start + Duration::minutes(DEFAULT_TASK_MINUTES));
                Some(BusyInterval::new(*start, end))
            }
            BusySource::ExternalEvent { all_day: true, .. } => None,
            BusySource::ExternalEvent { start, end, .. } => Some(BusyInterval::new(*start, *end)),
        }
    }
}

/// Flatten heterogeneous sources into the scheduler's busy set.
pub fn normalize_busy_sources(sources: &[BusySource]) -> Vec<BusyInterval> {
    sources.iter().filter_map(BusySource::to_interval).collect()
}
