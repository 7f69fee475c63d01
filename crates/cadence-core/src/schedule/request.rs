//! JSON request envelope accepted by front ends.

use std::io::Read;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::policy::SchedulingPolicy;
use super::source::{normalize_busy_sources, BusySource};
use super::task::TaskToSchedule;
use crate::error::CoreError;
use crate::timeline::BusyInterval;

/// Per-request overrides layered on top of the configured policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyOverrides {
    #[serde(default)]
    pub working_hours_start: Option<String>,
    #[serde(default)]
    pub working_hours_end: Option<String>,
    #[serde(default)]
    pub working_days: Option<Vec<u8>>,
    #[serde(default)]
    pub buffer_minutes: Option<i64>,
    #[serde(default)]
    pub max_chunk_minutes: Option<i64>,
    #[serde(default)]
    pub min_chunk_minutes: Option<i64>,
    #[serde(default)]
    pub lookahead_days: Option<i64>,
    #[serde(default)]
    pub current_date: Option<DateTime<Utc>>,
}

impl PolicyOverrides {
    /// Replace every field of `base` that this override sets.
    pub fn apply(&self, base: SchedulingPolicy) -> SchedulingPolicy {
        SchedulingPolicy {
            working_hours_start: self
                .working_hours_start
                .clone()
                .unwrap_or(base.working_hours_start),
            working_hours_end: self
                .working_hours_end
                .clone()
                .unwrap_or(base.working_hours_end),
            working_days: self.working_days.clone().unwrap_or(base.working_days),
            buffer_minutes: self.buffer_minutes.unwrap_or(base.buffer_minutes),
            max_chunk_minutes: self.max_chunk_minutes.unwrap_or(base.max_chunk_minutes),
            min_chunk_minutes: self.min_chunk_minutes.unwrap_or(base.min_chunk_minutes),
            lookahead_days: self.lookahead_days.unwrap_or(base.lookahead_days),
            current_date: self.current_date.unwrap_or(base.current_date),
        }
    }
}

/// A scheduling request: one task (or several for batch planning) plus the
/// busy snapshot to schedule around.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleRequest {
    #[serde(default)]
    pub task: Option<TaskToSchedule>,
    #[serde(default)]
    pub tasks: Vec<TaskToSchedule>,
    #[serde(default)]
    pub busy: Vec<BusySource>,
    #[serde(default)]
    pub policy: PolicyOverrides,
}

impl ScheduleRequest {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read a JSON request from any reader (file, stdin).
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, CoreError> {
        let mut json = String::new();
        reader.read_to_string(&mut json)?;
        Ok(Self::from_json(&json)?)
    }

    pub fn busy_intervals(&self) -> Vec<BusyInterval> {
        normalize_busy_sources(&self.busy)
    }

    /// Every task in the request: the single `task` first, then `tasks`.
    pub fn all_tasks(&self) -> Vec<TaskToSchedule> {
        self.task.iter().chain(self.tasks.iter()).cloned().collect()
    }
}
