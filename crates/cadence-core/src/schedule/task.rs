//! The task being placed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Duration assumed for a task (or a scheduled task's busy interval) when no
/// estimate is known.
pub const DEFAULT_TASK_MINUTES: i64 = 30;

/// Task priority as entered by the user.
///
/// Ordering is ascending urgency, so `Priority::Urgent` is the maximum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

/// A task awaiting a slot proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskToSchedule {
    pub id: String,
    #[serde(default)]
    pub priority: Priority,
    /// Estimated minutes; `None` falls back to [`DEFAULT_TASK_MINUTES`].
    #[serde(default)]
    pub estimated_minutes: Option<i64>,
    /// Hard upper bound on the end of every proposed slot.
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

impl TaskToSchedule {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            priority: Priority::default(),
            estimated_minutes: None,
            due_date: None,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_estimate(mut self, minutes: i64) -> Self {
        self.estimated_minutes = Some(minutes);
        self
    }

    pub fn with_due_date(mut self, due: DateTime<Utc>) -> Self {
        self.due_date = Some(due);
        self
    }

    /// Minutes to allocate, with the default substituted.
    pub fn duration_minutes(&self) -> i64 {
        self.estimated_minutes.unwrap_or(DEFAULT_TASK_MINUTES)
    }
}
