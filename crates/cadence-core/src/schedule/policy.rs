//! Per-user scheduling policy and its validation.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Upper bound on `buffer_minutes`: one full day.
pub const MAX_BUFFER_MINUTES: i64 = 24 * 60;

/// Scheduling preferences resolved to concrete values.
///
/// Every field must be set by the caller; the scheduler substitutes no
/// defaults here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulingPolicy {
    pub working_hours_start: String, // HH:MM
    pub working_hours_end: String,   // HH:MM
    pub working_days: Vec<u8>,       // 0=Sun ... 6=Sat
    pub buffer_minutes: i64,
    pub max_chunk_minutes: i64,
    pub min_chunk_minutes: i64,
    pub lookahead_days: i64,
    /// Anchor instant; no candidate may start before it.
    pub current_date: DateTime<Utc>,
}

/// Parsed daily working window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkingHours {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl WorkingHours {
    /// Parse `HH:MM` bounds. The window must be non-empty and may not cross
    /// midnight.
    pub fn parse(start: &str, end: &str) -> Result<Self, ValidationError> {
        let invalid = |message: &str| ValidationError::InvalidWorkingHours {
            start: start.to_string(),
            end: end.to_string(),
            message: message.to_string(),
        };

        let start_time =
            NaiveTime::parse_from_str(start, "%H:%M").map_err(|_| invalid("start is not HH:MM"))?;
        let end_time =
            NaiveTime::parse_from_str(end, "%H:%M").map_err(|_| invalid("end is not HH:MM"))?;

        if start_time >= end_time {
            return Err(invalid("start must be before end"));
        }

        Ok(Self {
            start: start_time,
            end: end_time,
        })
    }

    /// The window on `date`, as instants.
    pub fn on(&self, date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
        (
            date.and_time(self.start).and_utc(),
            date.and_time(self.end).and_utc(),
        )
    }
}

impl SchedulingPolicy {
    /// Check every field and return the parsed working hours.
    pub fn validate(&self) -> Result<WorkingHours, ValidationError> {
        let hours = WorkingHours::parse(&self.working_hours_start, &self.working_hours_end)?;

        if let Some(day) = self.working_days.iter().find(|day| **day > 6) {
            return Err(ValidationError::invalid_value(
                "working_days",
                format!("weekday {day} is outside 0 (Sun) ..= 6 (Sat)"),
            ));
        }
        if self.buffer_minutes < 0 {
            return Err(ValidationError::invalid_value(
                "buffer_minutes",
                "must not be negative",
            ));
        }
        if self.buffer_minutes > MAX_BUFFER_MINUTES {
            return Err(ValidationError::invalid_value(
                "buffer_minutes",
                format!("must be at most {MAX_BUFFER_MINUTES}"),
            ));
        }
        if self.min_chunk_minutes <= 0 {
            return Err(ValidationError::invalid_value(
                "min_chunk_minutes",
                "must be positive",
            ));
        }
        if self.max_chunk_minutes < self.min_chunk_minutes {
            return Err(ValidationError::invalid_value(
                "max_chunk_minutes",
                format!(
                    "{} is smaller than min_chunk_minutes ({})",
                    self.max_chunk_minutes, self.min_chunk_minutes
                ),
            ));
        }
        if self.lookahead_days <= 0 {
            return Err(ValidationError::invalid_value(
                "lookahead_days",
                "must be positive",
            ));
        }

        Ok(hours)
    }

    /// Whether scheduling is allowed on `date`.
    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        let weekday = date.weekday().num_days_from_sunday() as u8;
        self.working_days.contains(&weekday)
    }
}
