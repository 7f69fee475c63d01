//! Scheduler input types: the task to place, the user's policy, and the
//! adapters that turn upstream records into busy intervals.

mod policy;
mod request;
mod source;
mod task;

pub use policy::{SchedulingPolicy, WorkingHours, MAX_BUFFER_MINUTES};
pub use request::{PolicyOverrides, ScheduleRequest};
pub use source::{normalize_busy_sources, BusySource};
pub use task::{Priority, TaskToSchedule, DEFAULT_TASK_MINUTES};
