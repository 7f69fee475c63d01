//! # Cadence Core Library
//!
//! This library provides the task auto-scheduling engine behind Cadence.
//! Given a task, the user's scheduling policy and a snapshot of busy time,
//! it proposes the earliest slot (or split sessions) that fits inside working
//! hours. It never persists anything: front ends decide whether to apply a
//! proposal.
//!
//! ## Architecture
//!
//! - **Scheduler**: Pure availability search with buffer, chunking and
//!   due-date constraints
//! - **Timeline**: Interval merging and free gap detection
//! - **Schedule**: Task and policy inputs plus busy-source adapters
//! - **Storage**: TOML-based configuration of scheduling defaults
//!
//! ## Key Components
//!
//! - [`AvailabilityScheduler`]: Scheduler bound to one validated policy
//! - [`propose_slot`]: One-shot proposal for a single task
//! - [`SchedulingPolicy`]: Working hours, days, buffer and chunk limits
//! - [`Config`]: Application configuration management

pub mod error;
pub mod schedule;
pub mod scheduler;
pub mod storage;
pub mod timeline;

pub use error::{ConfigError, CoreError, ScheduleError, ValidationError};
pub use schedule::{
    normalize_busy_sources, BusySource, PolicyOverrides, Priority, ScheduleRequest,
    SchedulingPolicy, TaskToSchedule, DEFAULT_TASK_MINUTES, MAX_BUFFER_MINUTES,
};
pub use scheduler::{
    list_free_slots, plan_batch, propose_candidates, propose_slot, AvailabilityScheduler,
    BatchProposal, NoSlotReason, SchedulingResult,
};
pub use storage::Config;
pub use timeline::{merge_intervals, BusyInterval, TimeSlot};
