//! Interval arithmetic for the scheduler.
//!
//! This module provides:
//! - Busy interval and slot primitives
//! - Buffer-aware merging of busy sets
//! - Free gap detection inside working windows

mod gap;
mod interval;

pub use gap::TimeGapDetector;
pub use interval::{merge_intervals, BusyInterval, TimeSlot};
