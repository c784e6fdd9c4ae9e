//! Schedule module
//!
//! This module contains the declarative work/rest schedule and the pure
//! expansion of a schedule into concrete periods.

pub mod block;
pub mod expander;

// Re-export main types
pub use block::{Schedule, ScheduleBlock, ScheduleError, Seconds};
pub use expander::{expand, expand_relative, Period, RelativePeriod};
