//! Timer engine module
//!
//! This module contains the elapsed-time state machine that tracks a session
//! against its schedule.

pub mod timer_engine;

// Re-export main types
pub use timer_engine::{TimerEngine, TimerState, TimerStatus};
