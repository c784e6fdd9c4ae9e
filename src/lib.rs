//! Interval Timer - A work/rest interval-training timer
//!
//! This library expands declarative work/rest schedules into concrete
//! periods, tracks elapsed session time across pauses, and serves the
//! derived values to presentation clients over HTTP.

pub mod config;
pub mod error;
pub mod schedule;
pub mod engine;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::TimingError;
pub use schedule::{Period, RelativePeriod, Schedule, ScheduleBlock, ScheduleError};
pub use engine::{TimerEngine, TimerStatus};
pub use state::AppState;
pub use api::create_router;
pub use utils::signals::shutdown_signal;
