//! State management module
//! 
//! This module contains the application-side owner of the timer, the
//! snapshot read model and phase-transition cue detection.

pub mod app_state;
pub mod cue;
pub mod snapshot;

// Re-export main types
pub use app_state::{AppState, StateError};
pub use cue::{Cue, PhaseTracker};
pub use snapshot::TimerSnapshot;
