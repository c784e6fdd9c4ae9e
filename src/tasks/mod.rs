//! Background tasks module
//! 
//! This module contains background tasks that run alongside the HTTP server.

pub mod cue_announcer;
pub mod ticker;

// Re-export main functions
pub use cue_announcer::cue_announcer_task;
pub use ticker::ticker_task;
