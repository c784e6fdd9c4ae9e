//! Phase-transition edge detection for audio cues

use serde::{Deserialize, Serialize};

use crate::engine::TimerEngine;

/// A transition worth announcing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cue {
    /// A work period started
    Work,
    /// A rest period started
    Rest,
    /// The session ran to completion
    End,
}

impl Cue {
    /// Name of the sound a client should play
    pub fn sound(&self) -> &'static str {
        match self {
            Cue::Work => "alert",
            Cue::Rest => "bell",
            Cue::End => "gong",
        }
    }
}

/// Remembers the previous tick so transitions can be detected
#[derive(Debug, Clone, Default)]
pub struct PhaseTracker {
    was_active: bool,
    // Starts false so the first work period registers
    was_working: bool,
}

impl PhaseTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare the engine against the last observation.
    ///
    /// At most one cue per call; session completion wins over a phase
    /// change.
    pub fn observe(&mut self, engine: &TimerEngine) -> Option<Cue> {
        let active = engine.is_active();
        let working = engine.is_working();
        let was_active = std::mem::replace(&mut self.was_active, active);
        let was_working = std::mem::replace(&mut self.was_working, working);

        if was_active && !active && engine.is_finished() {
            Some(Cue::End)
        } else if working && !was_working {
            Some(Cue::Work)
        } else if !working && was_working {
            Some(Cue::Rest)
        } else {
            None
        }
    }
}
