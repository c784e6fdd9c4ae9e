//! Serializable read model of a timer, as handed to presentation clients

use serde::{Deserialize, Serialize};

use crate::{
    engine::{TimerEngine, TimerStatus},
    error::TimingError,
    schedule::{RelativePeriod, Schedule, Seconds},
    utils::format_clock,
};

/// Everything a client needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub status: TimerStatus,
    pub active: bool,
    pub finished: bool,
    /// Current phase, true while in a work period
    pub working: bool,
    pub elapsed: Seconds,
    pub elapsed_relative: f64,
    pub session_duration: Seconds,
    /// Seconds left in the current period
    pub remaining: Seconds,
    pub session_remaining: Seconds,
    pub remaining_display: String,
    pub session_remaining_display: String,
    /// Elapsed periods in session units, for arcs or progress bars
    pub sequence: Vec<RelativePeriod>,
    pub schedule: Schedule,
}

impl TimerSnapshot {
    /// Read all derived values off the engine
    pub fn capture(engine: &TimerEngine) -> Result<Self, TimingError> {
        let remaining = engine.remaining();
        let session_remaining = engine.session_remaining();

        Ok(Self {
            status: engine.status(),
            active: engine.is_active(),
            finished: engine.is_finished(),
            working: engine.is_working(),
            elapsed: engine.elapsed(),
            elapsed_relative: engine.elapsed_relative()?,
            session_duration: engine.session_duration(),
            remaining,
            session_remaining,
            remaining_display: format_clock(remaining),
            session_remaining_display: format_clock(session_remaining),
            sequence: engine.session_sequence_relative()?,
            schedule: engine.schedule().clone(),
        })
    }

    /// Initial value for watch channels before the first tick
    pub fn empty() -> Self {
        Self {
            status: TimerStatus::Idle,
            active: false,
            finished: false,
            working: false,
            elapsed: 0.0,
            elapsed_relative: 0.0,
            session_duration: 0.0,
            remaining: 0.0,
            session_remaining: 0.0,
            remaining_display: format_clock(0.0),
            session_remaining_display: format_clock(0.0),
            sequence: Vec::new(),
            schedule: Schedule::default(),
        }
    }
}

impl Default for TimerSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::ScheduleBlock;
    use chrono::{TimeZone, Utc};

    #[test]
    fn captures_running_timer() {
        let schedule = Schedule::new(vec![ScheduleBlock::new(7.0, 4.0, 20.0).unwrap()]);
        let mut engine = TimerEngine::new(schedule);
        engine.resume(Utc.timestamp_opt(0, 0).unwrap());
        engine.advance(Utc.timestamp_opt(10, 0).unwrap());

        let snapshot = TimerSnapshot::capture(&engine).unwrap();
        assert_eq!(snapshot.status, TimerStatus::Running);
        assert!(!snapshot.working);
        assert_eq!(snapshot.remaining, 1.0);
        assert_eq!(snapshot.remaining_display, "0:01");
        assert_eq!(snapshot.session_remaining_display, "0:10");
        assert_eq!(snapshot.elapsed_relative, 0.5);
        assert_eq!(snapshot.sequence.len(), 2);
    }

    #[test]
    fn capture_fails_without_session() {
        let engine = TimerEngine::new(Schedule::default());
        assert_eq!(TimerSnapshot::capture(&engine), Err(TimingError::DivisionByZero));
    }

    #[test]
    fn serializes_status_in_lowercase() {
        let json = serde_json::to_value(TimerSnapshot::empty()).unwrap();
        assert_eq!(json["status"], "idle");
        assert_eq!(json["remaining_display"], "0:00");
    }
}
