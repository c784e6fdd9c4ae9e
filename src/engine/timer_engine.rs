//! Elapsed-time state machine for an interval session

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    error::TimingError,
    schedule::{expand, expand_relative, Period, RelativePeriod, Schedule, Seconds},
};

/// Where the timer is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    Idle,
    Running,
    Paused,
    Finished,
}

impl TimerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerStatus::Idle => "idle",
            TimerStatus::Running => "running",
            TimerStatus::Paused => "paused",
            TimerStatus::Finished => "finished",
        }
    }
}

/// Mutable root of a timer, owned by exactly one [`TimerEngine`]
#[derive(Debug, Clone, PartialEq)]
pub struct TimerState {
    /// Whether elapsed time is accruing
    pub active: bool,
    /// Session seconds elapsed, excluding paused intervals
    pub elapsed: Seconds,
    /// Last reconciliation point, only meaningful while active
    pub last_update: Option<DateTime<Utc>>,
    pub schedule: Schedule,
}

impl TimerState {
    /// Create an idle state at the start of the session
    pub fn new(schedule: Schedule) -> Self {
        Self {
            active: false,
            elapsed: 0.0,
            last_update: None,
            schedule,
        }
    }
}

/// Drives a [`TimerState`] from explicit wall-clock readings.
///
/// Nothing here reads the clock: every command that needs the time takes a
/// `now` argument, so the caller decides the cadence and tests can replay
/// arbitrary timelines. All derived values are recomputed on each call.
#[derive(Debug, Clone)]
pub struct TimerEngine {
    state: TimerState,
}

impl TimerEngine {
    /// Create an idle engine for `schedule`
    pub fn new(schedule: Schedule) -> Self {
        Self { state: TimerState::new(schedule) }
    }

    /// Read-only view of the underlying state
    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn schedule(&self) -> &Schedule {
        &self.state.schedule
    }

    pub fn is_active(&self) -> bool {
        self.state.active
    }

    pub fn elapsed(&self) -> Seconds {
        self.state.elapsed
    }

    pub fn status(&self) -> TimerStatus {
        if self.is_finished() {
            TimerStatus::Finished
        } else if self.state.active {
            TimerStatus::Running
        } else if self.state.elapsed > 0.0 {
            TimerStatus::Paused
        } else {
            TimerStatus::Idle
        }
    }

    /// Start accruing time from `now`.
    ///
    /// Time spent paused is never counted, so this does not reconcile.
    pub fn resume(&mut self, now: DateTime<Utc>) {
        if self.state.active {
            debug!("Resume ignored, timer already running");
            return;
        }
        if self.is_finished() {
            debug!("Resume ignored, session finished");
            return;
        }
        self.state.active = true;
        self.state.last_update = Some(now);
        debug!("Timer resumed at elapsed={:.3}s", self.state.elapsed);
    }

    /// Reconcile up to `now`, then stop accruing
    pub fn pause(&mut self, now: DateTime<Utc>) {
        if !self.state.active {
            debug!("Pause ignored, timer not running");
            return;
        }
        self.advance(now);
        self.state.active = false;
        debug!("Timer paused at elapsed={:.3}s", self.state.elapsed);
    }

    /// Pause when running, resume otherwise
    pub fn toggle(&mut self, now: DateTime<Utc>) {
        if self.state.active {
            self.pause(now);
        } else {
            self.resume(now);
        }
    }

    /// Add the time since the last reconciliation to `elapsed`.
    ///
    /// Clamps at the end of the session and finishes the timer there, so any
    /// gap between calls, however long, is safe. A `now` before the last
    /// update counts as no time.
    pub fn advance(&mut self, now: DateTime<Utc>) {
        if !self.state.active {
            return;
        }
        let delta = match self.state.last_update {
            Some(last) => seconds_between(last, now),
            None => 0.0,
        };
        let candidate = self.state.elapsed + delta;
        let session_duration = self.session_duration();

        if candidate >= session_duration {
            self.state.elapsed = session_duration;
            self.state.active = false;
            info!("Session finished after {:.1}s", session_duration);
        } else {
            self.state.elapsed = candidate;
        }
        self.state.last_update = Some(now);
    }

    /// Rewind to the start of the session without resuming
    pub fn reset(&mut self) {
        self.state.elapsed = 0.0;
        debug!("Timer reset");
    }

    /// Swap the schedule, keeping elapsed time and the active flag
    pub fn set_schedule(&mut self, schedule: Schedule) {
        debug!("Schedule replaced: {} -> {}", self.state.schedule, schedule);
        self.state.schedule = schedule;
    }

    pub fn session_duration(&self) -> Seconds {
        self.state.schedule.session_duration()
    }

    /// Progress through the session in `[0, 1]`
    pub fn elapsed_relative(&self) -> Result<f64, TimingError> {
        let session_duration = self.session_duration();
        if session_duration == 0.0 {
            return Err(TimingError::DivisionByZero);
        }
        Ok(self.state.elapsed / session_duration)
    }

    pub fn session_sequence(&self) -> Vec<Period> {
        expand(&self.state.schedule, self.state.elapsed)
    }

    pub fn session_sequence_relative(&self) -> Result<Vec<RelativePeriod>, TimingError> {
        expand_relative(&self.state.schedule, self.state.elapsed)
    }

    /// Whether the latest period is a work period
    pub fn is_working(&self) -> bool {
        self.session_sequence().last().is_some_and(|p| p.working)
    }

    /// Time left in the current period
    pub fn remaining(&self) -> Seconds {
        self.session_sequence()
            .last()
            .map_or(0.0, |p| (p.start + p.period - self.state.elapsed).max(0.0))
    }

    /// Time left in the whole session
    pub fn session_remaining(&self) -> Seconds {
        (self.session_duration() - self.state.elapsed).max(0.0)
    }

    pub fn is_finished(&self) -> bool {
        self.state.elapsed >= self.session_duration()
    }
}

/// Full-precision gap between two readings; negative gaps count as zero
fn seconds_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> Seconds {
    (later - earlier).to_std().map_or(0.0, |gap| gap.as_secs_f64())
}
