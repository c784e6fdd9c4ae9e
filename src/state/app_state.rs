//! Main application state management

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Instant,
};
use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use crate::{
    engine::TimerEngine,
    error::TimingError,
    schedule::{Period, Schedule, ScheduleError},
};
use super::{Cue, PhaseTracker, TimerSnapshot};

/// Errors surfaced by [`AppState`] operations
#[derive(Debug, Error)]
pub enum StateError {
    #[error("failed to lock {0}")]
    Lock(&'static str),
    #[error(transparent)]
    Timing(#[from] TimingError),
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

/// Owns one timer on behalf of the presentation layer.
///
/// Every command and read reconciles the engine against the wall clock first,
/// then publishes a fresh snapshot and any cue the change produced.
#[derive(Debug)]
pub struct AppState {
    /// The timer itself
    pub engine: Arc<Mutex<TimerEngine>>,
    /// Previous tick's phase, for cue detection
    pub phase_tracker: Arc<Mutex<PhaseTracker>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Channel for phase-transition cues
    pub cue_tx: broadcast::Sender<Cue>,
    /// Channel for snapshot updates
    pub snapshot_tx: watch::Sender<TimerSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    pub _snapshot_rx: watch::Receiver<TimerSnapshot>,
}

impl AppState {
    /// Create a new AppState around an idle timer
    pub fn new(port: u16, host: String, schedule: Schedule) -> Self {
        let (cue_tx, _) = broadcast::channel(100);
        let (snapshot_tx, snapshot_rx) = watch::channel(TimerSnapshot::empty());

        Self {
            engine: Arc::new(Mutex::new(TimerEngine::new(schedule))),
            phase_tracker: Arc::new(Mutex::new(PhaseTracker::new())),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            cue_tx,
            snapshot_tx,
            _snapshot_rx: snapshot_rx,
        }
    }

    fn lock_engine(&self) -> Result<MutexGuard<'_, TimerEngine>, StateError> {
        self.engine.lock().map_err(|_| StateError::Lock("timer engine"))
    }

    /// Reconcile, apply `command`, then publish the result
    pub fn update_timer<F>(&self, action: &str, now: DateTime<Utc>, command: F) -> Result<TimerSnapshot, StateError>
    where
        F: FnOnce(&mut TimerEngine, DateTime<Utc>),
    {
        let mut engine = self.lock_engine()?;
        engine.advance(now);
        command(&mut *engine, now);
        // Settle commands that end the session, e.g. a shrinking schedule
        engine.advance(now);
        let snapshot = self.publish(&engine)?;
        drop(engine); // Release the lock early

        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(now);
        }

        Ok(snapshot)
    }

    /// Advance the timer to `now` without any command
    pub fn tick(&self, now: DateTime<Utc>) -> Result<TimerSnapshot, StateError> {
        let mut engine = self.lock_engine()?;
        engine.advance(now);
        self.publish(&engine)
    }

    /// Capture a snapshot, detect cues and notify listeners
    fn publish(&self, engine: &TimerEngine) -> Result<TimerSnapshot, StateError> {
        let snapshot = TimerSnapshot::capture(engine)?;

        let cue = self.phase_tracker
            .lock()
            .map_err(|_| StateError::Lock("phase tracker"))?
            .observe(engine);

        if let Some(cue) = cue {
            debug!("Phase transition detected: {:?}", cue);
            // Nobody listening is fine
            let _ = self.cue_tx.send(cue);
        }

        self.snapshot_tx.send_replace(snapshot.clone());
        Ok(snapshot)
    }

    pub fn resume(&self, now: DateTime<Utc>) -> Result<TimerSnapshot, StateError> {
        info!("Resuming timer");
        self.update_timer("resume", now, |engine, now| engine.resume(now))
    }

    pub fn pause(&self, now: DateTime<Utc>) -> Result<TimerSnapshot, StateError> {
        info!("Pausing timer");
        self.update_timer("pause", now, |engine, now| engine.pause(now))
    }

    pub fn toggle(&self, now: DateTime<Utc>) -> Result<TimerSnapshot, StateError> {
        self.update_timer("toggle", now, |engine, now| engine.toggle(now))
    }

    pub fn reset(&self, now: DateTime<Utc>) -> Result<TimerSnapshot, StateError> {
        info!("Resetting timer");
        self.update_timer("reset", now, |engine, _| engine.reset())
    }

    /// Replace the schedule; an unusable one is rejected and the timer kept as is
    pub fn set_schedule(&self, schedule: Schedule, now: DateTime<Utc>) -> Result<TimerSnapshot, StateError> {
        if let Err(e) = schedule.ensure_usable() {
            warn!("Rejected schedule {}: {}", schedule, e);
            return Err(e.into());
        }
        info!("Setting schedule to {}", schedule);
        self.update_timer("schedule", now, move |engine, _| engine.set_schedule(schedule))
    }

    /// Concrete periods elapsed so far, in seconds
    pub fn sequence(&self, now: DateTime<Utc>) -> Result<Vec<Period>, StateError> {
        let mut engine = self.lock_engine()?;
        engine.advance(now);
        self.publish(&engine)?;
        Ok(engine.session_sequence())
    }

    /// Most recently published snapshot
    pub fn latest_snapshot(&self) -> TimerSnapshot {
        self.snapshot_tx.borrow().clone()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
