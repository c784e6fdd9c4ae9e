//! Ticker background task

use std::{sync::Arc, time::Duration};
use chrono::Utc;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::state::AppState;

/// Background task that reconciles the timer against the wall clock on a
/// fixed cadence, publishing a snapshot on every tick
pub async fn ticker_task(state: Arc<AppState>, period: Duration) {
    info!("Starting ticker task every {}ms", period.as_millis());

    let mut interval = interval(period);
    // A stalled runtime should not cause a burst of catch-up ticks; the
    // engine measures the real gap anyway
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        match state.tick(Utc::now()) {
            Ok(snapshot) => {
                if snapshot.active {
                    debug!(
                        "Tick: elapsed={:.1}s working={} remaining={} session_remaining={}",
                        snapshot.elapsed,
                        snapshot.working,
                        snapshot.remaining_display,
                        snapshot.session_remaining_display
                    );
                }
            }
            Err(e) => {
                error!("Failed to advance timer: {}", e);
            }
        }
    }
}
