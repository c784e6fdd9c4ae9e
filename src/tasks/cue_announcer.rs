//! Cue announcer background task

use std::{sync::Arc, time::Duration};
use tokio::{sync::broadcast::error::RecvError, time::sleep};
use tracing::{error, info, warn};

use crate::state::{AppState, Cue};

/// Background task that announces phase transitions as they are detected
pub async fn cue_announcer_task(state: Arc<AppState>) {
    info!("Starting cue announcer task");

    let mut cue_rx = state.cue_tx.subscribe();

    loop {
        match cue_rx.recv().await {
            Ok(cue) => {
                let snapshot = state.latest_snapshot();
                match cue {
                    Cue::Work => info!(
                        "Work! [{}] {} left in session",
                        cue.sound(),
                        snapshot.session_remaining_display
                    ),
                    Cue::Rest => info!(
                        "Rest [{}] for {}",
                        cue.sound(),
                        snapshot.remaining_display
                    ),
                    Cue::End => info!("Session complete [{}]", cue.sound()),
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!("Cue announcer lagged, skipped {} cues", skipped);
            }
            Err(RecvError::Closed) => {
                error!("Cue channel closed");
                // Wait a bit before retrying
                sleep(Duration::from_secs(1)).await;
                cue_rx = state.cue_tx.subscribe();
            }
        }
    }
}
