//! Interval Timer - A work/rest interval-training timer
//!
//! This is the main entry point for the interval-timer server.

use std::sync::Arc;
use chrono::Utc;
use tokio::net::TcpListener;
use tracing::info;

use interval_timer::{
    config::Config,
    state::AppState,
    api::create_router,
    tasks::{cue_announcer_task, ticker_task},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("interval_timer={},tower_http=info", config.log_level()))
        .init();

    let schedule = config.schedule()?;

    info!("Starting interval-timer server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, tick={}ms, schedule={} ({}s)",
          config.host, config.port, config.tick_ms, schedule, schedule.session_duration());

    // Create application state
    let state = Arc::new(AppState::new(config.port, config.host.clone(), schedule));
    if config.autostart {
        state.resume(Utc::now())?;
    }

    // Start the ticker and cue background tasks
    let ticker_state = Arc::clone(&state);
    let tick_period = config.tick_period();
    tokio::spawn(async move {
        ticker_task(ticker_state, tick_period).await;
    });

    let cue_state = Arc::clone(&state);
    tokio::spawn(async move {
        cue_announcer_task(cue_state).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /resume   - Start or continue the session");
    info!("  POST /pause    - Pause the session");
    info!("  POST /toggle   - Pause or resume");
    info!("  POST /reset    - Rewind to the start");
    info!("  PUT  /schedule - Replace the schedule");
    info!("  GET  /status   - Current timer state");
    info!("  GET  /sequence - Elapsed work/rest periods");
    info!("  GET  /health   - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        signal = shutdown_signal() => {
            match signal {
                Ok(signal) => info!("Shutdown signal {} received", signal),
                Err(e) => tracing::error!("Failed to listen for shutdown signals: {}", e),
            }
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
