//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use tracing::{error, info, warn};

use crate::state::{AppState, StateError, TimerSnapshot};
use super::responses::{
    ApiResponse, ErrorResponse, HealthResponse, ScheduleRequest, SequenceResponse, StatusResponse,
};

type HandlerError = (StatusCode, Json<ErrorResponse>);

fn internal_error(context: &str, e: StateError) -> HandlerError {
    error!("Failed to {}: {}", context, e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(format!("Failed to {}: {}", context, e))),
    )
}

fn respond(result: Result<TimerSnapshot, StateError>, context: &str, message: &str) -> Result<Json<ApiResponse>, HandlerError> {
    match result {
        Ok(timer) => {
            info!("{} ({})", message, timer.status.as_str());
            Ok(Json(ApiResponse::from_timer(message.to_string(), timer)))
        }
        Err(e) => Err(internal_error(context, e)),
    }
}

/// Handle POST /resume - Start or continue the session
pub async fn resume_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, HandlerError> {
    respond(state.resume(Utc::now()), "resume timer", "Timer resumed")
}

/// Handle POST /pause - Stop accruing time
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, HandlerError> {
    respond(state.pause(Utc::now()), "pause timer", "Timer paused")
}

/// Handle POST /toggle - Pause when running, resume otherwise
pub async fn toggle_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, HandlerError> {
    respond(state.toggle(Utc::now()), "toggle timer", "Timer toggled")
}

/// Handle POST /reset - Rewind to the start of the session
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, HandlerError> {
    respond(state.reset(Utc::now()), "reset timer", "Timer reset")
}

/// Handle PUT /schedule - Replace the schedule, keeping elapsed time
pub async fn schedule_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ScheduleRequest>,
) -> Result<Json<ApiResponse>, HandlerError> {
    match state.set_schedule(request.blocks, Utc::now()) {
        Err(StateError::Schedule(e)) => {
            warn!("Rejected schedule: {}", e);
            Err((StatusCode::UNPROCESSABLE_ENTITY, Json(ErrorResponse::new(e.to_string()))))
        }
        result => respond(result, "set schedule", "Schedule updated"),
    }
}

/// Handle GET /status - Reconcile and return the current timer state
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, HandlerError> {
    let timer = state.tick(Utc::now()).map_err(|e| internal_error("get timer state", e))?;
    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /sequence - Periods elapsed so far in seconds
pub async fn sequence_handler(State(state): State<Arc<AppState>>) -> Result<Json<SequenceResponse>, HandlerError> {
    let periods = state.sequence(Utc::now()).map_err(|e| internal_error("expand schedule", e))?;

    Ok(Json(SequenceResponse {
        elapsed: periods.iter().map(|p| p.duration).sum(),
        periods,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
