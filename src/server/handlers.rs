/// Health endpoint handler

use axum::{extract::State, http::StatusCode};

use crate::core::HealthState;

/// Answer every request with the current verdict: 200 when healthy,
/// 500 otherwise. No body.
pub async fn health_status(State(state): State<HealthState>) -> StatusCode {
    if state.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}
