//! Health check endpoints.
//!
//! - `/livez` - Basic liveness probe (immediate 200, no checks)
//! - `/healthz` - Role plus outbox and dead-letter backlog

use axum::{extract::State, http::StatusCode, Json};

use hotelsync_core::status::HealthReport;

use crate::state::AppState;

/// GET /livez - Basic liveness probe.
#[axum::debug_handler]
pub async fn livez() -> StatusCode {
    StatusCode::OK
}

/// GET /healthz - Backlog of the served roles.
///
/// A growing `outbox_pending` means the event channel is unreachable;
/// `dead_letters` counts events waiting for a redrive.
#[axum::debug_handler]
pub async fn healthz(State(state): State<AppState>) -> Json<HealthReport> {
    let outbox_pending = match &state.hotels {
        Some(hotels) => hotels.hotels.outbox().len().await,
        None => 0,
    };
    let dead_letters = match &state.search {
        Some(search) => search.consumer.dead_letters().len().await,
        None => 0,
    };

    Json(HealthReport {
        status: "ok".to_string(),
        role: state.role.as_str().to_string(),
        outbox_pending,
        dead_letters,
    })
}
