// crates/xrgate-rpc/src/handlers/status.rs
//
// Client lifecycle handlers: status, isStarted, isReady.
// These never fail; they report the router client's current state.

use axum::extract::State;
use axum::Json;

use xrgate_core::ClientStatus;

use crate::server::AppState;

/// GET /xr/status
pub async fn handle_status(State(state): State<AppState>) -> Json<ClientStatus> {
    Json(state.client.status().await)
}

/// GET /xr/isStarted
pub async fn handle_is_started(State(state): State<AppState>) -> Json<bool> {
    Json(state.client.is_started().await)
}

/// GET /xr/isReady
pub async fn handle_is_ready(State(state): State<AppState>) -> Json<bool> {
    Json(state.client.is_ready().await)
}
