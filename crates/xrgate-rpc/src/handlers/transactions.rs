// crates/xrgate-rpc/src/handlers/transactions.rs

use axum::extract::{Path, State};
use axum::Json;
use serde_json::Value;

use super::{respond, split_ids, Fallback};
use crate::server::AppState;

/// GET /xr/getTransaction/{wallet}/{txid}
pub async fn handle_get_transaction(
    State(state): State<AppState>,
    Path((wallet, txid)): Path<(String, String)>,
) -> Json<Value> {
    let result = state.client.get_transaction(&wallet, &txid).await;
    respond(result, Fallback::Document, "getTransaction")
}

/// GET /xr/getTransactions/{wallet}/{txids}, txids comma-separated.
pub async fn handle_get_transactions(
    State(state): State<AppState>,
    Path((wallet, txids)): Path<(String, String)>,
) -> Json<Value> {
    let txids = split_ids(&txids);
    let result = state.client.get_transactions(&wallet, &txids).await;
    respond(result, Fallback::List, "getTransactions")
}

/// GET /xr/decodeRawTransaction/{wallet}/{hex}
pub async fn handle_decode_raw_transaction(
    State(state): State<AppState>,
    Path((wallet, hex)): Path<(String, String)>,
) -> Json<Value> {
    let result = state.client.decode_raw_transaction(&wallet, &hex).await;
    respond(result, Fallback::Document, "decodeRawTransaction")
}
