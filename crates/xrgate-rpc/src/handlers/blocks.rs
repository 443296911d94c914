// crates/xrgate-rpc/src/handlers/blocks.rs
//
// Block query handlers: block count, block hash, block, blocks.

use axum::extract::{Path, State};
use axum::Json;
use serde_json::Value;

use super::{parse_height, respond, split_ids, Fallback};
use crate::server::AppState;

/// GET /xr/getBlockCount/{wallet}
pub async fn handle_get_block_count(
    State(state): State<AppState>,
    Path(wallet): Path<String>,
) -> Json<Value> {
    let result = state.client.get_block_count(&wallet).await;
    respond(result, Fallback::Count, "getBlockCount")
}

/// GET /xr/getBlockHash/{wallet}/{height}
///
/// A height that is not a block number is treated like any other failed
/// lookup and answered with `""`.
pub async fn handle_get_block_hash(
    State(state): State<AppState>,
    Path((wallet, height)): Path<(String, String)>,
) -> Json<Value> {
    let result = match parse_height(&height) {
        Ok(h) => state.client.get_block_hash(&wallet, h).await,
        Err(e) => Err(e),
    };
    respond(result, Fallback::Hash, "getBlockHash")
}

/// GET /xr/getBlock/{wallet}/{hash}
pub async fn handle_get_block(
    State(state): State<AppState>,
    Path((wallet, hash)): Path<(String, String)>,
) -> Json<Value> {
    let result = state.client.get_block(&wallet, &hash).await;
    respond(result, Fallback::Document, "getBlock")
}

/// GET /xr/getBlocks/{wallet}/{hashes}, hashes comma-separated.
pub async fn handle_get_blocks(
    State(state): State<AppState>,
    Path((wallet, hashes)): Path<(String, String)>,
) -> Json<Value> {
    let hashes = split_ids(&hashes);
    let result = state.client.get_blocks(&wallet, &hashes).await;
    respond(result, Fallback::List, "getBlocks")
}
