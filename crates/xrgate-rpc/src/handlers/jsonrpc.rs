// crates/xrgate-rpc/src/handlers/jsonrpc.rs
//
// Generic JSON-RPC endpoint: POST /rpc.
//
// The client sends {"method", "params", "id"?}; params may be named (an
// object), positional (an array) or absent. Every request is answered with
// HTTP 200 and a {"success", "result", "error", "id"?} envelope. A failed
// router call still carries the route's fallback value in `result`, so a
// consumer that ignores `success` sees the same defaults as the REST routes.
// A JSON array of requests is answered with an array of envelopes.

use std::future::Future;
use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use xrgate_core::{GatewayError, RouterClient};

use super::{parse_height, Fallback};
use crate::server::AppState;

// ---------------------------------------------------------------------------
// Envelopes
// ---------------------------------------------------------------------------

/// A JSON-RPC-style request envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// The method to invoke (e.g., "getBlockCount").
    pub method: String,
    /// Named or positional parameters.
    #[serde(default)]
    pub params: Value,
    /// Caller-chosen id, echoed back. An explicit `null` is kept.
    #[serde(
        default,
        deserialize_with = "present_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<Value>,
}

/// Maps a present `id` field, `null` included, to `Some`.
fn present_id<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// A JSON-RPC-style response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// Whether the call succeeded.
    pub success: bool,
    /// The result, or the fallback value of a failed router call.
    pub result: Option<Value>,
    /// Error message (if not success).
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
}

impl JsonRpcResponse {
    fn ok(result: Value) -> Self {
        Self {
            success: true,
            result: Some(result),
            error: None,
            id: None,
        }
    }

    fn failed(error: String, fallback: Fallback) -> Self {
        Self {
            success: false,
            result: Some(fallback.value()),
            error: Some(error),
            id: None,
        }
    }

    fn rejected(error: String) -> Self {
        Self {
            success: false,
            result: None,
            error: Some(error),
            id: None,
        }
    }

    fn with_id(mut self, id: Option<Value>) -> Self {
        self.id = id;
        self
    }
}

// ---------------------------------------------------------------------------
// Parameter types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct WalletParams {
    pub wallet: String,
}

/// Heights are accepted as numbers or numeric strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum HeightParam {
    Number(u64),
    Text(String),
}

impl HeightParam {
    fn resolve(&self) -> Result<u64, GatewayError> {
        match self {
            HeightParam::Number(n) => Ok(*n),
            HeightParam::Text(s) => parse_height(s),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlockHashParams {
    pub wallet: String,
    pub height: HeightParam,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlockParams {
    pub wallet: String,
    pub hash: String,
}

/// A list of ids, either as an array or as one comma-separated string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IdList {
    Many(Vec<String>),
    Joined(String),
}

impl IdList {
    fn into_vec(self) -> Vec<String> {
        match self {
            IdList::Many(ids) => ids,
            IdList::Joined(joined) => super::split_ids(&joined),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlocksParams {
    pub wallet: String,
    pub hashes: IdList,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransactionParams {
    pub wallet: String,
    pub txid: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransactionsParams {
    pub wallet: String,
    pub txids: IdList,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DecodeParams {
    pub wallet: String,
    pub hex: String,
}

// ---------------------------------------------------------------------------
// Handler
// ---------------------------------------------------------------------------

/// POST /rpc
pub async fn handle_rpc(State(state): State<AppState>, body: Bytes) -> Json<Value> {
    let payload: Value = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(e) => {
            let resp = JsonRpcResponse::rejected(format!("Invalid JSON-RPC request: {}", e));
            return Json(to_json(resp));
        }
    };

    match payload {
        Value::Array(items) => {
            let mut responses = Vec::with_capacity(items.len());
            for item in items {
                responses.push(to_json(handle_single(&state.client, item).await));
            }
            Json(Value::Array(responses))
        }
        single => Json(to_json(handle_single(&state.client, single).await)),
    }
}

async fn handle_single(client: &Arc<dyn RouterClient>, payload: Value) -> JsonRpcResponse {
    match serde_json::from_value::<JsonRpcRequest>(payload) {
        Ok(request) => {
            let id = request.id.clone();
            dispatch(client, request).await.with_id(id)
        }
        Err(e) => JsonRpcResponse::rejected(format!("Invalid JSON-RPC request: {}", e)),
    }
}

fn to_json(resp: JsonRpcResponse) -> Value {
    serde_json::to_value(resp).unwrap_or(Value::Null)
}

/// Dispatch a request to the router client based on the method name.
pub async fn dispatch(
    client: &Arc<dyn RouterClient>,
    request: JsonRpcRequest,
) -> JsonRpcResponse {
    tracing::debug!("JSON-RPC call: {}", request.method);

    // Parameterless methods accept anything, including no params at all.
    match request.method.as_str() {
        "status" => return JsonRpcResponse::ok(to_value_or_null(client.status().await)),
        "isStarted" => return JsonRpcResponse::ok(Value::Bool(client.is_started().await)),
        "isReady" => return JsonRpcResponse::ok(Value::Bool(client.is_ready().await)),
        _ => {}
    }

    let params = request.params;
    match request.method.as_str() {
        "getBlockCount" => {
            call_router(params, Fallback::Count, |p: WalletParams| async move {
                client.get_block_count(&p.wallet).await
            })
            .await
        }
        "getBlockHash" => {
            call_router(params, Fallback::Hash, |p: BlockHashParams| async move {
                let height = p.height.resolve()?;
                client.get_block_hash(&p.wallet, height).await
            })
            .await
        }
        "getBlock" => {
            call_router(params, Fallback::Document, |p: BlockParams| async move {
                client.get_block(&p.wallet, &p.hash).await
            })
            .await
        }
        "getBlocks" => {
            call_router(params, Fallback::List, |p: BlocksParams| async move {
                client.get_blocks(&p.wallet, &p.hashes.into_vec()).await
            })
            .await
        }
        "getTransaction" => {
            call_router(params, Fallback::Document, |p: TransactionParams| async move {
                client.get_transaction(&p.wallet, &p.txid).await
            })
            .await
        }
        "getTransactions" => {
            call_router(params, Fallback::List, |p: TransactionsParams| async move {
                client.get_transactions(&p.wallet, &p.txids.into_vec()).await
            })
            .await
        }
        "decodeRawTransaction" => {
            call_router(params, Fallback::Document, |p: DecodeParams| async move {
                client.decode_raw_transaction(&p.wallet, &p.hex).await
            })
            .await
        }
        other => JsonRpcResponse::rejected(format!("Unknown method: {}", other)),
    }
}

fn to_value_or_null<T: Serialize>(value: T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

/// Generic dispatch helper: deserialize params into a request type, call
/// the router, and serialize the result. Router failures are logged and
/// answered with `fallback`.
async fn call_router<Req, Resp, F, Fut>(
    params: Value,
    fallback: Fallback,
    call: F,
) -> JsonRpcResponse
where
    Req: DeserializeOwned,
    Resp: Serialize,
    F: FnOnce(Req) -> Fut,
    Fut: Future<Output = Result<Resp, GatewayError>>,
{
    let request: Req = match serde_json::from_value(params) {
        Ok(r) => r,
        Err(e) => return JsonRpcResponse::rejected(format!("Failed to deserialize params: {}", e)),
    };

    let outcome = call(request)
        .await
        .and_then(|resp| serde_json::to_value(resp).map_err(GatewayError::from));

    match outcome {
        Ok(value) => JsonRpcResponse::ok(value),
        Err(e) => {
            tracing::error!("JSON-RPC call failed: {}", e);
            JsonRpcResponse::failed(e.to_string(), fallback)
        }
    }
}
