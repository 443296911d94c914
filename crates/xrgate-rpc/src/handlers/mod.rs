// crates/xrgate-rpc/src/handlers/mod.rs
//
// Handler modules for all gateway endpoints, plus the fallback values
// returned when a router call fails.

pub mod blocks;
pub mod jsonrpc;
pub mod pages;
pub mod status;
pub mod transactions;

use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

use xrgate_core::GatewayError;

/// Default answers substituted for a failed router call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// Block heights: `0`.
    Count,
    /// Block hashes: `""`.
    Hash,
    /// Block and transaction documents: `{}`.
    Document,
    /// Lists of documents: `[]`.
    List,
}

impl Fallback {
    pub fn value(self) -> Value {
        match self {
            Fallback::Count => json!(0),
            Fallback::Hash => json!(""),
            Fallback::Document => json!({}),
            Fallback::List => json!([]),
        }
    }
}

/// Serialize a router result, or log the failure and answer with `fallback`.
pub(crate) fn respond<T: Serialize>(
    result: Result<T, GatewayError>,
    fallback: Fallback,
    what: &str,
) -> Json<Value> {
    let outcome = result.and_then(|v| serde_json::to_value(v).map_err(GatewayError::from));
    match outcome {
        Ok(value) => Json(value),
        Err(e) => {
            tracing::error!("{} failed: {}", what, e);
            Json(fallback.value())
        }
    }
}

/// Parse a block height the way it arrives in a URL segment.
pub(crate) fn parse_height(raw: &str) -> Result<u64, GatewayError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| GatewayError::InvalidParam(format!("height {:?} is not a block number", raw)))
}

/// Split a comma-separated id segment ("h1,h2,h3").
pub(crate) fn split_ids(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
