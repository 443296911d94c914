// crates/xrgate-client/src/reply.rs
//
// Interpretation of XRouter replies.
//
// Every xr* call answers with an object like
//   {"reply": <consensus answer>, "uuid": "..."}
// or, when the router could not produce an answer,
//   {"error": "...", "code": 1004, "uuid": "..."}

use serde_json::Value;

use xrgate_core::GatewayError;

/// Pull the consensus answer out of an XRouter result object.
///
/// Results that are not reply objects are returned unchanged.
pub fn extract_reply(result: Value) -> Result<Value, GatewayError> {
    let Value::Object(mut obj) = result else {
        return Ok(result);
    };

    if let Some(error) = obj.get("error").filter(|e| !e.is_null()) {
        let message = match error {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        let code = obj.get("code").and_then(Value::as_i64).unwrap_or(0);
        return Err(GatewayError::Router { code, message });
    }

    match obj.remove("reply") {
        Some(reply) => Ok(reply),
        None => Ok(Value::Object(obj)),
    }
}

/// Block heights come back as numbers from most chains, as strings from some.
pub fn parse_block_count(reply: &Value) -> Result<u64, GatewayError> {
    match reply {
        Value::Number(n) => n.as_u64().ok_or_else(|| {
            GatewayError::Serialization(format!("block count is not a non-negative integer: {}", n))
        }),
        Value::String(s) => s.trim().parse::<u64>().map_err(|e| {
            GatewayError::Serialization(format!("block count {:?} is not numeric: {}", s, e))
        }),
        other => Err(GatewayError::Serialization(format!(
            "unexpected block count reply: {}",
            other
        ))),
    }
}

/// Block hashes must be strings.
pub fn parse_block_hash(reply: Value) -> Result<String, GatewayError> {
    match reply {
        Value::String(s) => Ok(s),
        other => Err(GatewayError::Serialization(format!(
            "unexpected block hash reply: {}",
            other
        ))),
    }
}

/// Some chains relay block/transaction documents as JSON-encoded text.
/// Such strings are decoded; every other value is returned as-is.
pub fn into_document(reply: Value) -> Value {
    if let Value::String(text) = &reply {
        let trimmed = text.trim_start();
        if trimmed.starts_with('{') || trimmed.starts_with('[') {
            if let Ok(parsed) = serde_json::from_str::<Value>(text) {
                return parsed;
            }
        }
    }
    reply
}

/// A list reply (xrGetBlocks / xrGetTransactions), with every entry decoded.
pub fn into_documents(reply: Value) -> Result<Vec<Value>, GatewayError> {
    match into_document(reply) {
        Value::Array(items) => Ok(items.into_iter().map(into_document).collect()),
        other => Err(GatewayError::Serialization(format!(
            "expected a list reply, got: {}",
            other
        ))),
    }
}

/// Multi-item calls take their ids as one comma-separated parameter.
pub fn join_ids(ids: &[String]) -> String {
    ids.iter()
        .map(|id| id.trim())
        .filter(|id| !id.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}
