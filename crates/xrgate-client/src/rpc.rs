// crates/xrgate-client/src/rpc.rs
//
// JSON-RPC 1.0 transport to the daemon: one POST per call, optional basic
// auth, a shared reqwest client with a fixed timeout.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use xrgate_core::{ClientConfig, GatewayError};

/// Request envelope understood by Bitcoin-family daemons.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub id: String,
    pub method: String,
    pub params: Vec<serde_json::Value>,
}

/// Error object of a failed call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

/// Response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub result: serde_json::Value,
    #[serde(default)]
    pub error: Option<RpcErrorObject>,
    #[serde(default)]
    pub id: serde_json::Value,
}

/// HTTP JSON-RPC transport to the daemon.
#[derive(Debug, Clone)]
pub struct DaemonRpc {
    /// Daemon RPC URL (e.g., "http://127.0.0.1:41414").
    pub url: String,
    user: Option<String>,
    password: Option<String>,
    client: reqwest::Client,
}

impl DaemonRpc {
    /// Build a transport from a client config.
    pub fn new(config: &ClientConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            url: config.resolved_rpc_url(),
            user: config.rpc_user.clone(),
            password: config.rpc_password.clone(),
            client,
        }
    }

    /// Invoke `method` with positional `params` and return the `result` field.
    pub async fn call(
        &self,
        method: &str,
        params: Vec<serde_json::Value>,
    ) -> Result<serde_json::Value, GatewayError> {
        let request = RpcRequest {
            jsonrpc: "1.0".to_string(),
            id: Uuid::now_v7().to_string(),
            method: method.to_string(),
            params,
        };

        tracing::debug!("Daemon RPC call {} ({})", request.method, request.id);

        let mut builder = self.client.post(&self.url).json(&request);
        if let Some(user) = &self.user {
            builder = builder.basic_auth(user, self.password.as_ref());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| GatewayError::Network(format!("{} request failed: {}", method, e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::Network(format!("{} body read failed: {}", method, e)))?;

        // Bitcoin-family daemons answer RPC errors with HTTP 500 and a JSON
        // body, so the envelope is parsed before the status is judged.
        match serde_json::from_str::<RpcResponse>(&body) {
            Ok(rpc) => {
                if let Some(err) = rpc.error {
                    return Err(GatewayError::Rpc {
                        code: err.code,
                        message: err.message,
                    });
                }
                if !status.is_success() {
                    return Err(GatewayError::Network(format!(
                        "{} failed ({}): {}",
                        method, status, body
                    )));
                }
                Ok(rpc.result)
            }
            Err(e) if status.is_success() => Err(GatewayError::Serialization(format!(
                "{} response parse failed: {}",
                method, e
            ))),
            Err(_) => Err(GatewayError::Network(format!(
                "{} failed ({}): {}",
                method, status, body
            ))),
        }
    }
}
