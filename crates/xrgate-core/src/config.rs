// crates/xrgate-core/src/config.rs
//
// Router client configuration: target network, query fan-out, and how to
// reach the daemon that speaks the router protocol.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

/// Number of service nodes queried per call when nothing else is configured.
pub const DEFAULT_QUERY_NUM: u32 = 3;

/// Default timeout for a single daemon RPC call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ---------------------------------------------------------------------------
// Network
// ---------------------------------------------------------------------------

/// The router network the client joins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
}

impl Network {
    /// Default JSON-RPC port of the daemon on this network.
    pub fn default_rpc_port(&self) -> u16 {
        match self {
            Network::Mainnet => 41414,
            Network::Testnet => 41419,
        }
    }

    /// Default JSON-RPC URL of a daemon running on the local host.
    pub fn default_rpc_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.default_rpc_port())
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Mainnet => write!(f, "mainnet"),
            Network::Testnet => write!(f, "testnet"),
        }
    }
}

impl FromStr for Network {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" | "main" => Ok(Network::Mainnet),
            "testnet" | "test" => Ok(Network::Testnet),
            other => Err(GatewayError::Config(format!(
                "Unknown network: {}. Use 'mainnet' or 'testnet'.",
                other
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// ClientConfig
// ---------------------------------------------------------------------------

/// Configuration for a router client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Network to join.
    pub network: Network,
    /// How many service nodes answer each query.
    pub query_num: u32,
    /// Daemon JSON-RPC URL. Falls back to the network's local default.
    pub rpc_url: Option<String>,
    /// Basic-auth user for the daemon RPC.
    pub rpc_user: Option<String>,
    /// Basic-auth password for the daemon RPC.
    pub rpc_password: Option<String>,
    /// Per-call timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            network: Network::Mainnet,
            query_num: DEFAULT_QUERY_NUM,
            rpc_url: None,
            rpc_user: None,
            rpc_password: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Create a config for the given network with default fan-out.
    pub fn new(network: Network) -> Self {
        Self {
            network,
            ..Self::default()
        }
    }

    /// Set the number of nodes queried per call.
    pub fn with_query_num(mut self, query_num: u32) -> Self {
        self.query_num = query_num;
        self
    }

    /// Point the client at an explicit daemon RPC URL.
    pub fn with_rpc_url(mut self, url: impl Into<String>) -> Self {
        self.rpc_url = Some(url.into());
        self
    }

    /// The daemon RPC URL this config resolves to, without a trailing slash.
    pub fn resolved_rpc_url(&self) -> String {
        self.rpc_url
            .as_deref()
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|| self.network.default_rpc_url())
    }

    /// Reject configurations the client cannot run with.
    pub fn validate(&self) -> Result<(), GatewayError> {
        if self.query_num == 0 {
            return Err(GatewayError::Config(
                "query_num must be at least 1".to_string(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(GatewayError::Config(
                "timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
