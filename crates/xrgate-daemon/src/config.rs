// crates/xrgate-daemon/src/config.rs
//
// Runtime configuration for the xrgate daemon.
// Loaded from a TOML file or populated with sensible defaults, then
// overridden by the PORT environment variable and command-line flags.

use serde::Deserialize;
use std::fs;

use xrgate_core::config::DEFAULT_TIMEOUT_SECS;
use xrgate_core::{ClientConfig, Network, DEFAULT_QUERY_NUM};
use xrgate_rpc::{RpcConfig, DEFAULT_PORT};

/// Command-line flags and the PORT environment variable. `None` keeps the
/// value from the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub port: Option<u16>,
    pub port_env: Option<String>,
    pub network: Option<Network>,
    pub rpc_url: Option<String>,
}

/// Runtime configuration for the daemon.
#[derive(Debug, Clone, Deserialize)]
pub struct DaemonConfig {
    /// Host address the gateway binds to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port the gateway listens on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory of static files (favicon, stylesheet).
    #[serde(default = "default_public_dir")]
    pub public_dir: String,

    /// Optional HTML file replacing the built-in landing page.
    #[serde(default)]
    pub index_path: Option<String>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format: "json" for JSON lines, anything else for plain text.
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Router network: "mainnet" or "testnet".
    #[serde(default)]
    pub network: Network,

    /// Number of service nodes queried per call.
    #[serde(default = "default_query_num")]
    pub query_num: u32,

    /// Daemon JSON-RPC URL. Defaults to the network's local port.
    #[serde(default)]
    pub rpc_url: Option<String>,

    /// Daemon RPC user.
    #[serde(default)]
    pub rpc_user: Option<String>,

    /// Daemon RPC password.
    #[serde(default)]
    pub rpc_password: Option<String>,

    /// Per-call timeout for daemon RPC requests.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Fixed pause between client start attempts, in milliseconds.
    #[serde(default = "default_restart_delay_ms")]
    pub restart_delay_ms: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_public_dir() -> String {
    "public".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_query_num() -> u32 {
    DEFAULT_QUERY_NUM
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_restart_delay_ms() -> u64 {
    500
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            public_dir: default_public_dir(),
            index_path: None,
            log_level: default_log_level(),
            log_format: default_log_format(),
            network: Network::default(),
            query_num: default_query_num(),
            rpc_url: None,
            rpc_user: None,
            rpc_password: None,
            request_timeout_secs: default_request_timeout_secs(),
            restart_delay_ms: default_restart_delay_ms(),
        }
    }
}

impl DaemonConfig {
    /// Load configuration from a TOML file at the given path.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from TOML text.
    pub fn parse(contents: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: DaemonConfig = toml::from_str(contents)?;
        Ok(config)
    }

    /// Apply the PORT environment variable, if it holds a valid port.
    pub fn apply_port_env(&mut self, value: Option<String>) {
        let Some(raw) = value else {
            return;
        };
        match raw.trim().parse::<u16>() {
            Ok(port) => self.port = port,
            Err(_) => tracing::warn!("Ignoring PORT={:?}: not a valid port number", raw),
        }
    }

    /// Layer overrides on top of the file values.
    ///
    /// Port precedence: `--port`, then PORT, then the file.
    pub fn apply_overrides(&mut self, overrides: Overrides) {
        self.apply_port_env(overrides.port_env);
        if let Some(port) = overrides.port {
            self.port = port;
        }
        if let Some(network) = overrides.network {
            self.network = network;
        }
        if let Some(url) = overrides.rpc_url {
            self.rpc_url = Some(url);
        }
    }

    /// Listener configuration for the gateway.
    pub fn rpc_config(&self) -> RpcConfig {
        RpcConfig {
            host: self.host.clone(),
            port: self.port,
        }
    }

    /// Configuration for the router client.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            network: self.network,
            query_num: self.query_num,
            rpc_url: self.rpc_url.clone(),
            rpc_user: self.rpc_user.clone(),
            rpc_password: self.rpc_password.clone(),
            timeout_secs: self.request_timeout_secs,
        }
    }
}

/// Expand `~` at the start of a path to the user's home directory.
pub fn expand_tilde(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return format!("{}/{}", home.display(), rest);
        }
    }
    path.to_string()
}
