use thiserror::Error;

/// Gateway-wide error types.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Invalid or unreadable configuration.
    #[error("Config error: {0}")]
    Config(String),

    /// Transport failure talking to the router daemon (connect, timeout, HTTP status).
    #[error("Network error: {0}")]
    Network(String),

    /// The daemon's JSON-RPC layer rejected the call.
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// The router answered, but with an error reply (no consensus, no nodes, ...).
    #[error("Router error {code}: {message}")]
    Router { code: i64, message: String },

    /// A query was issued before the router client was started.
    #[error("Router client is not started")]
    NotStarted,

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A request parameter could not be interpreted.
    #[error("Invalid parameter: {0}")]
    InvalidParam(String),

    /// The HTTP port is already bound by another process.
    #[error("Port {0} is already in use. Please stop whatever process is using that port and try again.")]
    PortInUse(u16),

    /// I/O error (socket bind, file read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for GatewayError {
    fn from(e: serde_json::Error) -> Self {
        GatewayError::Serialization(e.to_string())
    }
}
