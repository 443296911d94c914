// crates/xrgate-core/src/status.rs
//
// Lifecycle status of a router client.
//
// Transitions driven by start():
//   Stopped -> Starting -> Started -> Ready
//   Starting -> Stopped (startup failed)

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle status reported by `RouterClient::status()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ClientStatus {
    /// Not started, or the last start attempt failed.
    #[default]
    Stopped,
    /// A start attempt is in flight.
    Starting,
    /// Connected to the router network, but not enough service nodes yet.
    Started,
    /// Enough service nodes are connected to answer queries.
    Ready,
}

impl ClientStatus {
    pub fn is_started(&self) -> bool {
        matches!(self, ClientStatus::Started | ClientStatus::Ready)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ClientStatus::Ready)
    }
}

impl fmt::Display for ClientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientStatus::Stopped => write!(f, "STOPPED"),
            ClientStatus::Starting => write!(f, "STARTING"),
            ClientStatus::Started => write!(f, "STARTED"),
            ClientStatus::Ready => write!(f, "READY"),
        }
    }
}
