// crates/xrgate-core/src/events.rs
//
// Informational and error events published by a router client. The daemon
// subscribes and forwards them to the log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Capacity of the broadcast channel clients publish events on.
pub const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Severity of a client event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventLevel {
    Info,
    Error,
}

/// A message emitted by the router client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientEvent {
    pub level: EventLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ClientEvent {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: EventLevel::Info,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: EventLevel::Error,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}
