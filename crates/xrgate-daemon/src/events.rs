// crates/xrgate-daemon/src/events.rs
//
// Forwards router client events to the log.

use tokio::sync::broadcast::{self, error::RecvError};
use xrgate_core::{ClientEvent, EventLevel};

/// Log every event until the client's event channel closes.
pub async fn forward_events(mut rx: broadcast::Receiver<ClientEvent>) {
    loop {
        match rx.recv().await {
            Ok(event) => log_event(&event),
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!("Dropped {} router client events", skipped);
            }
            Err(RecvError::Closed) => break,
        }
    }
}

fn log_event(event: &ClientEvent) {
    match event.level {
        EventLevel::Info => tracing::info!("XRouter: {}", event.message),
        EventLevel::Error => tracing::error!("XRouter: {}", event.message),
    }
}
