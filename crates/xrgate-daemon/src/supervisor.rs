// crates/xrgate-daemon/src/supervisor.rs
//
// Keeps restarting router client startup until the client reports ready.

use std::sync::Arc;
use std::time::Duration;

use xrgate_core::RouterClient;

/// Call `start()` until it returns `Ok(true)`.
///
/// `Ok(false)` and errors both trigger another attempt after `delay`.
/// There is no attempt limit and the delay never grows. Returns the
/// number of attempts made.
pub async fn run_startup_loop(client: Arc<dyn RouterClient>, delay: Duration) -> u64 {
    let mut attempts: u64 = 0;

    loop {
        attempts += 1;

        match client.start().await {
            Ok(true) => {
                tracing::info!("XRouter client ready after {} attempt(s)", attempts);
                return attempts;
            }
            Ok(false) => {
                tracing::info!(
                    "XRouter client started but not ready (attempt {}), restarting",
                    attempts
                );
            }
            Err(e) => {
                tracing::error!("XRouter client start failed (attempt {}): {}", attempts, e);
            }
        }

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use serde_json::Value;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use tokio::sync::broadcast;
    use xrgate_core::{ClientEvent, ClientStatus, GatewayError};

    /// Replays a scripted sequence of start outcomes.
    struct ScriptedClient {
        outcomes: Mutex<VecDeque<Result<bool, GatewayError>>>,
        events: broadcast::Sender<ClientEvent>,
    }

    impl ScriptedClient {
        fn new(outcomes: Vec<Result<bool, GatewayError>>) -> Arc<Self> {
            let (events, _) = broadcast::channel(4);
            Arc::new(Self {
                outcomes: Mutex::new(outcomes.into()),
                events,
            })
        }

        fn remaining(&self) -> usize {
            self.outcomes.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl RouterClient for ScriptedClient {
        async fn start(&self) -> Result<bool, GatewayError> {
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Ok(true))
        }

        async fn status(&self) -> ClientStatus {
            ClientStatus::Stopped
        }

        async fn get_block_count(&self, _: &str) -> Result<u64, GatewayError> {
            Err(GatewayError::NotStarted)
        }

        async fn get_block_hash(&self, _: &str, _: u64) -> Result<String, GatewayError> {
            Err(GatewayError::NotStarted)
        }

        async fn get_block(&self, _: &str, _: &str) -> Result<Value, GatewayError> {
            Err(GatewayError::NotStarted)
        }

        async fn get_blocks(&self, _: &str, _: &[String]) -> Result<Vec<Value>, GatewayError> {
            Err(GatewayError::NotStarted)
        }

        async fn get_transaction(&self, _: &str, _: &str) -> Result<Value, GatewayError> {
            Err(GatewayError::NotStarted)
        }

        async fn get_transactions(
            &self,
            _: &str,
            _: &[String],
        ) -> Result<Vec<Value>, GatewayError> {
            Err(GatewayError::NotStarted)
        }

        async fn decode_raw_transaction(&self, _: &str, _: &str) -> Result<Value, GatewayError> {
            Err(GatewayError::NotStarted)
        }

        fn subscribe(&self) -> broadcast::Receiver<ClientEvent> {
            self.events.subscribe()
        }
    }

    #[tokio::test]
    async fn ready_on_first_attempt() {
        let client = ScriptedClient::new(vec![Ok(true)]);
        let attempts = run_startup_loop(client.clone(), Duration::ZERO).await;
        assert_eq!(attempts, 1);
    }

    #[tokio::test]
    async fn retries_through_failures_and_not_ready() {
        let client = ScriptedClient::new(vec![
            Err(GatewayError::Network("connection refused".to_string())),
            Ok(false),
            Err(GatewayError::Rpc {
                code: -28,
                message: "Loading block index...".to_string(),
            }),
            Ok(false),
            Ok(true),
        ]);
        let attempts = run_startup_loop(client.clone(), Duration::ZERO).await;
        assert_eq!(attempts, 5);
        assert_eq!(client.remaining(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn pause_between_attempts_is_fixed() {
        let client = ScriptedClient::new(vec![Ok(false), Ok(false), Ok(false), Ok(true)]);
        let started = tokio::time::Instant::now();
        let attempts = run_startup_loop(client, Duration::from_millis(500)).await;

        assert_eq!(attempts, 4);
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(1500));
        assert!(elapsed < Duration::from_millis(2000));
    }
}
