// crates/xrgate-core/src/traits.rs

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::broadcast;

use crate::error::GatewayError;
use crate::events::ClientEvent;
use crate::status::ClientStatus;

/// A client for the decentralized blockchain router.
///
/// The router owns peer discovery, service negotiation and consensus across
/// the answering nodes; implementors only surface its query API. Every query
/// is keyed by `wallet`, the ticker of the chain being asked (e.g. "BLOCK").
///
/// Implemented by xrgate-client (daemon-backed XRouter client).
#[async_trait]
pub trait RouterClient: Send + Sync {
    /// Attempt to start the client.
    ///
    /// `Ok(true)` once the client is ready, `Ok(false)` if it came up but is
    /// not ready yet, `Err` if startup failed outright.
    async fn start(&self) -> Result<bool, GatewayError>;

    /// Current lifecycle status.
    async fn status(&self) -> ClientStatus;

    async fn is_started(&self) -> bool {
        self.status().await.is_started()
    }

    async fn is_ready(&self) -> bool {
        self.status().await.is_ready()
    }

    /// Current block height of `wallet`'s chain.
    async fn get_block_count(&self, wallet: &str) -> Result<u64, GatewayError>;

    /// Hash of the block at `height`.
    async fn get_block_hash(&self, wallet: &str, height: u64) -> Result<String, GatewayError>;

    /// Block document for `hash`.
    async fn get_block(&self, wallet: &str, hash: &str) -> Result<Value, GatewayError>;

    /// Block documents for several hashes, in request order.
    async fn get_blocks(&self, wallet: &str, hashes: &[String]) -> Result<Vec<Value>, GatewayError>;

    /// Transaction document for `txid`.
    async fn get_transaction(&self, wallet: &str, txid: &str) -> Result<Value, GatewayError>;

    /// Transaction documents for several txids, in request order.
    async fn get_transactions(
        &self,
        wallet: &str,
        txids: &[String],
    ) -> Result<Vec<Value>, GatewayError>;

    /// Decode a hex-encoded raw transaction.
    async fn decode_raw_transaction(&self, wallet: &str, hex: &str) -> Result<Value, GatewayError>;

    /// Subscribe to the client's info/error events.
    fn subscribe(&self) -> broadcast::Receiver<ClientEvent>;
}
