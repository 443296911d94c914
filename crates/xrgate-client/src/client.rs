// crates/xrgate-client/src/client.rs
//
// XRouterClient: the `RouterClient` implementation used by the gateway.
//
// start() probes the daemon for connected XRouter service nodes. The client
// is Started once the daemon answers, and Ready once at least `query_num`
// service nodes are connected. Queries map one-to-one onto the daemon's
// xr* RPC calls with `query_num` appended as the node count.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::{broadcast, RwLock};

use xrgate_core::events::EVENT_CHANNEL_CAPACITY;
use xrgate_core::{ClientConfig, ClientEvent, ClientStatus, GatewayError, RouterClient};

use crate::reply;
use crate::rpc::DaemonRpc;

/// Router client backed by a Blocknet daemon's XRouter RPC.
#[derive(Clone)]
pub struct XRouterClient {
    config: ClientConfig,
    rpc: DaemonRpc,
    status: Arc<RwLock<ClientStatus>>,
    events: broadcast::Sender<ClientEvent>,
}

impl std::fmt::Debug for XRouterClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XRouterClient")
            .field("network", &self.config.network)
            .field("query_num", &self.config.query_num)
            .field("rpc_url", &self.rpc.url)
            .finish()
    }
}

impl XRouterClient {
    /// Create a stopped client. Fails on an unusable config.
    pub fn new(config: ClientConfig) -> Result<Self, GatewayError> {
        config.validate()?;
        let rpc = DaemonRpc::new(&config);
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Ok(Self {
            config,
            rpc,
            status: Arc::new(RwLock::new(ClientStatus::Stopped)),
            events,
        })
    }

    /// The config this client was built from.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn set_status(&self, status: ClientStatus) {
        let mut current = self.status.write().await;
        if *current != status {
            tracing::debug!("XRouter client status: {} -> {}", *current, status);
            *current = status;
        }
    }

    /// Publish an event. Having no subscribers is not an error.
    fn emit(&self, event: ClientEvent) {
        let _ = self.events.send(event);
    }

    /// Issue an xr* query with the configured node count appended.
    async fn query(&self, method: &str, mut params: Vec<Value>) -> Result<Value, GatewayError> {
        if self.status().await == ClientStatus::Stopped {
            return Err(GatewayError::NotStarted);
        }
        params.push(json!(self.config.query_num));
        let result = self.rpc.call(method, params).await?;
        reply::extract_reply(result)
    }
}

/// Count the service nodes listed in an xrConnectedNodes reply.
fn connected_node_count(reply: &Value) -> usize {
    match reply {
        Value::Array(nodes) => nodes.len(),
        Value::Object(obj) => match obj.get("nodes") {
            Some(Value::Array(nodes)) => nodes.len(),
            _ => obj.len(),
        },
        Value::Number(n) => n.as_u64().unwrap_or(0) as usize,
        _ => 0,
    }
}

fn require<'a>(value: &'a str, name: &str) -> Result<&'a str, GatewayError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(GatewayError::InvalidParam(format!("{} must not be empty", name)));
    }
    Ok(trimmed)
}

#[async_trait]
impl RouterClient for XRouterClient {
    async fn start(&self) -> Result<bool, GatewayError> {
        self.set_status(ClientStatus::Starting).await;
        self.emit(ClientEvent::info(format!(
            "Starting XRouter client on {} via {}",
            self.config.network, self.rpc.url
        )));

        let probe = self
            .rpc
            .call("xrConnectedNodes", Vec::new())
            .await
            .and_then(reply::extract_reply);

        let nodes = match probe {
            Ok(reply) => connected_node_count(&reply),
            Err(e) => {
                self.set_status(ClientStatus::Stopped).await;
                self.emit(ClientEvent::error(format!("XRouter client failed to start: {}", e)));
                return Err(e);
            }
        };

        let required = self.config.query_num as usize;
        if nodes < required {
            self.set_status(ClientStatus::Started).await;
            self.emit(ClientEvent::info(format!(
                "Connected to {} of {} required XRouter service nodes",
                nodes, required
            )));
            return Ok(false);
        }

        self.set_status(ClientStatus::Ready).await;
        self.emit(ClientEvent::info(format!(
            "XRouter client ready with {} service nodes",
            nodes
        )));
        Ok(true)
    }

    async fn status(&self) -> ClientStatus {
        *self.status.read().await
    }

    async fn get_block_count(&self, wallet: &str) -> Result<u64, GatewayError> {
        let wallet = require(wallet, "wallet")?;
        let reply = self.query("xrGetBlockCount", vec![json!(wallet)]).await?;
        reply::parse_block_count(&reply)
    }

    async fn get_block_hash(&self, wallet: &str, height: u64) -> Result<String, GatewayError> {
        let wallet = require(wallet, "wallet")?;
        let reply = self
            .query("xrGetBlockHash", vec![json!(wallet), json!(height)])
            .await?;
        reply::parse_block_hash(reply)
    }

    async fn get_block(&self, wallet: &str, hash: &str) -> Result<Value, GatewayError> {
        let wallet = require(wallet, "wallet")?;
        let hash = require(hash, "hash")?;
        let reply = self.query("xrGetBlock", vec![json!(wallet), json!(hash)]).await?;
        Ok(reply::into_document(reply))
    }

    async fn get_blocks(
        &self,
        wallet: &str,
        hashes: &[String],
    ) -> Result<Vec<Value>, GatewayError> {
        let wallet = require(wallet, "wallet")?;
        let joined = reply::join_ids(hashes);
        require(&joined, "hashes")?;
        let reply = self.query("xrGetBlocks", vec![json!(wallet), json!(joined)]).await?;
        reply::into_documents(reply)
    }

    async fn get_transaction(&self, wallet: &str, txid: &str) -> Result<Value, GatewayError> {
        let wallet = require(wallet, "wallet")?;
        let txid = require(txid, "txid")?;
        let reply = self
            .query("xrGetTransaction", vec![json!(wallet), json!(txid)])
            .await?;
        Ok(reply::into_document(reply))
    }

    async fn get_transactions(
        &self,
        wallet: &str,
        txids: &[String],
    ) -> Result<Vec<Value>, GatewayError> {
        let wallet = require(wallet, "wallet")?;
        let joined = reply::join_ids(txids);
        require(&joined, "txids")?;
        let reply = self
            .query("xrGetTransactions", vec![json!(wallet), json!(joined)])
            .await?;
        reply::into_documents(reply)
    }

    async fn decode_raw_transaction(&self, wallet: &str, hex: &str) -> Result<Value, GatewayError> {
        let wallet = require(wallet, "wallet")?;
        let hex = require(hex, "hex")?;
        let reply = self
            .query("xrDecodeRawTransaction", vec![json!(wallet), json!(hex)])
            .await?;
        Ok(reply::into_document(reply))
    }

    fn subscribe(&self) -> broadcast::Receiver<ClientEvent> {
        self.events.subscribe()
    }
}
