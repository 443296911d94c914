// crates/xrgate-rpc/src/server.rs
//
// Gateway server setup: GatewayServer, RpcConfig and the route table.
//
// Every /xr/ route awaits one router-client call and answers with its
// result, or with a fixed default when the call fails. /rpc exposes the
// same calls through a JSON-RPC envelope. Anything else is looked up in
// the public directory.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::services::ServeDir;

use xrgate_core::{GatewayError, RouterClient};

use crate::handlers;
use crate::middleware;

/// Port the gateway listens on when nothing else is configured.
pub const DEFAULT_PORT: u16 = 45896;

/// This file, served at /server.rs so callers can read the route table.
pub const ROUTE_SOURCE: &str = include_str!("server.rs");

/// Landing page served at / unless the daemon supplies its own.
pub const DEFAULT_INDEX_HTML: &str = include_str!("../assets/index.html");

// ---------------------------------------------------------------------------
// RpcConfig
// ---------------------------------------------------------------------------

/// Configuration for the gateway listener.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcConfig {
    /// Host to bind to (e.g., "127.0.0.1" or "0.0.0.0").
    pub host: String,
    /// Port to listen on.
    pub port: u16,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// State shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The router client every query is delegated to.
    pub client: Arc<dyn RouterClient>,
    /// HTML served at /.
    pub index_html: Arc<str>,
}

impl AppState {
    pub fn new(client: Arc<dyn RouterClient>) -> Self {
        Self {
            client,
            index_html: Arc::from(DEFAULT_INDEX_HTML),
        }
    }
}

/// Build the gateway's route table.
///
/// When `public_dir` is set, unmatched GET requests are served from it
/// (favicon, stylesheets, scripts).
pub fn build_router(state: AppState, public_dir: Option<&Path>) -> Router {
    let router = Router::new()
        .route("/", get(handlers::pages::handle_index))
        .route("/server.rs", get(handlers::pages::handle_route_source))
        // Client lifecycle
        .route("/xr/status", get(handlers::status::handle_status))
        .route("/xr/isStarted", get(handlers::status::handle_is_started))
        .route("/xr/isReady", get(handlers::status::handle_is_ready))
        // Blocks
        .route(
            "/xr/getBlockCount/{wallet}",
            get(handlers::blocks::handle_get_block_count),
        )
        .route(
            "/xr/getBlockHash/{wallet}/{height}",
            get(handlers::blocks::handle_get_block_hash),
        )
        .route(
            "/xr/getBlock/{wallet}/{hash}",
            get(handlers::blocks::handle_get_block),
        )
        .route(
            "/xr/getBlocks/{wallet}/{hashes}",
            get(handlers::blocks::handle_get_blocks),
        )
        // Transactions
        .route(
            "/xr/getTransaction/{wallet}/{txid}",
            get(handlers::transactions::handle_get_transaction),
        )
        .route(
            "/xr/getTransactions/{wallet}/{txids}",
            get(handlers::transactions::handle_get_transactions),
        )
        .route(
            "/xr/decodeRawTransaction/{wallet}/{hex}",
            get(handlers::transactions::handle_decode_raw_transaction),
        )
        // Generic JSON-RPC
        .route("/rpc", post(handlers::jsonrpc::handle_rpc));

    let router = match public_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router
        .with_state(state)
        .layer(axum::middleware::from_fn(middleware::log_requests))
        .layer(middleware::cors_layer())
}

// ---------------------------------------------------------------------------
// GatewayServer
// ---------------------------------------------------------------------------

/// The HTTP gateway in front of a router client.
#[derive(Clone)]
pub struct GatewayServer {
    /// Listener configuration.
    config: RpcConfig,
    /// Router client all queries go to.
    client: Arc<dyn RouterClient>,
    /// Directory of static files, if any.
    public_dir: Option<PathBuf>,
    /// Replacement landing page, if any.
    index_html: Option<String>,
}

impl std::fmt::Debug for GatewayServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayServer")
            .field("config", &self.config)
            .field("public_dir", &self.public_dir)
            .field("custom_index", &self.index_html.is_some())
            .finish()
    }
}

impl GatewayServer {
    /// Create a new GatewayServer.
    ///
    /// # Arguments
    /// * `config` - Listener configuration (host, port).
    /// * `client` - Router client the routes delegate to.
    pub fn new(config: RpcConfig, client: Arc<dyn RouterClient>) -> Self {
        Self {
            config,
            client,
            public_dir: None,
            index_html: None,
        }
    }

    /// Serve unmatched paths from `dir`.
    pub fn with_public_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.public_dir = Some(dir.into());
        self
    }

    /// Replace the built-in landing page.
    pub fn with_index_html(mut self, html: String) -> Self {
        self.index_html = Some(html);
        self
    }

    /// Listener configuration.
    pub fn config(&self) -> &RpcConfig {
        &self.config
    }

    /// The fully layered router.
    pub fn router(&self) -> Router {
        let mut state = AppState::new(self.client.clone());
        if let Some(html) = &self.index_html {
            state.index_html = Arc::from(html.as_str());
        }
        build_router(state, self.public_dir.as_deref())
    }

    /// Bind the configured address and serve until `shutdown` resolves.
    pub async fn start<F>(&self, shutdown: F) -> Result<(), GatewayError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = TcpListener::bind(&addr).await?;
        self.serve(listener, shutdown).await
    }

    /// Serve on an already-bound listener until `shutdown` resolves.
    pub async fn serve<F>(&self, listener: TcpListener, shutdown: F) -> Result<(), GatewayError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let port = listener.local_addr()?.port();
        tracing::info!("XRouter gateway listening at http://localhost:{}", port);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("XRouter gateway stopped");
        Ok(())
    }
}
