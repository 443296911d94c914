// crates/xrgate-rpc/tests/routes.rs
//
// In-process tests of the gateway's route table against a stub router
// client. Requests go through the fully layered axum Router via
// tower::ServiceExt::oneshot; no sockets are opened.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tokio::sync::broadcast;
use tower::ServiceExt;

use xrgate_core::{ClientEvent, ClientStatus, GatewayError, RouterClient};
use xrgate_rpc::{build_router, AppState, GatewayServer, RpcConfig};

// ---------------------------------------------------------------------------
// Stub client
// ---------------------------------------------------------------------------

struct StubClient {
    status: ClientStatus,
    /// When set, every query fails with a router error.
    fail: bool,
    /// Names of the queries that reached the client.
    calls: Mutex<Vec<String>>,
    events: broadcast::Sender<ClientEvent>,
}

impl StubClient {
    fn new(status: ClientStatus, fail: bool) -> Arc<Self> {
        let (events, _) = broadcast::channel(8);
        Arc::new(Self {
            status,
            fail,
            calls: Mutex::new(Vec::new()),
            events,
        })
    }

    fn record(&self, call: &str) -> Result<(), GatewayError> {
        self.calls.lock().unwrap().push(call.to_string());
        if self.fail {
            return Err(GatewayError::Router {
                code: 1004,
                message: "Failed to find enough service nodes".to_string(),
            });
        }
        Ok(())
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RouterClient for StubClient {
    async fn start(&self) -> Result<bool, GatewayError> {
        Ok(self.status.is_ready())
    }

    async fn status(&self) -> ClientStatus {
        self.status
    }

    async fn get_block_count(&self, wallet: &str) -> Result<u64, GatewayError> {
        self.record(&format!("getBlockCount:{}", wallet))?;
        Ok(1583230)
    }

    async fn get_block_hash(&self, wallet: &str, height: u64) -> Result<String, GatewayError> {
        self.record(&format!("getBlockHash:{}:{}", wallet, height))?;
        Ok(format!("hash-{}-{}", wallet, height))
    }

    async fn get_block(&self, wallet: &str, hash: &str) -> Result<Value, GatewayError> {
        self.record(&format!("getBlock:{}", wallet))?;
        Ok(json!({"hash": hash, "height": 100}))
    }

    async fn get_blocks(
        &self,
        wallet: &str,
        hashes: &[String],
    ) -> Result<Vec<Value>, GatewayError> {
        self.record(&format!("getBlocks:{}", wallet))?;
        Ok(hashes.iter().map(|h| json!({"hash": h})).collect())
    }

    async fn get_transaction(&self, wallet: &str, txid: &str) -> Result<Value, GatewayError> {
        self.record(&format!("getTransaction:{}", wallet))?;
        Ok(json!({"txid": txid, "confirmations": 6}))
    }

    async fn get_transactions(
        &self,
        wallet: &str,
        txids: &[String],
    ) -> Result<Vec<Value>, GatewayError> {
        self.record(&format!("getTransactions:{}", wallet))?;
        Ok(txids.iter().map(|t| json!({"txid": t})).collect())
    }

    async fn decode_raw_transaction(&self, wallet: &str, hex: &str) -> Result<Value, GatewayError> {
        self.record(&format!("decodeRawTransaction:{}", wallet))?;
        Ok(json!({"hex": hex, "vin": [], "vout": []}))
    }

    fn subscribe(&self) -> broadcast::Receiver<ClientEvent> {
        self.events.subscribe()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn app(client: Arc<StubClient>) -> Router {
    build_router(AppState::new(client), None)
}

struct Reply {
    status: StatusCode,
    content_type: String,
    headers: axum::http::HeaderMap,
    body: Vec<u8>,
}

impl Reply {
    fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("body is JSON")
    }

    fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }
}

async fn send(app: Router, request: Request<Body>) -> Reply {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let body = response.into_body().collect().await.unwrap().to_bytes().to_vec();
    Reply {
        status,
        content_type,
        headers,
        body,
    }
}

async fn get(app: Router, uri: &str) -> Reply {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn post_rpc(app: Router, body: &str) -> Reply {
    let request = Request::post("/rpc")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

// ---------------------------------------------------------------------------
// Lifecycle routes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn status_reports_client_state() {
    let reply = get(app(StubClient::new(ClientStatus::Ready, false)), "/xr/status").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.content_type.starts_with("application/json"));
    assert_eq!(reply.json(), json!("READY"));
}

#[tokio::test]
async fn started_but_not_ready() {
    let client = StubClient::new(ClientStatus::Started, false);
    assert_eq!(get(app(client.clone()), "/xr/isStarted").await.json(), json!(true));
    assert_eq!(get(app(client), "/xr/isReady").await.json(), json!(false));
}

// ---------------------------------------------------------------------------
// Query routes: success
// ---------------------------------------------------------------------------

#[tokio::test]
async fn block_count_returns_number() {
    let client = StubClient::new(ClientStatus::Ready, false);
    let reply = get(app(client.clone()), "/xr/getBlockCount/BLOCK").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.content_type.starts_with("application/json"));
    assert_eq!(reply.json(), json!(1583230));
    assert_eq!(client.calls(), vec!["getBlockCount:BLOCK"]);
}

#[tokio::test]
async fn block_hash_parses_height() {
    let client = StubClient::new(ClientStatus::Ready, false);
    let reply = get(app(client.clone()), "/xr/getBlockHash/BTC/600000").await;
    assert_eq!(reply.json(), json!("hash-BTC-600000"));
    assert_eq!(client.calls(), vec!["getBlockHash:BTC:600000"]);
}

#[tokio::test]
async fn block_and_transaction_documents() {
    let client = StubClient::new(ClientStatus::Ready, false);
    let block = get(app(client.clone()), "/xr/getBlock/BTC/00000abc").await.json();
    assert_eq!(block["hash"], json!("00000abc"));

    let tx = get(app(client), "/xr/getTransaction/LTC/deadbeef").await.json();
    assert_eq!(tx["txid"], json!("deadbeef"));
    assert_eq!(tx["confirmations"], json!(6));
}

#[tokio::test]
async fn multi_item_routes_split_ids() {
    let client = StubClient::new(ClientStatus::Ready, false);
    let blocks = get(app(client.clone()), "/xr/getBlocks/BLOCK/aa,bb").await.json();
    assert_eq!(blocks, json!([{"hash": "aa"}, {"hash": "bb"}]));

    let txs = get(app(client), "/xr/getTransactions/BLOCK/t1,t2,t3").await.json();
    assert_eq!(txs.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn decode_raw_transaction_returns_document() {
    let client = StubClient::new(ClientStatus::Ready, false);
    let decoded = get(app(client), "/xr/decodeRawTransaction/BLOCK/0100").await.json();
    assert_eq!(decoded["hex"], json!("0100"));
}

// ---------------------------------------------------------------------------
// Query routes: failures become defaults
// ---------------------------------------------------------------------------

#[tokio::test]
async fn failures_answer_with_defaults() {
    let client = StubClient::new(ClientStatus::Ready, true);
    let cases = [
        ("/xr/getBlockCount/BLOCK", "0"),
        ("/xr/getBlockHash/BLOCK/10", "\"\""),
        ("/xr/getBlock/BLOCK/abc", "{}"),
        ("/xr/getBlocks/BLOCK/abc,def", "[]"),
        ("/xr/getTransaction/BLOCK/abc", "{}"),
        ("/xr/getTransactions/BLOCK/abc", "[]"),
        ("/xr/decodeRawTransaction/BLOCK/00", "{}"),
    ];

    for (uri, expected) in cases {
        let reply = get(app(client.clone()), uri).await;
        assert_eq!(reply.status, StatusCode::OK, "status for {}", uri);
        assert!(reply.content_type.starts_with("application/json"), "type for {}", uri);
        assert_eq!(reply.text(), expected, "body for {}", uri);
    }
    assert_eq!(client.calls().len(), cases.len());
}

#[tokio::test]
async fn non_numeric_height_answers_empty_hash_without_calling_router() {
    let client = StubClient::new(ClientStatus::Ready, false);
    let reply = get(app(client.clone()), "/xr/getBlockHash/BLOCK/tip").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.text(), "\"\"");
    assert!(client.calls().is_empty());
}

// ---------------------------------------------------------------------------
// Pages, static files, CORS
// ---------------------------------------------------------------------------

#[tokio::test]
async fn index_is_html() {
    let reply = get(app(StubClient::new(ClientStatus::Stopped, false)), "/").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.content_type.starts_with("text/html"));
    assert!(reply.text().contains("XRouter Gateway"));
}

#[tokio::test]
async fn custom_index_replaces_builtin_page() {
    let mut state = AppState::new(StubClient::new(ClientStatus::Stopped, false));
    state.index_html = Arc::from("<h1>custom</h1>");
    let reply = get(build_router(state, None), "/").await;
    assert_eq!(reply.text(), "<h1>custom</h1>");
}

#[tokio::test]
async fn gateway_server_builds_its_router_from_settings() {
    let config = RpcConfig {
        host: "127.0.0.1".to_string(),
        port: 45900,
    };
    let server = GatewayServer::new(config, StubClient::new(ClientStatus::Ready, false))
        .with_index_html("<h1>gateway</h1>".to_string());
    assert_eq!(server.config().host, "127.0.0.1");
    assert_eq!(server.config().port, 45900);

    assert_eq!(get(server.router(), "/").await.text(), "<h1>gateway</h1>");
    assert_eq!(get(server.router(), "/xr/isReady").await.json(), json!(true));
}

#[tokio::test]
async fn route_source_is_plain_text() {
    let reply = get(app(StubClient::new(ClientStatus::Stopped, false)), "/server.rs").await;
    assert!(reply.content_type.starts_with("text/plain"));
    assert!(reply.text().contains("/xr/getBlockCount/{wallet}"));
}

#[tokio::test]
async fn public_dir_serves_static_files() {
    let dir = std::env::temp_dir().join(format!("xrgate_public_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("style.css"), "body { margin: 0; }").unwrap();

    let state = AppState::new(StubClient::new(ClientStatus::Stopped, false));
    let router = build_router(state.clone(), Some(dir.as_path()));
    let reply = get(router, "/style.css").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.text(), "body { margin: 0; }");

    let router = build_router(state, Some(dir.as_path()));
    assert_eq!(get(router, "/missing.png").await.status, StatusCode::NOT_FOUND);

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn shipped_public_dir_serves_favicon_and_stylesheet() {
    let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../public");
    let state = AppState::new(StubClient::new(ClientStatus::Stopped, false));

    let reply = get(build_router(state.clone(), Some(dir.as_path())), "/favicon.ico").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.content_type.starts_with("image/"));
    assert_eq!(&reply.body[..4], &[0, 0, 1, 0]);

    let reply = get(build_router(state, Some(dir.as_path())), "/style.css").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.content_type.starts_with("text/css"));
}

#[tokio::test]
async fn unknown_path_without_public_dir_is_404() {
    let reply = get(app(StubClient::new(ClientStatus::Stopped, false)), "/nope").await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let request = Request::get("/xr/status")
        .header(header::ORIGIN, "https://explorer.example")
        .body(Body::empty())
        .unwrap();
    let reply = send(app(StubClient::new(ClientStatus::Ready, false)), request).await;
    assert_eq!(
        reply
            .headers
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

// ---------------------------------------------------------------------------
// JSON-RPC endpoint
// ---------------------------------------------------------------------------

#[tokio::test]
async fn rpc_named_params() {
    let client = StubClient::new(ClientStatus::Ready, false);
    let reply = post_rpc(
        app(client),
        r#"{"method":"getBlockHash","params":{"wallet":"BLOCK","height":42},"id":7}"#,
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);
    let body = reply.json();
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["result"], json!("hash-BLOCK-42"));
    assert_eq!(body["error"], Value::Null);
    assert_eq!(body["id"], json!(7));
}

#[tokio::test]
async fn rpc_positional_params() {
    let client = StubClient::new(ClientStatus::Ready, false);
    let reply = post_rpc(
        app(client),
        r#"{"method":"getTransactions","params":["BLOCK",["a","b"]]}"#,
    )
    .await;
    let body = reply.json();
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["result"], json!([{"txid": "a"}, {"txid": "b"}]));
}

#[tokio::test]
async fn rpc_echoes_explicit_null_id() {
    let client = StubClient::new(ClientStatus::Ready, false);
    let reply = post_rpc(
        app(client),
        r#"{"method":"getBlockCount","params":["BLOCK"],"id":null}"#,
    )
    .await;
    let body = reply.json();
    assert_eq!(body["result"], json!(1583230));
    assert_eq!(body.get("id"), Some(&Value::Null));

    let client = StubClient::new(ClientStatus::Ready, false);
    let reply = post_rpc(app(client), r#"{"method":"isReady"}"#).await;
    assert!(reply.json().get("id").is_none());
}

#[tokio::test]
async fn rpc_status_needs_no_params() {
    let reply = post_rpc(
        app(StubClient::new(ClientStatus::Started, false)),
        r#"{"method":"status"}"#,
    )
    .await;
    assert_eq!(reply.json()["result"], json!("STARTED"));
}

#[tokio::test]
async fn rpc_router_failure_carries_fallback() {
    let client = StubClient::new(ClientStatus::Ready, true);
    let reply = post_rpc(app(client), r#"{"method":"getBlockCount","params":{"wallet":"BTC"}}"#).await;
    assert_eq!(reply.status, StatusCode::OK);
    let body = reply.json();
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["result"], json!(0));
    assert!(body["error"].as_str().unwrap().contains("1004"));
}

#[tokio::test]
async fn rpc_rejects_unknown_methods_and_bad_params() {
    let client = StubClient::new(ClientStatus::Ready, false);
    let unknown = post_rpc(app(client.clone()), r#"{"method":"sendTransaction","params":[]}"#)
        .await
        .json();
    assert_eq!(unknown["success"], json!(false));
    assert_eq!(unknown["result"], Value::Null);
    assert!(unknown["error"].as_str().unwrap().contains("Unknown method"));

    let bad = post_rpc(app(client.clone()), r#"{"method":"getBlock","params":{"wallet":"BTC"}}"#)
        .await
        .json();
    assert_eq!(bad["success"], json!(false));
    assert!(bad["error"].as_str().unwrap().contains("deserialize"));
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn rpc_malformed_body_is_an_envelope_error() {
    let reply = post_rpc(app(StubClient::new(ClientStatus::Ready, false)), "{not json").await;
    assert_eq!(reply.status, StatusCode::OK);
    let body = reply.json();
    assert_eq!(body["success"], json!(false));
    assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON-RPC request"));
}

#[tokio::test]
async fn rpc_batch_answers_in_order() {
    let client = StubClient::new(ClientStatus::Ready, false);
    let reply = post_rpc(
        app(client),
        r#"[{"method":"isReady","id":1},{"method":"getBlockCount","params":["BLOCK"],"id":2},{"bogus":true}]"#,
    )
    .await;
    let body = reply.json();
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["result"], json!(true));
    assert_eq!(items[0]["id"], json!(1));
    assert_eq!(items[1]["result"], json!(1583230));
    assert_eq!(items[2]["success"], json!(false));
}
