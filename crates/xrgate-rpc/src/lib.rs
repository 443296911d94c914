// crates/xrgate-rpc/src/lib.rs
//
// xrgate-rpc: HTTP gateway in front of a router client.
//
// Exposes the router client's query methods as REST routes under /xr/ and
// as a generic JSON-RPC endpoint at /rpc, plus the landing page and static
// files. Router failures never reach the caller: every query route answers
// with a fixed default value instead.

pub mod handlers;
pub mod middleware;
pub mod server;

// Re-export the main server types for ergonomic access.
pub use server::{build_router, AppState, GatewayServer, RpcConfig, DEFAULT_PORT};
