// crates/xrgate-client/src/lib.rs
//
// xrgate-client: XRouter client backed by a Blocknet daemon.
//
// The daemon runs the XRouter protocol itself (service node discovery,
// fan-out, consensus over the answers). This crate speaks the daemon's
// JSON-RPC interface and exposes it through `xrgate_core::RouterClient`.

pub mod client;
pub mod reply;
pub mod rpc;

pub use client::XRouterClient;
pub use rpc::DaemonRpc;
