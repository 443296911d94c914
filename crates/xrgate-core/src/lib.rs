// crates/xrgate-core/src/lib.rs
//
// xrgate-core: Core types and trait interfaces for the xrgate gateway.
//
// This is the leaf crate that the other workspace crates depend on. It
// defines the error type, router-client trait, client status and event
// types, and the client configuration shared by the client and the daemon.

pub mod config;
pub mod error;
pub mod events;
pub mod status;
pub mod traits;

// Re-export key types for ergonomic access from downstream crates.
// Usage: `use xrgate_core::RouterClient;`

pub use config::{ClientConfig, Network, DEFAULT_QUERY_NUM};
pub use error::GatewayError;
pub use events::{ClientEvent, EventLevel};
pub use status::ClientStatus;
pub use traits::RouterClient;
