// crates/xrgate-daemon/src/main.rs
//
// Binary entrypoint for the xrgate gateway.
//
// Parses CLI arguments, loads configuration, initializes tracing, checks
// that the gateway port is free, then starts the XRouter client under a
// restart loop while the HTTP gateway serves requests.

mod config;
mod events;
mod logging;
mod port;
mod supervisor;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use config::{expand_tilde, DaemonConfig, Overrides};
use tokio::signal;

use xrgate_client::XRouterClient;
use xrgate_core::{Network, RouterClient};
use xrgate_rpc::GatewayServer;

/// xrgate: HTTP gateway in front of an XRouter client.
#[derive(Parser, Debug)]
#[command(
    name = "xrgate",
    version = "0.1.0",
    about = "HTTP gateway for XRouter blockchain queries"
)]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "~/.xrgate/config.toml")]
    config: String,

    /// Port to listen on. Overrides PORT and the config file.
    #[arg(long)]
    port: Option<u16>,

    /// Router network: mainnet or testnet.
    #[arg(long)]
    network: Option<Network>,

    /// Daemon JSON-RPC URL.
    #[arg(long)]
    rpc_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config_path = expand_tilde(&args.config);

    let loaded = DaemonConfig::load(&config_path);
    let mut daemon_config = match &loaded {
        Ok(cfg) => cfg.clone(),
        Err(_) => DaemonConfig::default(),
    };

    logging::init_logging(&daemon_config.log_level, &daemon_config.log_format);

    match loaded {
        Ok(_) => tracing::info!("Loaded configuration from {}", config_path),
        Err(e) => tracing::warn!(
            "Could not load config from {}: {}. Using defaults.",
            config_path,
            e
        ),
    }

    daemon_config.apply_overrides(Overrides {
        port: args.port,
        port_env: std::env::var("PORT").ok(),
        network: args.network,
        rpc_url: args.rpc_url,
    });

    // Printed directly so log filters and JSON output cannot hide it.
    if let Err(e) = port::ensure_port_free(daemon_config.port).await {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    tracing::info!("xrgate v0.1.0");
    tracing::info!("Network: {}", daemon_config.network);
    tracing::info!("Query nodes per call: {}", daemon_config.query_num);

    let client = match XRouterClient::new(daemon_config.client_config()) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Invalid router client configuration: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!("Daemon RPC: {}", client.config().resolved_rpc_url());
    let client: Arc<dyn RouterClient> = Arc::new(client);

    // ---------------------------------------------------------------
    // Background tasks: event logging and startup supervision.
    // ---------------------------------------------------------------
    let events_handle = tokio::spawn(events::forward_events(client.subscribe()));

    let startup_client = client.clone();
    let restart_delay = Duration::from_millis(daemon_config.restart_delay_ms);
    let startup_handle = tokio::spawn(async move {
        supervisor::run_startup_loop(startup_client, restart_delay).await;
    });

    // ---------------------------------------------------------------
    // HTTP gateway.
    // ---------------------------------------------------------------
    let mut server = GatewayServer::new(daemon_config.rpc_config(), client.clone());

    let public_dir = expand_tilde(&daemon_config.public_dir);
    if Path::new(&public_dir).is_dir() {
        server = server.with_public_dir(public_dir);
    } else {
        tracing::warn!("Public directory {} not found; static files disabled", public_dir);
    }

    if let Some(index_path) = &daemon_config.index_path {
        let index_path = expand_tilde(index_path);
        match std::fs::read_to_string(&index_path) {
            Ok(html) => server = server.with_index_html(html),
            Err(e) => tracing::warn!(
                "Could not read index page {}: {}. Using the built-in page.",
                index_path,
                e
            ),
        }
    }

    tracing::info!(
        "Binding gateway to {}:{}",
        server.config().host,
        server.config().port
    );
    let result = server.start(shutdown_signal()).await;

    startup_handle.abort();
    events_handle.abort();

    if let Err(e) = result {
        tracing::error!("Gateway error: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Resolves on Ctrl-C or, on unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl-C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
