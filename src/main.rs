//! APRS.fi API proxy
//!
//! # Architecture Overview
//!
//! ```text
//!                         ┌──────────────────────────────────────────────┐
//!                         │                 APRSFI-PROXY                 │
//!     Client Request      │  ┌─────────┐   ┌──────────┐   ┌───────────┐  │
//!     ────────────────────┼─▶│  http   │──▶│ routing  │──▶│  params   │  │
//!                         │  │ server  │   │ classify │   │ sanitize  │  │
//!                         │  └─────────┘   └──────────┘   │ validate  │  │
//!                         │                               └─────┬─────┘  │
//!                         │                                     ▼        │
//!     Client Response     │  ┌─────────┐   ┌──────────┐   ┌───────────┐  │
//!     ◀───────────────────┼──│response │◀──│  proxy   │◀──│ upstream  │◀─┼── APRS.fi
//!                         │  │ + cors  │   │ pipeline │   │  client   │  │   API
//!                         │  └─────────┘   └──────────┘   └───────────┘  │
//!                         │                                              │
//!                         │  config · observability · resilience ·       │
//!                         │  lifecycle                                   │
//!                         └──────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use aprsfi_proxy::lifecycle::{startup, wait_for_signal, Shutdown};
use aprsfi_proxy::observability::{init_logging, metrics};
use aprsfi_proxy::{HttpServer, SERVICE_NAME, SERVICE_VERSION};

#[derive(Parser)]
#[command(name = "aprsfi-proxy")]
#[command(version, about = "Credential-injecting proxy for the APRS.fi API", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long, env = "APRSFI_PROXY_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = startup::resolve_config(cli.config.as_deref(), cli.bind.as_deref())?;
    init_logging(&config.observability);

    tracing::info!("{} v{} starting", SERVICE_NAME, SERVICE_VERSION);
    startup::log_config(&config);

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        wait_for_signal().await;
        shutdown.trigger();
    });

    let server = HttpServer::new(config)?;
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
