//! Demo server protected against DNS rebinding.
//!
//! ```text
//!     Client Request                ┌──────────────────────────────────┐
//!     ─────────────────────────────▶│ TraceLayer                       │
//!                                   │   ▼                              │
//!                                   │ HostGuardLayer ── Host ∉ list ──▶│── rejection status
//!                                   │   ▼ Host ∈ list                  │
//!                                   │ hello handler {"hello":"world"}  │
//!                                   └──────────────────────────────────┘
//! ```
//!
//! Configuration comes from an optional TOML file; command-line flags
//! override it. The server refuses to start without at least one host.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use host_guard::config::{parse_config, validate_config, ConfigError, ServerConfig};
use host_guard::lifecycle::{signals, Shutdown};
use host_guard::observability::init_logging;
use host_guard::HttpServer;

#[derive(Parser)]
#[command(name = "host-guard")]
#[command(about = "HTTP server that rejects requests for unexpected Host headers", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Allowed Host header value (repeatable). Replaces the configured list.
    #[arg(long = "host", value_name = "HOST")]
    hosts: Vec<String>,

    /// Status code for rejected requests.
    #[arg(long, value_name = "CODE")]
    rejection_status: Option<u16>,

    /// Bind address, e.g. 127.0.0.1:3000.
    #[arg(long, value_name = "ADDR")]
    bind: Option<String>,
}

impl Cli {
    fn into_config(self) -> Result<ServerConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => parse_config(&std::fs::read_to_string(path)?)?,
            None => ServerConfig::default(),
        };

        if !self.hosts.is_empty() {
            config.guard.hosts = self.hosts;
        }
        if let Some(status) = self.rejection_status {
            config.guard.rejection_status = status;
        }
        if let Some(bind) = self.bind {
            config.listener.bind_address = bind;
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Cli::parse().into_config()?;

    init_logging(&config.observability)?;

    tracing::info!("host-guard v{} starting", env!("CARGO_PKG_VERSION"));

    let server = HttpServer::new(config)?;

    let listener = TcpListener::bind(&server.config().listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(shutdown.clone());

    server.run(listener, shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
