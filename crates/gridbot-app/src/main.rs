//! # gridbot - Queue-driven robot on a 3×3 grid
//!
//! This is the main entry point that wires everything together.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  main.rs (this file) - Dependency Injection & Wiring           │
//! │    │                                                            │
//! │    ├── Creates: InMemorySessionRepository (adapter)            │
//! │    ├── Creates: TokioActuationClock (adapter)                  │
//! │    ├── Creates: GameService (use case)                         │
//! │    └── Runs: The HTTP server                                   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Usage:
//!   gridbot                          - Serve on 127.0.0.1:5000
//!   gridbot --config config.json     - Load settings from a file
//!   gridbot --bind 0.0.0.0:8080      - Override the listen address
//!   gridbot --time-unit-ms 0         - Move without actuation delays

mod config;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use gridbot_adapter::controller::http::router;
use gridbot_adapter::gateway::clock::TokioActuationClock;
use gridbot_adapter::repository::in_memory::InMemorySessionRepository;
use gridbot_usecase::GameService;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::ServiceConfig;

#[derive(Debug, Parser)]
#[command(name = "gridbot")]
#[command(about = "gridbot - Robot move queue service")]
#[command(version)]
struct Cli {
    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on
    #[arg(short, long)]
    bind: Option<SocketAddr>,

    /// Milliseconds per move cost unit
    #[arg(long)]
    time_unit_ms: Option<u64>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    /// File values first, then command-line overrides
    fn load_config(&self) -> anyhow::Result<ServiceConfig> {
        let mut config = match &self.config {
            Some(path) => ServiceConfig::from_file(path)?,
            None => ServiceConfig::default(),
        };

        if let Some(bind) = self.bind {
            config.bind = bind;
        }
        if let Some(time_unit_ms) = self.time_unit_ms {
            config.time_unit_ms = time_unit_ms;
        }
        if let Some(log_level) = &self.log_level {
            config.log_level = log_level.clone();
        }

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.load_config()?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    info!("🤖 gridbot - Robot move queue service");

    // ========================================
    // Dependency Injection - Wire up the system
    // ========================================

    let repository = Arc::new(InMemorySessionRepository::new());
    let clock = Arc::new(TokioActuationClock::new(config.time_unit()));
    let service = Arc::new(GameService::new(repository, clock));
    let app = router(service);

    // ========================================
    // Serve
    // ========================================

    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    info!(
        addr = %listener.local_addr()?,
        time_unit_ms = config.time_unit_ms,
        "listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("gridbot stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "cannot listen for ctrl-c; running until killed");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
