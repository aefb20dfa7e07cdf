//! vitals — a live terminal dashboard for host health metrics.
//!
//! Run with:  `RUST_LOG=info vitals`

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use vitals_config::MonitorConfig;
use vitals_core::VitalsError;

/// Live terminal dashboard for host health metrics.
#[derive(Debug, Parser)]
#[command(name = "vitals", version, about)]
struct Cli {
    /// Seconds between sampling cycles.
    #[arg(long, default_value_t = 1.0)]
    interval: f64,

    /// Samples kept per metric for the sparklines.
    #[arg(long, default_value_t = 20)]
    history: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Structured logging to stderr — the TUI owns stdout while running.
    // RUST_LOG controls verbosity (default: info).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Arc::new(MonitorConfig {
        refresh_interval: Duration::from_secs_f64(cli.interval.max(0.1)),
        history_size: cli.history.max(1),
        ..MonitorConfig::default()
    });

    tracing::info!("vitals v{} starting", env!("CARGO_PKG_VERSION"));

    match vitals_tui::run(config).await {
        Err(VitalsError::NoCollectors) => {
            eprintln!("No collectors available.");
            std::process::exit(1);
        }
        other => other.map_err(Into::into),
    }
}
