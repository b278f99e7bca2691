//! Persistence maintenance host entry point
//!
//! Run with:
//! ```bash
//! cargo run -p persist-maintenance
//! ```
//!
//! Configuration is loaded from `persist.toml`, `.env` and `PERSIST_*`
//! environment variables. The provider itself reads `DATABASE_URL`.

use persist_common::{try_init_tracing_with_config, HostConfig};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    // Load configuration before tracing so the log level is known
    let config = match HostConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    // Initialize tracing
    match config.telemetry.tracing_config() {
        Ok(tracing_config) => {
            if let Err(e) = try_init_tracing_with_config(tracing_config) {
                eprintln!("Warning: Failed to initialize tracing: {e}");
            }
        }
        Err(e) => eprintln!("Warning: Invalid telemetry settings: {e}"),
    }

    if let Err(e) = run(config).await {
        error!(error = %e, "Maintenance host failed");
        std::process::exit(1);
    }
}

async fn run(config: HostConfig) -> anyhow::Result<()> {
    info!(
        database_type = %config.database.database_type,
        interval_secs = config.maintenance.optimise_interval_secs,
        optimise_on_start = config.maintenance.optimise_on_start,
        "Starting persistence maintenance host..."
    );

    let cancel = CancellationToken::new();
    let shutdown = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Shutdown signal received");
                shutdown.cancel();
            }
            Err(e) => warn!(error = %e, "Failed to listen for shutdown signal"),
        }
    });

    persist_maintenance::run(config, cancel).await?;

    info!("Maintenance host stopped");
    Ok(())
}
