//! Session Cache - storefront session host
//!
//! Runs the storefront's per-user product session caches until asked to stop.

use anyhow::Context;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use session_cache::{CacheConfig, Storefront};

/// Main entry point.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load cache configuration from environment variables
/// 3. Create the storefront session caches (starts their sweepers)
/// 4. Wait for SIGINT/SIGTERM
/// 5. Stop every cache and wait for the sweepers to exit
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "session_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting storefront session cache");

    let config = CacheConfig::from_env().context("Failed to load cache configuration")?;
    info!(
        "Configuration loaded: ttl={}s, sweep_interval={}s",
        config.ttl.as_secs(),
        config.sweep_interval.as_secs()
    );

    let storefront = Storefront::new(&config);
    info!("Session caches initialized");

    shutdown_signal().await?;

    storefront.shutdown().await;
    info!("Shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() -> anyhow::Result<()> {
    let ctrl_c = async { signal::ctrl_c().await.context("Failed to install Ctrl+C handler") };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .context("Failed to install SIGTERM handler")?
            .recv()
            .await;
        Ok::<(), anyhow::Error>(())
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<anyhow::Result<()>>();

    tokio::select! {
        result = ctrl_c => {
            result?;
            info!("Received Ctrl+C, initiating shutdown...");
        }
        result = terminate => {
            result?;
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    Ok(())
}
