use std::sync::Arc;

use anyhow::{Context, Result};
use log::info;

use crypto_tracker::api;
use crypto_tracker::config::TrackerConfig;
use crypto_tracker::fetch::CoinGeckoClient;
use crypto_tracker::logging::{self, LogTarget};
use crypto_tracker::{HistoryStore, Tracker};

fn main() -> Result<()> {
    let config = TrackerConfig::from_env().context("Failed to load configuration")?;
    logging::init(LogTarget::Stderr).context("Failed to initialise logging")?;

    // The blocking client owns its own runtime, so it is built before ours starts.
    let source = CoinGeckoClient::new(&config.api).context("Failed to build HTTP client")?;
    let tracker = Arc::new(Tracker::new(HistoryStore::new(&config.data_dir), source));
    let addr = config.bind_addr()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime.block_on(async {
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;
        info!("Price API listening on http://{addr}");

        axum::serve(listener, api::router(Arc::clone(&tracker)))
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("Server error")
    })?;

    drop(runtime);
    drop(tracker);
    info!("Price API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
