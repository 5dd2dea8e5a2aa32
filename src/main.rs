use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use crypto_tracker::cli::{self, Cli};
use crypto_tracker::config::{validator, TrackerConfig};
use crypto_tracker::fetch::CoinGeckoClient;
use crypto_tracker::logging::{self, LogTarget};
use crypto_tracker::{HistoryStore, Tracker};

fn main() -> Result<()> {
    let args = Cli::parse();

    let mut config = TrackerConfig::from_env().context("Failed to load configuration")?;
    args.apply(&mut config);
    validator::validate_config(&config).context("Invalid configuration")?;

    logging::init(LogTarget::File(config.log_file.clone()))
        .context("Failed to initialise logging")?;

    let source = CoinGeckoClient::new(&config.api).context("Failed to build HTTP client")?;
    let tracker = Tracker::new(HistoryStore::new(&config.data_dir), source);
    info!("History directory: {}", tracker.store().data_dir().display());

    let stdout = io::stdout();
    let summary = cli::fetch_and_report(&tracker, &args.symbols, args.export, &mut stdout.lock())
        .context("Failed to write report")?;

    info!(
        "Run finished: {} succeeded, {} failed",
        summary.succeeded, summary.failed
    );
    Ok(())
}
