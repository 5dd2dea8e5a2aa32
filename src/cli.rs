use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use log::error;

use crate::config::TrackerConfig;
use crate::fetch::QuoteSource;
use crate::symbol::Symbol;
use crate::tracker::{TrackReport, Tracker};

#[derive(Parser, Debug)]
#[command(name = "crypto-tracker")]
#[command(about = "Fetch and analyze cryptocurrency prices.")]
#[command(version)]
pub struct Cli {
    /// One or more crypto symbols (e.g. BTC ETH dogecoin).
    #[arg(required = true)]
    pub symbols: Vec<String>,

    /// After fetching, export history to CSV.
    #[arg(short, long)]
    pub export: bool,

    /// Directory for history and CSV files [default: current directory]
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Log file path [default: logs/tracker.log]
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Command-line flags win over environment and built-in settings.
    pub fn apply(&self, config: &mut TrackerConfig) {
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        if let Some(file) = &self.log_file {
            config.log_file = file.clone();
        }
    }
}

/// Per-run tally of symbols processed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub succeeded: usize,
    pub failed: usize,
}

/// Track every symbol in turn, printing a price and stats line for each.
///
/// A failed fetch prints an error line and moves on to the next symbol.
pub fn fetch_and_report<Q, W>(
    tracker: &Tracker<Q>,
    symbols: &[String],
    export: bool,
    out: &mut W,
) -> io::Result<RunSummary>
where
    Q: QuoteSource,
    W: Write,
{
    let mut summary = RunSummary::default();

    for raw in symbols {
        let symbol = match Symbol::parse(raw) {
            Ok(symbol) => symbol,
            Err(err) => {
                error!("[{raw}] Invalid symbol: {err}");
                writeln!(out, "Error fetching {raw}: {err}")?;
                summary.failed += 1;
                continue;
            }
        };

        match tracker.track(&symbol, export) {
            Ok(report) => {
                write_report(out, raw, &report)?;
                summary.succeeded += 1;
            }
            Err(failure) => {
                if failure.load_failed() {
                    write_load_warning(out, raw)?;
                }
                writeln!(out, "Error fetching {raw}: {}", failure.error)?;
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

fn write_report<W: Write>(out: &mut W, raw: &str, report: &TrackReport) -> io::Result<()> {
    if report.load_failed() {
        write_load_warning(out, raw)?;
    }

    writeln!(out, "{}: ${:.4}", report.symbol.display(), report.price)?;

    if report.save_failed() {
        writeln!(out, "Warning: Could not save history for {raw}.")?;
    }

    writeln!(
        out,
        "  • Min: {}, Max: {}, Avg: {}",
        money(report.stats.min),
        money(report.stats.max),
        money(report.stats.avg)
    )?;

    if let Some(path) = &report.exported_to {
        writeln!(out, "  • Exported CSV to {}", path.display())?;
    } else if report.export_failed() {
        writeln!(out, "Warning: Could not export CSV for {raw}.")?;
    }

    Ok(())
}

fn write_load_warning<W: Write>(out: &mut W, raw: &str) -> io::Result<()> {
    writeln!(out, "Warning: Could not load history for {raw}. Starting fresh.")
}

fn money(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("${v:.4}"),
        None => "n/a".to_string(),
    }
}
