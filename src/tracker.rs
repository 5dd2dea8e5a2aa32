use std::path::PathBuf;

use log::{error, info, warn};

use crate::error::{FetchError, StorageError};
use crate::fetch::QuoteSource;
use crate::records::{HistoryStore, Observation};
use crate::stats::{self, Stats};
use crate::symbol::Symbol;
use crate::utils::observation_timestamp;

/// Non-fatal storage problem encountered while tracking a symbol.
#[derive(Debug)]
pub enum TrackWarning {
    Load(StorageError),
    Save(StorageError),
    Export(StorageError),
}

/// Outcome of one successful fetch for a symbol.
#[derive(Debug)]
pub struct TrackReport {
    pub symbol: Symbol,
    pub price: f64,
    pub stats: Stats,
    pub observations: usize,
    pub exported_to: Option<PathBuf>,
    pub warnings: Vec<TrackWarning>,
}

/// A fetch that failed, plus any storage warnings raised before it.
#[derive(Debug)]
pub struct TrackFailure {
    pub error: FetchError,
    pub warnings: Vec<TrackWarning>,
}

impl TrackFailure {
    pub fn load_failed(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| matches!(w, TrackWarning::Load(_)))
    }
}

impl TrackReport {
    pub fn load_failed(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| matches!(w, TrackWarning::Load(_)))
    }

    pub fn save_failed(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| matches!(w, TrackWarning::Save(_)))
    }

    pub fn export_failed(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| matches!(w, TrackWarning::Export(_)))
    }
}

/// Runs the load, fetch, save, stats cycle for one symbol at a time.
///
/// Storage failures are logged and carried in the report; only a failed
/// fetch aborts, and it does so before anything is written.
pub struct Tracker<Q> {
    store: HistoryStore,
    source: Q,
}

impl<Q: QuoteSource> Tracker<Q> {
    pub fn new(store: HistoryStore, source: Q) -> Self {
        Self { store, source }
    }

    pub fn store(&self) -> &HistoryStore {
        &self.store
    }

    pub fn source(&self) -> &Q {
        &self.source
    }

    pub fn track(&self, symbol: &Symbol, export: bool) -> Result<TrackReport, TrackFailure> {
        let mut warnings = Vec::new();

        let mut history = match self.store.load(symbol) {
            Ok(history) => history,
            Err(err) => {
                warn!("[{symbol}] Failed to load history: {err}");
                warnings.push(TrackWarning::Load(err));
                Default::default()
            }
        };

        let price = match self.source.fetch(symbol) {
            Ok(price) => price,
            Err(error) => {
                error!("[{symbol}] Fetch error: {error}");
                return Err(TrackFailure { error, warnings });
            }
        };
        info!("[{symbol}] Fetched price: ${price:.4}");
        history.push(Observation::new(observation_timestamp(), price));

        if let Err(err) = self.store.save(symbol, &history) {
            warn!("[{symbol}] Failed to save history: {err}");
            warnings.push(TrackWarning::Save(err));
        }

        let stats = stats::compute(&history);

        let mut exported_to = None;
        if export {
            match self.store.export(symbol, &history) {
                Ok(path) => {
                    info!("[{symbol}] Exported CSV to {}", path.display());
                    exported_to = Some(path);
                }
                Err(err) => {
                    warn!("[{symbol}] CSV export error: {err}");
                    warnings.push(TrackWarning::Export(err));
                }
            }
        }

        Ok(TrackReport {
            symbol: symbol.clone(),
            price,
            stats,
            observations: history.len(),
            exported_to,
            warnings,
        })
    }
}
