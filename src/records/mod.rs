use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StorageError;
use crate::symbol::Symbol;

pub mod csv_export;
pub mod history;

pub use history::{History, Observation};

/// Facade over the per-symbol history and CSV files kept under one directory.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    data_dir: PathBuf,
}

impl HistoryStore {
    pub fn new<P: Into<PathBuf>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn history_path(&self, symbol: &Symbol) -> PathBuf {
        self.data_dir.join(format!("{}_history.json", symbol.key()))
    }

    pub fn csv_path(&self, symbol: &Symbol) -> PathBuf {
        self.data_dir.join(format!("{}_history.csv", symbol.key()))
    }

    /// Load the recorded history, or an empty one if the symbol is new.
    pub fn load(&self, symbol: &Symbol) -> Result<History, StorageError> {
        let history = history::read_history(&self.history_path(symbol))?;
        Ok(history.unwrap_or_default())
    }

    /// Overwrite the persisted history with `history`.
    pub fn save(&self, symbol: &Symbol, history: &History) -> Result<(), StorageError> {
        self.prepare()?;
        history::write_history(&self.history_path(symbol), history)
    }

    /// Write the CSV export and return where it landed.
    pub fn export(&self, symbol: &Symbol, history: &History) -> Result<PathBuf, StorageError> {
        self.prepare()?;
        let path = self.csv_path(symbol);
        csv_export::write_csv(&path, history)?;
        Ok(path)
    }

    fn prepare(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.data_dir).map_err(|source| StorageError::Write {
            path: self.data_dir.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbol(raw: &str) -> Symbol {
        Symbol::parse(raw).unwrap()
    }

    #[test]
    fn paths_use_lowercase_symbol() {
        let store = HistoryStore::new("/data");
        let btc = symbol("BTC");
        assert_eq!(store.history_path(&btc), Path::new("/data/btc_history.json"));
        assert_eq!(store.csv_path(&btc), Path::new("/data/btc_history.csv"));
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path());
        let eth = symbol("eth");
        let history = History::from(vec![
            Observation::new("2024-01-01T00:00:00.000001", 2250.125),
            Observation::new("2024-01-01T00:00:01.500000", 0.5),
            Observation::new("2024-01-01T00:00:02", 64000.75),
        ]);

        store.save(&eth, &history).unwrap();
        let loaded = store.load(&eth).unwrap();

        assert_eq!(loaded, history);
    }

    #[test]
    fn full_precision_prices_survive_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path());
        let btc = symbol("btc");

        // xorshift64 keeps the sample deterministic across runs.
        let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
        let history: History = (0..20_000)
            .map(|idx| {
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                let unit = (state >> 11) as f64 / (1u64 << 53) as f64;
                Observation::new(format!("t{idx}"), unit * 100_000.0)
            })
            .collect();

        store.save(&btc, &history).unwrap();
        let loaded = store.load(&btc).unwrap();

        let drifted: Vec<(f64, f64)> = history
            .prices()
            .zip(loaded.prices())
            .filter(|(saved, read)| saved.to_bits() != read.to_bits())
            .take(5)
            .collect();
        assert!(drifted.is_empty(), "prices drifted on reload: {drifted:?}");
        assert_eq!(loaded.len(), history.len());
    }

    #[test]
    fn load_without_prior_data_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("not_created_yet"));

        let loaded = store.load(&symbol("doge")).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn save_replaces_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path());
        let sol = symbol("sol");

        store
            .save(&sol, &History::from(vec![Observation::new("a", 1.0)]))
            .unwrap();
        let replacement = History::from(vec![Observation::new("b", 2.0)]);
        store.save(&sol, &replacement).unwrap();

        assert_eq!(store.load(&sol).unwrap(), replacement);
    }

    #[test]
    fn symbols_differing_in_case_share_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path());
        let history = History::from(vec![Observation::new("t", 5.0)]);

        store.save(&symbol("Btc"), &history).unwrap();
        assert_eq!(store.load(&symbol("BTC")).unwrap(), history);
    }

    #[test]
    fn export_writes_single_observation() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path());
        let history = History::from(vec![Observation::new("2024-01-01T00:00:00", 42.5)]);

        let path = store.export(&symbol("btc"), &history).unwrap();

        let contents = fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines, vec!["Timestamp,Price", "2024-01-01T00:00:00,42.5"]);
    }
}
