use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::StorageError;

/// One recorded quote. Persisted as a `[timestamp, price]` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "(String, f64)", into = "(String, f64)")]
pub struct Observation {
    pub timestamp: String,
    pub price: f64,
}

impl Observation {
    pub fn new(timestamp: impl Into<String>, price: f64) -> Self {
        Self {
            timestamp: timestamp.into(),
            price,
        }
    }
}

impl From<(String, f64)> for Observation {
    fn from((timestamp, price): (String, f64)) -> Self {
        Self { timestamp, price }
    }
}

impl From<Observation> for (String, f64) {
    fn from(observation: Observation) -> Self {
        (observation.timestamp, observation.price)
    }
}

/// Chronological price observations for a single symbol.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    observations: Vec<Observation>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, observation: Observation) {
        self.observations.push(observation);
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn prices(&self) -> impl Iterator<Item = f64> + '_ {
        self.observations.iter().map(|observation| observation.price)
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

impl From<Vec<Observation>> for History {
    fn from(observations: Vec<Observation>) -> Self {
        Self { observations }
    }
}

impl FromIterator<Observation> for History {
    fn from_iter<I: IntoIterator<Item = Observation>>(iter: I) -> Self {
        Self {
            observations: iter.into_iter().collect(),
        }
    }
}

/// Read a history file. `Ok(None)` means nothing has been recorded yet.
pub fn read_history(path: &Path) -> Result<Option<History>, StorageError> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(StorageError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let history = serde_json::from_str(&data).map_err(|source| StorageError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(history))
}

/// Replace the history file with `history`.
///
/// The JSON goes to a sibling temp file first and is renamed into place, so
/// an interrupted write leaves the previous file intact.
pub fn write_history(path: &Path, history: &History) -> Result<(), StorageError> {
    let json = serde_json::to_string_pretty(history).map_err(|source| StorageError::Encode {
        path: path.to_path_buf(),
        source,
    })?;

    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, json.as_bytes()).map_err(|source| StorageError::Write {
        path: tmp_path.clone(),
        source,
    })?;
    fs::rename(&tmp_path, path).map_err(|source| {
        let _ = fs::remove_file(&tmp_path);
        StorageError::Write {
            path: path.to_path_buf(),
            source,
        }
    })?;
    Ok(())
}
