pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod records;
pub mod stats;
pub mod symbol;
pub mod tracker;
pub mod utils;

pub use error::{AppError, Result};
pub use records::{History, HistoryStore, Observation};
pub use stats::Stats;
pub use symbol::Symbol;
pub use tracker::{TrackFailure, TrackReport, Tracker};
