use std::path::Path;

use crate::error::StorageError;

use super::history::History;

pub const CSV_HEADER: [&str; 2] = ["Timestamp", "Price"];

/// Write `history` as `Timestamp,Price` rows in recorded order.
pub fn write_csv(path: &Path, history: &History) -> Result<(), StorageError> {
    let to_err = |source: csv::Error| StorageError::Export {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(to_err)?;

    writer.write_record(CSV_HEADER).map_err(to_err)?;
    for observation in history.observations() {
        writer
            .write_record([
                observation.timestamp.as_str(),
                format_price(observation.price).as_str(),
            ])
            .map_err(to_err)?;
    }

    writer.flush().map_err(|source| StorageError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

// Shortest round-trip form, always with a fractional part (`100.0`, `42.5`).
fn format_price(price: f64) -> String {
    format!("{price:?}")
}
