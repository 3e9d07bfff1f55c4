//! Candle loading and table output.

mod csv_source;
mod writer;

pub use csv_source::CsvCandleSource;
pub use writer::{to_json_records, write_csv, write_json};

use std::path::Path;
use techind_core::error::DataError;
use techind_core::types::{Candle, SeriesTable};

/// Load candles from a CSV file.
pub fn load_csv(path: &Path) -> Result<Vec<Candle>, DataError> {
    CsvCandleSource::new(path)?.load_all()
}

/// Load a CSV file straight into a series table.
pub fn load_table(path: &Path) -> Result<SeriesTable, DataError> {
    Ok(SeriesTable::from_candles(&load_csv(path)?))
}
