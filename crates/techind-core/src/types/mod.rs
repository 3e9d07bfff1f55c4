//! Core data types for the indicator engine.

mod candle;
mod key;
mod table;

pub use candle::Candle;
pub use key::{ColumnHandle, ColumnKey};
pub use table::SeriesTable;
