//! Core types and traits for the indicator engine.
//!
//! This crate provides the foundational building blocks including:
//! - Candle data and the column-oriented `SeriesTable`
//! - Typed column identities (`ColumnKey`, `ColumnHandle`)
//! - Total numeric helpers over undefined (`None`) cells
//! - The `Indicator` traits implemented by the indicator crate

pub mod error;
pub mod numeric;
pub mod traits;
pub mod types;

pub use error::{DataError, Error, IndicatorError, Result};
pub use traits::*;
pub use types::*;
