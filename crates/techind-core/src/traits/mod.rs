//! Core traits for the indicator engine.

mod indicator;

pub use indicator::{validate_period, Indicator, MultiOutputIndicator, StreamingIndicator};
