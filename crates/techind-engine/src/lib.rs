//! Indicator engine.
//!
//! [`IndicatorEngine`] borrows a [`SeriesTable`](techind_core::SeriesTable)
//! mutably and appends indicator columns to it, one call per indicator
//! family. Each call returns typed handles to the columns it wrote, so later
//! calls (such as the lag/diff transform) can target them exactly.

mod engine;
mod handles;

pub use engine::{IndicatorEngine, DEFAULT_DIGITS, RCI_RANGE_OFFSET};
pub use handles::{MacdHandles, ShiftHandles, StochasticHandles};
