//! Lag and difference transforms.

use techind_core::numeric::{sub, Cell};
use techind_core::traits::{validate_period, Indicator};
use techind_core::IndicatorError;

/// Lag a series by a fixed number of rows.
///
/// Row `i` takes the value of row `i - lag`; the first `lag` rows are
/// undefined.
#[derive(Debug, Clone)]
pub struct Shift {
    lag: usize,
}

impl Shift {
    /// Create a new lag transform.
    pub fn new(lag: usize) -> Result<Self, IndicatorError> {
        validate_period("Shift", lag, 1)?;
        Ok(Self { lag })
    }

    /// The previous-row lag.
    pub fn previous() -> Self {
        Self { lag: 1 }
    }
}

impl Indicator for Shift {
    fn calculate(&self, data: &[Cell]) -> Vec<Cell> {
        let lag = self.lag.min(data.len());
        std::iter::repeat(None)
            .take(lag)
            .chain(data[..data.len() - lag].iter().copied())
            .collect()
    }

    fn lookback(&self) -> usize {
        self.lag
    }

    fn name(&self) -> &str {
        "Shift"
    }
}

/// Element-wise `current - previous`, undefined where either side is.
pub fn diff(current: &[Cell], previous: &[Cell]) -> Vec<Cell> {
    current
        .iter()
        .zip(previous.iter())
        .map(|(&c, &p)| sub(c, p))
        .collect()
}
