//! Indicator trait definitions.

use crate::error::IndicatorError;
use crate::numeric::Cell;

/// Trait for technical indicators.
///
/// Indicators map a series of cells to a derived series of the same length.
/// Rows without enough history are `None`.
pub trait Indicator: Send + Sync {
    /// Calculate indicator values for the given data.
    ///
    /// # Arguments
    /// * `data` - Input series (typically close prices)
    ///
    /// # Returns
    /// A series aligned row-for-row with `data`
    fn calculate(&self, data: &[Cell]) -> Vec<Cell>;

    /// Number of leading rows that stay undefined on a fully defined input.
    fn lookback(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;
}

/// Multi-output indicator (e.g., MACD, Stochastic).
///
/// Some indicators produce multiple related series.
pub trait MultiOutputIndicator: Send + Sync {
    /// The output type containing multiple aligned series.
    type Outputs;

    /// Calculate indicator values for the given data.
    fn calculate(&self, data: &[Cell]) -> Self::Outputs;

    /// Number of leading rows that stay undefined on a fully defined input.
    fn lookback(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;
}

/// Streaming indicator that maintains internal state.
///
/// Unlike batch indicators, streaming indicators can be updated
/// incrementally with new data points.
pub trait StreamingIndicator: Send + Sync {
    /// Update the indicator with a new value.
    ///
    /// An undefined input resets the state and yields `None`.
    fn update(&mut self, value: Cell) -> Cell;

    /// Get the current value without adding new data.
    fn current(&self) -> Cell;

    /// Reset the indicator state.
    fn reset(&mut self);

    /// Check if the indicator has enough data to produce values.
    fn is_ready(&self) -> bool;

    /// Get the minimum data points required.
    fn period(&self) -> usize;
}

/// Check that `period` is at least `min`.
pub fn validate_period(indicator: &str, period: usize, min: usize) -> Result<(), IndicatorError> {
    if period < min {
        return Err(IndicatorError::InvalidParameter(format!(
            "{} period must be at least {}, got {}",
            indicator, min, period
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestIndicator {
        period: usize,
    }

    impl Indicator for TestIndicator {
        fn calculate(&self, data: &[Cell]) -> Vec<Cell> {
            // Rolling sum for testing
            (0..data.len())
                .map(|i| {
                    if i + 1 < self.period {
                        return None;
                    }
                    data[i + 1 - self.period..=i].iter().copied().sum()
                })
                .collect()
        }

        fn lookback(&self) -> usize {
            self.period - 1
        }

        fn name(&self) -> &str {
            "test"
        }
    }

    #[test]
    fn test_validate_period() {
        assert!(validate_period("RCI", 1, 2).is_err());
        assert!(validate_period("SMA", 0, 1).is_err());
        assert!(validate_period("SMA", 3, 1).is_ok());
    }

    #[test]
    fn test_indicator_calculate() {
        let indicator = TestIndicator { period: 3 };
        let data = vec![Some(1.0), Some(2.0), Some(3.0), None, Some(5.0)];
        let result = indicator.calculate(&data);

        assert_eq!(result.len(), data.len());
        assert_eq!(&result[..indicator.lookback()], &[None, None]);
        assert!((result[2].unwrap() - 6.0).abs() < 0.001); // 1+2+3
        assert_eq!(result[3], None);
        assert_eq!(result[4], None);
    }
}
