//! Moving average indicators.

use techind_core::numeric::Cell;
use techind_core::traits::{validate_period, Indicator, StreamingIndicator};
use techind_core::IndicatorError;

/// Simple Moving Average (SMA).
///
/// Calculates the arithmetic mean of the last N values. A window that
/// contains an undefined cell is undefined.
#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
}

impl Sma {
    /// Create a new SMA with the specified period.
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        validate_period("SMA", period, 1)?;
        Ok(Self { period })
    }

    pub(crate) fn with_valid_period(period: usize) -> Self {
        debug_assert!(period > 0);
        Self { period }
    }
}

impl Indicator for Sma {
    fn calculate(&self, data: &[Cell]) -> Vec<Cell> {
        let mut result = vec![None; data.len()];
        let period_f64 = self.period as f64;

        // Each window is summed from its own cells so rounding error cannot
        // carry over from earlier rows
        for (i, slot) in result.iter_mut().enumerate().skip(self.period - 1) {
            *slot = data[i + 1 - self.period..=i]
                .iter()
                .copied()
                .sum::<Option<f64>>()
                .map(|sum| sum / period_f64);
        }

        result
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn name(&self) -> &str {
        "SMA"
    }
}

/// Exponential Moving Average (EMA).
///
/// Smoothing factor `2 / (period + 1)`, seeded with the simple average of the
/// first `period` values. An undefined cell restarts the seed.
#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
}

impl Ema {
    /// Create a new EMA with the specified period.
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        validate_period("EMA", period, 1)?;
        Ok(Self { period })
    }

    pub(crate) fn with_valid_period(period: usize) -> Self {
        debug_assert!(period > 0);
        Self { period }
    }
}

impl Indicator for Ema {
    fn calculate(&self, data: &[Cell]) -> Vec<Cell> {
        let mut ema = StreamingEma::with_period(self.period);
        data.iter().map(|&cell| ema.update(cell)).collect()
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn name(&self) -> &str {
        "EMA"
    }
}

/// Streaming EMA that maintains state for incremental updates.
#[derive(Debug, Clone)]
pub struct StreamingEma {
    period: usize,
    multiplier: f64,
    current: Option<f64>,
    count: usize,
    sum: f64,
}

impl StreamingEma {
    /// Create a new streaming EMA.
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        validate_period("EMA", period, 1)?;
        Ok(Self::with_period(period))
    }

    fn with_period(period: usize) -> Self {
        Self {
            period,
            multiplier: 2.0 / (period as f64 + 1.0),
            current: None,
            count: 0,
            sum: 0.0,
        }
    }
}

impl StreamingIndicator for StreamingEma {
    fn update(&mut self, value: Cell) -> Cell {
        let Some(value) = value else {
            self.reset();
            return None;
        };

        self.count += 1;

        if self.count < self.period {
            // Accumulating for initial SMA
            self.sum += value;
            None
        } else if self.count == self.period {
            // First EMA value is the SMA
            self.sum += value;
            self.current = Some(self.sum / self.period as f64);
            self.current
        } else {
            self.current = self
                .current
                .map(|ema| value * self.multiplier + ema * (1.0 - self.multiplier));
            self.current
        }
    }

    fn current(&self) -> Cell {
        self.current
    }

    fn reset(&mut self) {
        self.current = None;
        self.count = 0;
        self.sum = 0.0;
    }

    fn is_ready(&self) -> bool {
        self.count >= self.period
    }

    fn period(&self) -> usize {
        self.period
    }
}
