//! Rank Correlation Index (RCI).
//!
//! RCI compares the ordering of prices inside a window with the ordering of
//! time. It is Spearman's rank correlation scaled to `[-100, 100]`:
//!
//! ```text
//! RCI = (1 - 6 * Σ (price_rank - date_rank)² / (P³ - P)) * 100
//! ```
//!
//! The window for row `i` is the `P` rows strictly before it
//! (`i - P .. i - 1`), so the first defined row is `P`.

use techind_core::numeric::{defined_window, Cell};
use techind_core::traits::{validate_period, Indicator};
use techind_core::IndicatorError;

use crate::simd::sum_squared_diff;

/// Rank Correlation Index.
#[derive(Debug, Clone)]
pub struct Rci {
    period: usize,
    /// `P³ - P`, never zero since `P >= 2`.
    denominator: f64,
    price_ranks: Vec<f64>,
}

impl Rci {
    /// Create a new RCI. The period must be at least 2.
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        validate_period("RCI", period, 2)?;
        let p = period as f64;
        Ok(Self {
            period,
            denominator: p * p * p - p,
            price_ranks: (1..=period).map(|r| r as f64).collect(),
        })
    }

    /// RCI of one fully defined window, oldest value first.
    ///
    /// Ties in price rank the more recent row first, so a flat window scores
    /// 100 like a strictly rising one.
    pub fn window_value(&self, window: &[f64]) -> f64 {
        debug_assert_eq!(window.len(), self.period);

        // Window positions ordered by price, highest first. Starting from
        // the most recent position keeps the stable sort recency-first.
        let mut order: Vec<usize> = (0..self.period).rev().collect();
        order.sort_by(|&a, &b| window[b].total_cmp(&window[a]));

        // Date rank of position `pos` is `P - pos` (most recent = 1)
        let date_ranks: Vec<f64> = order.iter().map(|&pos| (self.period - pos) as f64).collect();

        let d = sum_squared_diff(&self.price_ranks, &date_ranks);
        (1.0 - 6.0 * d / self.denominator) * 100.0
    }
}

impl Indicator for Rci {
    fn calculate(&self, data: &[Cell]) -> Vec<Cell> {
        let mut result = vec![None; data.len()];

        for (i, slot) in result.iter_mut().enumerate().skip(self.period) {
            *slot = defined_window(&data[i - self.period..i]).map(|w| self.window_value(&w));
        }

        result
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "RCI"
    }
}
