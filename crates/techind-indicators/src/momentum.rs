//! Momentum indicators.

use techind_core::numeric::{defined_window, sub, Cell};
use techind_core::traits::{validate_period, Indicator, MultiOutputIndicator};
use techind_core::IndicatorError;

use crate::moving_average::{Ema, Sma};
use crate::simd::minmax_simd;

/// Relative Strength Index (RSI).
///
/// Measures the speed and magnitude of recent price changes
/// to evaluate overbought or oversold conditions.
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
}

impl Rsi {
    /// Create a new RSI indicator.
    ///
    /// Common periods are 14 (default) or 9.
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        validate_period("RSI", period, 1)?;
        Ok(Self { period })
    }
}

/// Wilder's running average: seeded with the mean of the first `period`
/// values, then `avg = (prev_avg * (period-1) + value) / period`.
#[derive(Debug)]
struct WilderAverage {
    period: f64,
    count: usize,
    avg: f64,
}

impl WilderAverage {
    fn new(period: usize) -> Self {
        Self {
            period: period as f64,
            count: 0,
            avg: 0.0,
        }
    }

    fn update(&mut self, value: f64) -> Option<f64> {
        self.count += 1;
        let n = self.count as f64;
        if n <= self.period {
            // Running mean until the seed window is full
            self.avg += (value - self.avg) / n;
        } else {
            self.avg = (self.avg * (self.period - 1.0) + value) / self.period;
        }
        (n >= self.period).then_some(self.avg)
    }

    fn reset(&mut self) {
        self.count = 0;
        self.avg = 0.0;
    }
}

impl Indicator for Rsi {
    fn calculate(&self, data: &[Cell]) -> Vec<Cell> {
        let mut gains = WilderAverage::new(self.period);
        let mut losses = WilderAverage::new(self.period);
        let mut result = Vec::with_capacity(data.len());

        for i in 0..data.len() {
            let change = if i == 0 { None } else { sub(data[i], data[i - 1]) };

            let Some(change) = change else {
                gains.reset();
                losses.reset();
                result.push(None);
                continue;
            };

            let avg_gain = gains.update(change.max(0.0));
            let avg_loss = losses.update((-change).max(0.0));

            result.push(match (avg_gain, avg_loss) {
                (Some(_), Some(loss)) if loss == 0.0 => Some(100.0),
                (Some(gain), Some(loss)) => Some(100.0 - (100.0 / (1.0 + gain / loss))),
                _ => None,
            });
        }

        result
    }

    fn lookback(&self) -> usize {
        self.period // Need period+1 data points
    }

    fn name(&self) -> &str {
        "RSI"
    }
}

/// MACD (Moving Average Convergence Divergence) output.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdOutput {
    /// MACD line (short EMA - long EMA)
    pub macd: Vec<Cell>,
    /// Signal line (SMA of the MACD line)
    pub signal: Vec<Cell>,
}

/// MACD indicator.
///
/// Uses two EMAs to identify trend direction and momentum. The signal line is
/// a simple moving average of the MACD line.
#[derive(Debug, Clone)]
pub struct Macd {
    short_period: usize,
    long_period: usize,
    signal_period: usize,
}

impl Macd {
    /// Create a MACD with custom periods.
    pub fn new(short: usize, long: usize, signal: usize) -> Result<Self, IndicatorError> {
        validate_period("MACD short", short, 1)?;
        validate_period("MACD long", long, 1)?;
        validate_period("MACD signal", signal, 1)?;
        Ok(Self {
            short_period: short,
            long_period: long,
            signal_period: signal,
        })
    }
}

impl Default for Macd {
    /// The conventional (12, 26, 9) MACD.
    fn default() -> Self {
        Self {
            short_period: 12,
            long_period: 26,
            signal_period: 9,
        }
    }
}

impl MultiOutputIndicator for Macd {
    type Outputs = MacdOutput;

    fn calculate(&self, data: &[Cell]) -> MacdOutput {
        let short_ema = Ema::with_valid_period(self.short_period).calculate(data);
        let long_ema = Ema::with_valid_period(self.long_period).calculate(data);

        let macd: Vec<Cell> = short_ema
            .iter()
            .zip(long_ema.iter())
            .map(|(&s, &l)| sub(s, l))
            .collect();
        let signal = Sma::with_valid_period(self.signal_period).calculate(&macd);

        MacdOutput { macd, signal }
    }

    fn lookback(&self) -> usize {
        self.short_period.max(self.long_period) + self.signal_period - 2
    }

    fn name(&self) -> &str {
        "MACD"
    }
}

/// Stochastic oscillator output.
#[derive(Debug, Clone, PartialEq)]
pub struct StochasticOutput {
    /// %K (fast stochastic)
    pub k: Vec<Cell>,
    /// %D (3-period SMA of %K)
    pub d: Vec<Cell>,
    /// Stochastic RSI (%K applied to RSI)
    pub rsi: Vec<Cell>,
}

/// Stochastic oscillator over a single series.
///
/// %K is the position of the latest value within the high/low range of the
/// last `period` values, scaled 0-100. A flat window has no range and is
/// undefined.
#[derive(Debug, Clone)]
pub struct Stochastic {
    period: usize,
    d_period: usize,
}

impl Stochastic {
    /// Conventional %D smoothing window.
    pub const D_PERIOD: usize = 3;

    /// Create a new stochastic oscillator.
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        validate_period("Stochastic", period, 1)?;
        Ok(Self {
            period,
            d_period: Self::D_PERIOD,
        })
    }

    /// %K of `data` over this oscillator's period.
    pub fn percent_k(&self, data: &[Cell]) -> Vec<Cell> {
        let mut result = vec![None; data.len()];

        for (i, slot) in result.iter_mut().enumerate().skip(self.period - 1) {
            let Some(window) = defined_window(&data[i + 1 - self.period..=i]) else {
                continue;
            };
            let Some((lowest, highest)) = minmax_simd(&window) else {
                continue;
            };

            let range = highest - lowest;
            if range > 0.0 {
                *slot = Some((window[self.period - 1] - lowest) / range * 100.0);
            }
        }

        result
    }
}

impl MultiOutputIndicator for Stochastic {
    type Outputs = StochasticOutput;

    fn calculate(&self, data: &[Cell]) -> StochasticOutput {
        let k = self.percent_k(data);
        let d = Sma::with_valid_period(self.d_period).calculate(&k);

        let rsi = Rsi {
            period: self.period,
        }
        .calculate(data);
        let stoch_rsi = self.percent_k(&rsi);

        StochasticOutput {
            k,
            d,
            rsi: stoch_rsi,
        }
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn name(&self) -> &str {
        "Stochastic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use techind_core::numeric::to_cells;

    fn wave(len: usize) -> Vec<Cell> {
        to_cells(
            &(0..len)
                .map(|i| 100.0 + (i as f64 * 0.5).sin() * 5.0)
                .collect::<Vec<_>>(),
        )
    }

    #[test]
    fn test_rsi_basic() {
        let rsi = Rsi::new(14).unwrap();
        let result = rsi.calculate(&wave(30));

        assert_eq!(result.len(), 30);
        assert!(result[..14].iter().all(Option::is_none));

        // All RSI values should be between 0 and 100
        for value in result[14..].iter() {
            let value = value.unwrap();
            assert!((0.0..=100.0).contains(&value));
        }
    }

    #[test]
    fn test_rsi_all_gains() {
        let rsi = Rsi::new(5).unwrap();
        let result = rsi.calculate(&to_cells(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]));

        // All gains = RSI should be 100
        assert!((result[5].unwrap() - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_rsi_all_losses() {
        let rsi = Rsi::new(5).unwrap();
        let result = rsi.calculate(&to_cells(&[7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0]));

        // All losses = RSI should be 0
        assert!(result[5].unwrap().abs() < 1e-10);
        assert!(result[6].unwrap().abs() < 1e-10);
    }

    #[test]
    fn test_rsi_wilder_smoothing() {
        let rsi = Rsi::new(2).unwrap();
        // changes: +2, -1, +1
        let result = rsi.calculate(&to_cells(&[10.0, 12.0, 11.0, 12.0]));

        // seed: gain 1.0, loss 0.5 -> RS 2
        assert!((result[2].unwrap() - (100.0 - 100.0 / 3.0)).abs() < 1e-10);
        // gain (1*1 + 1)/2 = 1.0, loss (0.5*1 + 0)/2 = 0.25 -> RS 4
        assert!((result[3].unwrap() - 80.0).abs() < 1e-10);
    }

    #[test]
    fn test_macd_basic() {
        let macd = Macd::default();
        let data = to_cells(&(0..50).map(|i| 100.0 + i as f64).collect::<Vec<_>>());
        let result = macd.calculate(&data);

        assert!(result.macd[..25].iter().all(Option::is_none));
        assert!(result.macd[25].is_some());
        assert!(result.signal[..33].iter().all(Option::is_none));
        assert!(result.signal[33].is_some());
        assert_eq!(macd.lookback(), 33);

        // In an uptrend, MACD should be positive
        assert!(result.macd.last().unwrap().unwrap() > 0.0);
    }

    #[test]
    fn test_macd_matches_ema_difference() {
        let macd = Macd::new(3, 6, 4).unwrap();
        let data = wave(40);
        let result = macd.calculate(&data);

        let short = Ema::new(3).unwrap().calculate(&data);
        let long = Ema::new(6).unwrap().calculate(&data);
        for i in 5..40 {
            let expected = short[i].unwrap() - long[i].unwrap();
            assert!((result.macd[i].unwrap() - expected).abs() < 1e-12);
        }

        // Signal is the 4-row mean of the MACD line
        let i = 20;
        let mean = result.macd[i - 3..=i].iter().map(|c| c.unwrap()).sum::<f64>() / 4.0;
        assert!((result.signal[i].unwrap() - mean).abs() < 1e-10);
    }

    #[test]
    fn test_macd_constant_series() {
        let macd = Macd::new(3, 5, 2).unwrap();
        let result = macd.calculate(&to_cells(&[50.0; 20]));

        for value in result.macd.iter().chain(result.signal.iter()).flatten() {
            assert!(value.abs() < 1e-9);
        }
    }

    #[test]
    fn test_stochastic_at_high() {
        let stoch = Stochastic::new(5).unwrap();
        let data = to_cells(&[10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0, 17.0]);
        let result = stoch.calculate(&data);

        assert!(result.k[..4].iter().all(Option::is_none));
        // Close at high = %K should be 100
        for k in &result.k[4..] {
            assert!((k.unwrap() - 100.0).abs() < 1e-10);
        }
        assert!(result.d[..6].iter().all(Option::is_none));
        assert!((result.d[6].unwrap() - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_stochastic_position_in_range() {
        let stoch = Stochastic::new(3).unwrap();
        let result = stoch.percent_k(&to_cells(&[10.0, 20.0, 15.0]));

        assert!((result[2].unwrap() - 50.0).abs() < 1e-10);
    }

    #[test]
    fn test_stochastic_flat_window_undefined() {
        let stoch = Stochastic::new(3).unwrap();
        let result = stoch.percent_k(&to_cells(&[5.0, 5.0, 5.0, 6.0]));

        assert_eq!(result[2], None);
        assert!((result[3].unwrap() - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_stochastic_bounds() {
        let stoch = Stochastic::new(5).unwrap();
        let result = stoch.calculate(&wave(60));

        for value in result.k.iter().chain(&result.d).chain(&result.rsi).flatten() {
            assert!((0.0..=100.0).contains(value));
        }
    }

    #[test]
    fn test_stoch_rsi_warmup() {
        let stoch = Stochastic::new(4).unwrap();
        let result = stoch.calculate(&wave(30));

        // RSI is defined from row 4, StochRSI needs 4 RSI values
        assert!(result.rsi[..7].iter().all(Option::is_none));
        assert!(result.rsi[7].is_some());
    }
}
