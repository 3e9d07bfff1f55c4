//! Handles returned by multi-column engine calls.

use techind_core::ColumnHandle;

/// Columns written by `add_macd`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacdHandles {
    /// `macd_<short>_<long>`
    pub macd: ColumnHandle,
    /// `macd_signal_<signal>`
    pub signal: ColumnHandle,
}

/// Columns written by `add_stochastic` for one period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StochasticHandles {
    pub period: usize,
    /// `stoch_k_<period>`
    pub k: ColumnHandle,
    /// `stoch_d_<period>`
    pub d: ColumnHandle,
    /// `stoch_rsi_<period>`
    pub rsi: ColumnHandle,
}

/// Columns written by the lag/diff transform for one source column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftHandles {
    /// The column that was lagged.
    pub source: ColumnHandle,
    /// `<source>_shift`
    pub shift: ColumnHandle,
    /// `<source>_shift_diff`, when differences were requested.
    pub diff: Option<ColumnHandle>,
}

impl MacdHandles {
    /// Both lines, MACD first.
    pub fn columns(&self) -> [&ColumnHandle; 2] {
        [&self.macd, &self.signal]
    }
}

impl StochasticHandles {
    /// All three lines in %K, %D, StochRSI order.
    pub fn columns(&self) -> [&ColumnHandle; 3] {
        [&self.k, &self.d, &self.rsi]
    }
}
