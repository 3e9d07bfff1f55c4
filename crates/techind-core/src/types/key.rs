//! Typed column identities.
//!
//! Every column in a [`SeriesTable`](super::SeriesTable) carries a
//! [`ColumnKey`] describing which indicator produced it and with which
//! parameters. The column name is derived from the key and is the public
//! naming contract (`rci_9`, `macd_12_26`, `macd_signal_9`, ...).

use std::fmt;

/// Identity of a table column: indicator family plus parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnKey {
    /// Caller-supplied column (e.g. `close`).
    Source(String),
    /// `rci_<period>`
    Rci { period: usize },
    /// `macd_<short>_<long>`
    Macd { short: usize, long: usize },
    /// `macd_signal_<signal>`
    MacdSignal { signal: usize },
    /// `stoch_k_<period>`
    StochK { period: usize },
    /// `stoch_d_<period>`
    StochD { period: usize },
    /// `stoch_rsi_<period>`
    StochRsi { period: usize },
    /// `<base>_shift`
    Shift(Box<ColumnKey>),
    /// `<base>_shift_diff`
    ShiftDiff(Box<ColumnKey>),
}

impl ColumnKey {
    /// Key for a caller-supplied column.
    pub fn source(name: impl Into<String>) -> Self {
        ColumnKey::Source(name.into())
    }

    /// The column name this key maps to.
    pub fn column_name(&self) -> String {
        match self {
            ColumnKey::Source(name) => name.clone(),
            ColumnKey::Rci { period } => format!("rci_{}", period),
            ColumnKey::Macd { short, long } => format!("macd_{}_{}", short, long),
            ColumnKey::MacdSignal { signal } => format!("macd_signal_{}", signal),
            ColumnKey::StochK { period } => format!("stoch_k_{}", period),
            ColumnKey::StochD { period } => format!("stoch_d_{}", period),
            ColumnKey::StochRsi { period } => format!("stoch_rsi_{}", period),
            ColumnKey::Shift(base) => format!("{}_shift", base.column_name()),
            ColumnKey::ShiftDiff(base) => format!("{}_shift_diff", base.column_name()),
        }
    }

    /// The lagged counterpart of this column.
    pub fn shifted(&self) -> Self {
        ColumnKey::Shift(Box::new(self.clone()))
    }

    /// The lag difference counterpart of this column.
    pub fn shift_diff(&self) -> Self {
        ColumnKey::ShiftDiff(Box::new(self.clone()))
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.column_name())
    }
}

/// Handle to a column written into a table.
///
/// Handles are returned by every engine call and stay valid for the life of
/// the table, since columns are never removed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnHandle {
    pub(crate) key: ColumnKey,
    pub(crate) slot: usize,
}

impl ColumnHandle {
    /// The column identity.
    pub fn key(&self) -> &ColumnKey {
        &self.key
    }

    /// The column name.
    pub fn name(&self) -> String {
        self.key.column_name()
    }

    /// Position of the column in the table.
    pub fn slot(&self) -> usize {
        self.slot
    }
}
