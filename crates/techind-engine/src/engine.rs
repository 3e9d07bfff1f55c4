//! The indicator engine.

use techind_core::numeric::{offset, round_series, Cell};
use techind_core::traits::{Indicator, MultiOutputIndicator};
use techind_core::{ColumnHandle, ColumnKey, IndicatorError, SeriesTable};
use techind_indicators::{transform, Macd, Rci, Shift, Stochastic};
use tracing::{debug, info, warn};

use crate::handles::{MacdHandles, ShiftHandles, StochasticHandles};

/// Default rounding precision for indicator columns.
pub const DEFAULT_DIGITS: u32 = 4;

/// Shift applied by the RCI range change, `[-100, 100]` to `[0, 200]`.
pub const RCI_RANGE_OFFSET: f64 = 100.0;

/// Name fragment identifying RCI columns for the global range change.
const RCI_NAME_PATTERN: &str = "rci_";

/// Appends indicator columns to a borrowed [`SeriesTable`].
///
/// Every call validates its parameters and inputs before writing, so a
/// failed call leaves the table untouched.
pub struct IndicatorEngine<'a> {
    table: &'a mut SeriesTable,
}

impl<'a> IndicatorEngine<'a> {
    /// Create an engine over `table`. The table is mutated in place.
    pub fn new(table: &'a mut SeriesTable) -> Self {
        Self { table }
    }

    /// The table being processed.
    pub fn table(&self) -> &SeriesTable {
        self.table
    }

    /// Add `rci_<period>` for every period.
    ///
    /// With `rescale`, every column whose name contains `rci_` is shifted by
    /// +100 once the new columns are written, exactly as
    /// [`change_rci_range`](Self::change_rci_range) does. That includes RCI
    /// columns added by earlier calls, each of which is reported with `warn!`.
    pub fn add_rci(
        &mut self,
        source: &str,
        periods: &[usize],
        digits: u32,
        rescale: bool,
    ) -> Result<Vec<ColumnHandle>, IndicatorError> {
        let indicators = periods
            .iter()
            .map(|&period| Rci::new(period).map(|rci| (period, rci)))
            .collect::<Result<Vec<_>, _>>()?;
        let data = self.table.require(source)?;

        let mut columns = Vec::with_capacity(indicators.len());
        for (period, rci) in indicators {
            self.warn_short_history("RCI", period);
            let values = round_series(&rci.calculate(data), digits);
            debug!("Computed rci_{} from '{}'", period, source);
            columns.push((ColumnKey::Rci { period }, values));
        }

        let handles = self.table.insert_all(columns)?;
        info!(
            "Added {} RCI column(s) from '{}' (digits={}, rescale={})",
            handles.len(),
            source,
            digits,
            rescale
        );

        if rescale {
            self.rescale_rci(&handles)?;
        }
        Ok(handles)
    }

    /// Run the table-wide RCI range change after `add_rci` wrote `written`.
    ///
    /// Returns the shifted columns that existed before that call.
    fn rescale_rci(
        &mut self,
        written: &[ColumnHandle],
    ) -> Result<Vec<ColumnHandle>, IndicatorError> {
        let earlier: Vec<ColumnHandle> = self
            .change_rci_range()?
            .into_iter()
            .filter(|h| !written.contains(h))
            .collect();

        for handle in &earlier {
            warn!(
                "RCI rescale also shifted existing column '{}' by {}",
                handle.name(),
                RCI_RANGE_OFFSET
            );
        }
        Ok(earlier)
    }

    /// Shift every column whose name contains `rci_` by +100.
    ///
    /// This is not idempotent: each call shifts again.
    pub fn change_rci_range(&mut self) -> Result<Vec<ColumnHandle>, IndicatorError> {
        let targets: Vec<ColumnHandle> = self
            .table
            .handles()
            .into_iter()
            .filter(|h| h.name().contains(RCI_NAME_PATTERN))
            .collect();

        for handle in &targets {
            self.table
                .update(handle, |c| offset(c, RCI_RANGE_OFFSET))?;
        }

        info!("Shifted {} RCI column(s) by {}", targets.len(), RCI_RANGE_OFFSET);
        Ok(targets)
    }

    /// Add `macd_<short>_<long>` and `macd_signal_<signal>`.
    ///
    /// The signal line is the simple moving average of the unrounded MACD
    /// line; both are rounded to `digits`.
    pub fn add_macd(
        &mut self,
        source: &str,
        short: usize,
        long: usize,
        signal: usize,
        digits: u32,
    ) -> Result<MacdHandles, IndicatorError> {
        let macd = Macd::new(short, long, signal)?;
        let data = self.table.require(source)?;

        if macd.lookback() >= self.table.len() {
            warn!(
                "MACD({}, {}, {}) needs more than {} rows; signal line will be undefined",
                short,
                long,
                signal,
                self.table.len()
            );
        }

        let output = macd.calculate(data);
        let [macd, signal] = self.insert_pair(
            (ColumnKey::Macd { short, long }, round_series(&output.macd, digits)),
            (ColumnKey::MacdSignal { signal }, round_series(&output.signal, digits)),
        )?;
        info!("Added {} and {} from '{}'", macd.name(), signal.name(), source);
        Ok(MacdHandles { macd, signal })
    }

    /// Add `stoch_k_<period>`, `stoch_d_<period>` and `stoch_rsi_<period>`
    /// for every period.
    pub fn add_stochastic(
        &mut self,
        source: &str,
        periods: &[usize],
        digits: u32,
    ) -> Result<Vec<StochasticHandles>, IndicatorError> {
        let indicators = periods
            .iter()
            .map(|&period| Stochastic::new(period).map(|s| (period, s)))
            .collect::<Result<Vec<_>, _>>()?;
        let data = self.table.require(source)?;

        let mut columns = Vec::with_capacity(indicators.len() * 3);
        for (period, stoch) in &indicators {
            let period = *period;
            self.warn_short_history("Stochastic", period);
            let output = stoch.calculate(data);
            columns.push((ColumnKey::StochK { period }, round_series(&output.k, digits)));
            columns.push((ColumnKey::StochD { period }, round_series(&output.d, digits)));
            columns.push((ColumnKey::StochRsi { period }, round_series(&output.rsi, digits)));
            debug!("Computed stochastics({}) from '{}'", period, source);
        }

        let handles = self.table.insert_all(columns)?;
        info!(
            "Added stochastics for {} period(s) from '{}'",
            indicators.len(),
            source
        );

        Ok(indicators
            .iter()
            .zip(handles.chunks_exact(3))
            .map(|((period, _), chunk)| StochasticHandles {
                period: *period,
                k: chunk[0].clone(),
                d: chunk[1].clone(),
                rsi: chunk[2].clone(),
            })
            .collect())
    }

    /// Add `<column>_shift` (and `<column>_shift_diff` when `diff`) for every
    /// column whose name contains `family`, compared case-insensitively.
    ///
    /// The column list is captured when the call starts, so it matches every
    /// existing column with that fragment, including earlier unrelated ones
    /// (`"macd"` matches both `macd_12_26` and `macd_signal_9`). Prefer
    /// [`add_shift_and_diff`](Self::add_shift_and_diff) with the handles
    /// returned by the indicator call to target columns exactly.
    pub fn add_previous_value_shift_and_diff(
        &mut self,
        family: &str,
        diff: bool,
    ) -> Result<Vec<ShiftHandles>, IndicatorError> {
        let needle = family.to_lowercase();
        let targets: Vec<ColumnHandle> = self
            .table
            .handles()
            .into_iter()
            .filter(|h| h.name().to_lowercase().contains(&needle))
            .collect();

        if targets.is_empty() {
            warn!("No columns match '{}'; nothing to shift", family);
        }

        self.add_shift_and_diff(&targets, diff)
    }

    /// Add `<column>_shift` (and `<column>_shift_diff` when `diff`) for
    /// exactly the given columns.
    pub fn add_shift_and_diff(
        &mut self,
        targets: &[ColumnHandle],
        diff: bool,
    ) -> Result<Vec<ShiftHandles>, IndicatorError> {
        let shift = Shift::previous();

        let mut columns = Vec::with_capacity(targets.len() * 2);
        for handle in targets {
            let values = self.table.get(handle)?;
            let shifted = shift.calculate(values);
            if diff {
                let diffs = transform::diff(values, &shifted);
                columns.push((handle.key().shifted(), shifted));
                columns.push((handle.key().shift_diff(), diffs));
            } else {
                columns.push((handle.key().shifted(), shifted));
            }
            debug!("Computed lag of '{}' (diff={})", handle.name(), diff);
        }

        let mut written = self.table.insert_all(columns)?.into_iter();
        let result: Vec<ShiftHandles> = targets
            .iter()
            .filter_map(|source| {
                let shift = written.next()?;
                let diff = if diff { written.next() } else { None };
                Some(ShiftHandles {
                    source: source.clone(),
                    shift,
                    diff,
                })
            })
            .collect();

        info!("Added lag columns for {} column(s)", result.len());
        Ok(result)
    }

    /// Write two columns atomically and return their handles in order.
    fn insert_pair(
        &mut self,
        first: (ColumnKey, Vec<Cell>),
        second: (ColumnKey, Vec<Cell>),
    ) -> Result<[ColumnHandle; 2], IndicatorError> {
        let first_name = first.0.column_name();
        let handles = self.table.insert_all(vec![first, second])?;
        <[ColumnHandle; 2]>::try_from(handles).map_err(|handles| IndicatorError::LengthMismatch {
            column: first_name,
            expected: 2,
            actual: handles.len(),
        })
    }

    fn warn_short_history(&self, indicator: &str, period: usize) {
        if period >= self.table.len() {
            warn!(
                "{} period {} is not shorter than the table ({} rows); column will be undefined",
                indicator,
                period,
                self.table.len()
            );
        }
    }
}
