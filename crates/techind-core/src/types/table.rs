//! Column-oriented series table.

use std::collections::HashMap;

use super::{Candle, ColumnHandle, ColumnKey};
use crate::error::IndicatorError;
use crate::numeric::{to_cell, to_cells, Cell};

#[derive(Debug, Clone)]
struct Column {
    key: ColumnKey,
    values: Vec<Cell>,
}

/// Time-ordered table of named numeric columns.
///
/// Rows are addressed by position `0..len`, oldest first. Every column has
/// exactly `len` cells. Columns are only ever appended or overwritten in
/// place, so a [`ColumnHandle`] stays valid for the life of the table.
#[derive(Debug, Clone, Default)]
pub struct SeriesTable {
    len: usize,
    timestamps: Option<Vec<i64>>,
    columns: Vec<Column>,
    by_name: HashMap<String, usize>,
}

impl SeriesTable {
    /// Create an empty table with `len` rows and no columns.
    pub fn new(len: usize) -> Self {
        Self {
            len,
            ..Self::default()
        }
    }

    /// Build a table from candles with `open`, `high`, `low`, `close` and
    /// `volume` columns, indexed by the candle timestamps.
    pub fn from_candles(candles: &[Candle]) -> Self {
        let mut table = Self::new(candles.len());
        table.timestamps = Some(candles.iter().map(|c| c.timestamp).collect());

        let fields: [(&str, fn(&Candle) -> f64); 5] = [
            ("open", |c: &Candle| c.open),
            ("high", |c: &Candle| c.high),
            ("low", |c: &Candle| c.low),
            ("close", |c: &Candle| c.close),
            ("volume", |c: &Candle| c.volume),
        ];
        for (name, field) in fields {
            let values = candles.iter().map(|c| to_cell(field(c))).collect();
            table.push_column(ColumnKey::source(name), values);
        }

        table
    }

    /// Build a table from named value columns. All columns must have the
    /// same length.
    pub fn from_columns<S: Into<String>>(
        columns: impl IntoIterator<Item = (S, Vec<f64>)>,
    ) -> Result<Self, IndicatorError> {
        let mut columns = columns.into_iter().peekable();
        let len = columns.peek().map(|(_, v)| v.len()).unwrap_or(0);
        let mut table = Self::new(len);
        for (name, values) in columns {
            table.insert_source(name, &values)?;
        }
        Ok(table)
    }

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the table has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Row timestamps, when the table was built from candles.
    pub fn timestamps(&self) -> Option<&[i64]> {
        self.timestamps.as_deref()
    }

    /// Column names in insertion order.
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.key.column_name()).collect()
    }

    /// Handles to every column in insertion order.
    pub fn handles(&self) -> Vec<ColumnHandle> {
        self.columns
            .iter()
            .enumerate()
            .map(|(slot, c)| ColumnHandle {
                key: c.key.clone(),
                slot,
            })
            .collect()
    }

    /// Check whether a column exists.
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<&[Cell]> {
        self.by_name
            .get(name)
            .map(|&slot| self.columns[slot].values.as_slice())
    }

    /// Get a column by name, failing with `MissingColumn`.
    pub fn require(&self, name: &str) -> Result<&[Cell], IndicatorError> {
        self.column(name)
            .ok_or_else(|| IndicatorError::MissingColumn(name.to_string()))
    }

    /// Resolve a handle to its column.
    ///
    /// Fails if the handle was issued by a different table.
    pub fn get(&self, handle: &ColumnHandle) -> Result<&[Cell], IndicatorError> {
        self.check_handle(handle)?;
        Ok(&self.columns[handle.slot].values)
    }

    /// Cell at `row` of the named column; `None` if undefined or absent.
    pub fn value(&self, name: &str, row: usize) -> Cell {
        self.column(name).and_then(|c| c.get(row).copied().flatten())
    }

    /// Insert a caller-supplied numeric column.
    pub fn insert_source(
        &mut self,
        name: impl Into<String>,
        values: &[f64],
    ) -> Result<ColumnHandle, IndicatorError> {
        self.insert(ColumnKey::source(name), to_cells(values))
    }

    /// Insert a column, overwriting any column with the same name in place.
    pub fn insert(
        &mut self,
        key: ColumnKey,
        values: Vec<Cell>,
    ) -> Result<ColumnHandle, IndicatorError> {
        self.check_length(&key, values.len())?;
        Ok(self.push_column(key, values))
    }

    /// Insert several columns atomically: either every column is written or
    /// none is.
    pub fn insert_all(
        &mut self,
        columns: Vec<(ColumnKey, Vec<Cell>)>,
    ) -> Result<Vec<ColumnHandle>, IndicatorError> {
        for (key, values) in &columns {
            self.check_length(key, values.len())?;
        }
        Ok(columns
            .into_iter()
            .map(|(key, values)| self.push_column(key, values))
            .collect())
    }

    /// Apply `f` to every cell of a column in place.
    pub fn update<F>(&mut self, handle: &ColumnHandle, f: F) -> Result<(), IndicatorError>
    where
        F: FnMut(Cell) -> Cell,
    {
        self.check_handle(handle)?;
        let column = &mut self.columns[handle.slot];
        column.values = column.values.iter().copied().map(f).collect();
        Ok(())
    }

    fn check_length(&self, key: &ColumnKey, actual: usize) -> Result<(), IndicatorError> {
        if actual != self.len {
            return Err(IndicatorError::LengthMismatch {
                column: key.column_name(),
                expected: self.len,
                actual,
            });
        }
        Ok(())
    }

    fn check_handle(&self, handle: &ColumnHandle) -> Result<(), IndicatorError> {
        match self.columns.get(handle.slot) {
            Some(column) if column.key == handle.key => Ok(()),
            _ => Err(IndicatorError::MissingColumn(handle.name())),
        }
    }

    fn push_column(&mut self, key: ColumnKey, values: Vec<Cell>) -> ColumnHandle {
        let name = key.column_name();
        let slot = match self.by_name.get(&name) {
            Some(&slot) => {
                self.columns[slot] = Column {
                    key: key.clone(),
                    values,
                };
                slot
            }
            None => {
                let slot = self.columns.len();
                self.columns.push(Column {
                    key: key.clone(),
                    values,
                });
                self.by_name.insert(name, slot);
                slot
            }
        };
        ColumnHandle { key, slot }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candles() -> Vec<Candle> {
        vec![
            Candle::new(1, 100.0, 101.0, 99.0, 100.5, 1000.0),
            Candle::new(2, 100.5, 102.0, 100.0, 101.5, 2000.0),
        ]
    }

    #[test]
    fn test_from_candles() {
        let table = SeriesTable::from_candles(&candles());

        assert_eq!(table.len(), 2);
        assert_eq!(
            table.column_names(),
            vec!["open", "high", "low", "close", "volume"]
        );
        assert_eq!(table.column("close").unwrap(), &[Some(100.5), Some(101.5)]);
        assert_eq!(table.timestamps(), Some(&[1, 2][..]));
    }

    #[test]
    fn test_require_missing_column() {
        let table = SeriesTable::from_candles(&candles());
        assert_eq!(
            table.require("vwap"),
            Err(IndicatorError::MissingColumn("vwap".to_string()))
        );
    }

    #[test]
    fn test_insert_length_mismatch() {
        let mut table = SeriesTable::new(3);
        let err = table
            .insert(ColumnKey::Rci { period: 2 }, vec![None; 2])
            .unwrap_err();
        assert!(matches!(err, IndicatorError::LengthMismatch { expected: 3, actual: 2, .. }));
        assert_eq!(table.column_count(), 0);
    }

    #[test]
    fn test_insert_overwrites_in_place() {
        let mut table = SeriesTable::from_columns([("close", vec![1.0, 2.0])]).unwrap();
        let first = table
            .insert(ColumnKey::Rci { period: 2 }, vec![None, Some(1.0)])
            .unwrap();
        let second = table
            .insert(ColumnKey::Rci { period: 2 }, vec![None, Some(2.0)])
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.get(&second).unwrap(), &[None, Some(2.0)]);
    }

    #[test]
    fn test_insert_all_is_atomic() {
        let mut table = SeriesTable::new(2);
        let result = table.insert_all(vec![
            (ColumnKey::Rci { period: 2 }, vec![None, None]),
            (ColumnKey::Rci { period: 3 }, vec![None]),
        ]);

        assert!(result.is_err());
        assert_eq!(table.column_count(), 0);
    }

    #[test]
    fn test_foreign_handle_rejected() {
        let mut a = SeriesTable::new(1);
        let b = SeriesTable::new(1);
        let handle = a.insert_source("close", &[1.0]).unwrap();

        assert!(a.get(&handle).is_ok());
        assert!(b.get(&handle).is_err());
    }

    #[test]
    fn test_update_in_place() {
        let mut table = SeriesTable::new(2);
        let handle = table
            .insert(ColumnKey::Rci { period: 2 }, vec![None, Some(-20.0)])
            .unwrap();
        table.update(&handle, |c| c.map(|v| v + 100.0)).unwrap();

        assert_eq!(table.get(&handle).unwrap(), &[None, Some(80.0)]);
        assert_eq!(table.value("rci_2", 1), Some(80.0));
        assert_eq!(table.value("rci_2", 0), None);
    }
}
