//! Total numeric helpers over table cells.
//!
//! A cell is `Option<f64>`; `None` marks a row that is not computable yet.
//! Every helper here yields `None` when any operand is `None`.

/// A single table value. `None` is the undefined marker.
pub type Cell = Option<f64>;

/// Finest precision that still changes an `f64`. Larger `digits` leave
/// values unrounded.
pub const MAX_DIGITS: u32 = 15;

/// Round half to even at `digits` decimal places.
#[inline]
pub fn round_to(value: f64, digits: u32) -> f64 {
    if digits > MAX_DIGITS {
        return value;
    }
    let factor = 10f64.powi(digits as i32);
    (value * factor).round_ties_even() / factor
}

/// Round a cell, keeping undefined as undefined.
#[inline]
pub fn round_cell(cell: Cell, digits: u32) -> Cell {
    cell.map(|v| round_to(v, digits))
}

/// Round every cell of a series.
pub fn round_series(series: &[Cell], digits: u32) -> Vec<Cell> {
    series.iter().map(|&c| round_cell(c, digits)).collect()
}

/// `a - b`, undefined if either side is.
#[inline]
pub fn sub(a: Cell, b: Cell) -> Cell {
    Some(a? - b?)
}

/// `a + offset`, undefined stays undefined.
#[inline]
pub fn offset(a: Cell, offset: f64) -> Cell {
    a.map(|v| v + offset)
}

/// Collect a window of cells into plain values.
///
/// Returns `None` as soon as one cell is undefined.
pub fn defined_window(window: &[Cell]) -> Option<Vec<f64>> {
    window.iter().copied().collect()
}

/// Lift a plain value into a cell. NaN becomes undefined.
#[inline]
pub fn to_cell(value: f64) -> Cell {
    (!value.is_nan()).then_some(value)
}

/// Lift plain values into cells.
pub fn to_cells(values: &[f64]) -> Vec<Cell> {
    values.iter().map(|&v| to_cell(v)).collect()
}
