//! The [`Grid`] value type: a validated, rectangular intensity lattice.

use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// A rectangular 2D array of risk intensities, each in `[0, 1]`.
///
/// Cells are stored row-major in a single flat buffer; cell `(row, col)`
/// lives at index `row * cols + col`. Every constructor validates shape
/// and values, so a `Grid` that exists always satisfies:
///
/// - `rows >= 1` and `cols >= 1`
/// - every value is finite and within `[0, 1]`
///
/// On the wire a grid is a plain nested array (`[[f64]]`); deserialization
/// runs the same validation as [`Grid::from_rows`].
///
/// # Examples
///
/// ```
/// use smolder_core::Grid;
///
/// let grid = Grid::from_rows(&[[1.0, 0.0], [0.0, 0.5]]).unwrap();
/// assert_eq!(grid.rows(), 2);
/// assert_eq!(grid.cols(), 2);
/// assert_eq!(grid.get(1, 1), Some(0.5));
///
/// // Ragged rows are rejected.
/// assert!(Grid::from_rows(&[vec![0.1, 0.2], vec![0.3]]).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<f64>,
}

impl Grid {
    /// Build a grid from nested rows.
    ///
    /// # Errors
    ///
    /// - [`SimError::InvalidGridShape`] if there are no rows, a row is
    ///   empty, or rows differ in length.
    /// - [`SimError::InvalidCellValue`] if any value is non-finite or
    ///   outside `[0, 1]`.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, SimError> {
        let first = rows
            .first()
            .ok_or_else(|| SimError::shape("grid has no rows"))?;
        let cols = first.as_ref().len();
        if cols == 0 {
            return Err(SimError::shape("row 0 is empty"));
        }

        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(SimError::shape(format!(
                    "row {r} has length {}, expected {cols}",
                    row.len()
                )));
            }
            cells.extend_from_slice(row);
        }

        Self::from_flat(rows.len(), cols, cells)
    }

    /// Build a grid from a row-major flat buffer.
    ///
    /// # Errors
    ///
    /// - [`SimError::InvalidGridShape`] if either dimension is zero or
    ///   `cells.len() != rows * cols`.
    /// - [`SimError::InvalidCellValue`] if any value is out of range.
    pub fn from_flat(rows: usize, cols: usize, cells: Vec<f64>) -> Result<Self, SimError> {
        if rows == 0 || cols == 0 {
            return Err(SimError::shape(format!(
                "grid dimensions must be non-zero, got {rows}x{cols}"
            )));
        }
        let expected = rows
            .checked_mul(cols)
            .ok_or_else(|| SimError::shape(format!("{rows}x{cols} overflows usize")))?;
        if cells.len() != expected {
            return Err(SimError::shape(format!(
                "buffer has {} cells, expected {rows}x{cols} = {expected}",
                cells.len()
            )));
        }
        check_values(&cells, cols)?;
        Ok(Self { rows, cols, cells })
    }

    /// A `rows x cols` grid with every cell set to `value`.
    pub fn filled(rows: usize, cols: usize, value: f64) -> Result<Self, SimError> {
        let n = rows
            .checked_mul(cols)
            .ok_or_else(|| SimError::shape(format!("{rows}x{cols} overflows usize")))?;
        Self::from_flat(rows, cols, vec![value; n])
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells (`rows * cols`).
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Value at `(row, col)`, or `None` if out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            Some(self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    /// Flat row-major index of `(row, col)`, or `None` if out of bounds.
    pub fn index_of(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    /// `(row, col)` of a flat index, or `None` if out of bounds.
    pub fn coord_of(&self, index: usize) -> Option<(usize, usize)> {
        (index < self.cells.len()).then(|| (index / self.cols, index % self.cols))
    }

    /// All cells in row-major order.
    pub fn as_slice(&self) -> &[f64] {
        &self.cells
    }

    /// One row as a slice, or `None` if out of bounds.
    pub fn row(&self, row: usize) -> Option<&[f64]> {
        (row < self.rows).then(|| &self.cells[row * self.cols..(row + 1) * self.cols])
    }

    /// Iterate over rows as slices.
    pub fn iter_rows(&self) -> impl ExactSizeIterator<Item = &[f64]> + '_ {
        self.cells.chunks_exact(self.cols)
    }

    /// Copy out as nested rows, the shape callers serialize.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.iter_rows().map(<[f64]>::to_vec).collect()
    }

    /// Sum of all cell intensities.
    pub fn total_intensity(&self) -> f64 {
        self.cells.iter().sum()
    }

    /// Largest cell intensity.
    pub fn max_value(&self) -> f64 {
        self.cells.iter().copied().fold(0.0, f64::max)
    }

    /// Swap this grid's cell buffer with `buffer`.
    ///
    /// Used by double-buffered steppers: `buffer` holds the freshly
    /// computed snapshot and receives the previous cells for reuse.
    /// The incoming values are checked against the grid invariant before
    /// the swap; on error nothing is swapped.
    ///
    /// # Errors
    ///
    /// - [`SimError::InvalidGridShape`] if `buffer.len() != cell_count()`.
    /// - [`SimError::InvalidCellValue`] if any incoming value is out of range.
    pub fn swap_buffer(&mut self, buffer: &mut Vec<f64>) -> Result<(), SimError> {
        if buffer.len() != self.cells.len() {
            return Err(SimError::shape(format!(
                "replacement buffer has {} cells, expected {}",
                buffer.len(),
                self.cells.len()
            )));
        }
        check_values(buffer, self.cols)?;
        std::mem::swap(&mut self.cells, buffer);
        Ok(())
    }
}

/// Reject the first non-finite or out-of-range value.
fn check_values(cells: &[f64], cols: usize) -> Result<(), SimError> {
    match cells
        .iter()
        .position(|v| !v.is_finite() || !(0.0..=1.0).contains(v))
    {
        Some(i) => Err(SimError::InvalidCellValue {
            row: i / cols,
            col: i % cols,
            value: cells[i],
        }),
        None => Ok(()),
    }
}

impl TryFrom<Vec<Vec<f64>>> for Grid {
    type Error = SimError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Self::from_rows(&rows)
    }
}

impl From<Grid> for Vec<Vec<f64>> {
    fn from(grid: Grid) -> Self {
        grid.to_rows()
    }
}
