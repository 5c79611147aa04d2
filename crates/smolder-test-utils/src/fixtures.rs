//! Reusable grid fixtures.
//!
//! - [`corner_ignition`]: the 2x2 grid with a single burning corner.
//! - [`single_ignition`]: one cell at 1.0, the rest at 0.0.
//! - [`gradient`]: deterministic values spread across `[0, 1]`.

use smolder_core::Grid;

/// `[[1.0, 0.0], [0.0, 0.0]]`.
pub fn corner_ignition() -> Grid {
    single_ignition(2, 2, 0, 0)
}

/// A `rows x cols` grid of zeros with `(row, col)` set to 1.0.
///
/// # Panics
///
/// If the shape is empty or the coordinate is out of range.
pub fn single_ignition(rows: usize, cols: usize, row: usize, col: usize) -> Grid {
    assert!(row < rows && col < cols, "ignition ({row}, {col}) outside {rows}x{cols}");
    let mut cells = vec![0.0; rows * cols];
    cells[row * cols + col] = 1.0;
    Grid::from_flat(rows, cols, cells).expect("fixture grid is valid")
}

/// A `rows x cols` grid whose values cycle through tenths.
///
/// # Panics
///
/// If the shape is empty.
pub fn gradient(rows: usize, cols: usize) -> Grid {
    let cells = (0..rows * cols).map(|i| (i % 11) as f64 / 10.0).collect();
    Grid::from_flat(rows, cols, cells).expect("fixture grid is valid")
}
