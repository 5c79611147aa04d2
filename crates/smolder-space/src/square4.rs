//! 2D square lattice with 4-connected (Von Neumann) neighbourhood.

use crate::edge::EdgeBehavior;
use crate::error::SpaceError;
use crate::grid2d::{self, VON_NEUMANN};
use crate::table::NeighbourTable;
use smallvec::SmallVec;
use smolder_core::Grid;

/// A two-dimensional square lattice with 4-connected neighbourhood.
///
/// Each cell has coordinate `(row, col)` where `0 <= row < rows` and
/// `0 <= col < cols`, and flat index `row * cols + col`. Neighbours are
/// reported in a fixed order: up, down, left, right. Callers that sum
/// over neighbours therefore accumulate in the same order on every run.
///
/// Boundary handling is controlled by [`EdgeBehavior`]:
/// - **Absorb**: edge cells have fewer neighbours (corners 2, edges 3)
/// - **Clamp**: edge cells self-loop on the boundary axis
/// - **Wrap**: periodic boundary (torus topology)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Square4 {
    rows: usize,
    cols: usize,
    edge: EdgeBehavior,
}

impl Square4 {
    /// Maximum dimension size.
    ///
    /// Neighbour resolution offsets coordinates by one in `i64` and wraps
    /// with `(v % n + n) % n`. Capping each axis at `i32::MAX` keeps those
    /// intermediates far from `i64` overflow on every target.
    pub const MAX_DIM: usize = i32::MAX as usize;

    /// Create a new lattice with `rows * cols` cells and the given edge behavior.
    ///
    /// Returns `Err(SpaceError::EmptySpace)` if either dimension is 0, or
    /// `Err(SpaceError::DimensionTooLarge)` if either exceeds
    /// [`MAX_DIM`](Self::MAX_DIM) or the cell count overflows `usize`.
    ///
    /// # Examples
    ///
    /// ```
    /// use smolder_space::{Square4, EdgeBehavior};
    ///
    /// let lattice = Square4::new(16, 16, EdgeBehavior::Absorb).unwrap();
    /// assert_eq!(lattice.cell_count(), 256);
    /// ```
    pub fn new(rows: usize, cols: usize, edge: EdgeBehavior) -> Result<Self, SpaceError> {
        if rows == 0 || cols == 0 {
            return Err(SpaceError::EmptySpace);
        }
        if rows > Self::MAX_DIM {
            return Err(SpaceError::DimensionTooLarge {
                name: "rows",
                value: rows,
                max: Self::MAX_DIM,
            });
        }
        if cols > Self::MAX_DIM {
            return Err(SpaceError::DimensionTooLarge {
                name: "cols",
                value: cols,
                max: Self::MAX_DIM,
            });
        }
        if rows.checked_mul(cols).is_none() {
            return Err(SpaceError::DimensionTooLarge {
                name: "cols",
                value: cols,
                max: usize::MAX / rows,
            });
        }
        Ok(Self { rows, cols, edge })
    }

    /// A lattice matching the shape of `grid`.
    pub fn for_grid(grid: &Grid, edge: EdgeBehavior) -> Result<Self, SpaceError> {
        Self::new(grid.rows(), grid.cols(), edge)
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Edge behavior.
    pub fn edge_behavior(&self) -> EdgeBehavior {
        self.edge
    }

    /// Flat index of `(row, col)`, or `None` if out of bounds.
    pub fn canonical_rank(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    /// `(row, col)` of a flat index, or `None` if out of bounds.
    pub fn coord_of(&self, index: usize) -> Option<(usize, usize)> {
        (index < self.cell_count()).then(|| (index / self.cols, index % self.cols))
    }

    /// The 4-connected neighbours of `(row, col)` as `(row, col)` pairs,
    /// in up, down, left, right order.
    ///
    /// Out-of-bounds input yields an empty set.
    pub fn neighbours(&self, row: usize, col: usize) -> SmallVec<[(usize, usize); 4]> {
        let mut result = SmallVec::new();
        if row >= self.rows || col >= self.cols {
            return result;
        }
        for (dr, dc) in VON_NEUMANN {
            let nr = grid2d::resolve_axis(row as i64 + dr, self.rows, self.edge);
            let nc = grid2d::resolve_axis(col as i64 + dc, self.cols, self.edge);
            if let (Some(nr), Some(nc)) = (nr, nc) {
                result.push((nr, nc));
            }
        }
        result
    }

    /// The 4-connected neighbours of a flat index, as flat indices.
    pub fn neighbours_flat(&self, index: usize) -> SmallVec<[usize; 4]> {
        match self.coord_of(index) {
            Some((r, c)) => self
                .neighbours(r, c)
                .into_iter()
                .map(|(nr, nc)| nr * self.cols + nc)
                .collect(),
            None => SmallVec::new(),
        }
    }

    /// Largest neighbour count of any cell.
    pub fn max_neighbour_degree(&self) -> usize {
        match self.edge {
            EdgeBehavior::Clamp | EdgeBehavior::Wrap => 4,
            EdgeBehavior::Absorb => {
                let axis = |len: usize| match len {
                    1 => 0,
                    2 => 1,
                    _ => 2,
                };
                axis(self.rows) + axis(self.cols)
            }
        }
    }

    /// Precompute every cell's neighbours for repeated sweeps.
    pub fn neighbour_table(&self) -> NeighbourTable {
        NeighbourTable::build(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance;
    use proptest::prelude::*;

    // ── Neighbour tests ─────────────────────────────────────────

    #[test]
    fn neighbours_absorb_interior() {
        let s = Square4::new(5, 5, EdgeBehavior::Absorb).unwrap();
        let n = s.neighbours(2, 2);
        assert_eq!(n.as_slice(), &[(1, 2), (3, 2), (2, 1), (2, 3)]);
    }

    #[test]
    fn neighbours_absorb_corner() {
        let s = Square4::new(5, 5, EdgeBehavior::Absorb).unwrap();
        let n = s.neighbours(0, 0);
        assert_eq!(n.len(), 2);
        assert!(n.contains(&(1, 0)));
        assert!(n.contains(&(0, 1)));
    }

    #[test]
    fn neighbours_absorb_edge() {
        let s = Square4::new(5, 5, EdgeBehavior::Absorb).unwrap();
        let n = s.neighbours(0, 2);
        assert_eq!(n.len(), 3);
        assert!(n.contains(&(1, 2)));
        assert!(n.contains(&(0, 1)));
        assert!(n.contains(&(0, 3)));
    }

    #[test]
    fn neighbours_clamp_corner() {
        let s = Square4::new(5, 5, EdgeBehavior::Clamp).unwrap();
        let n = s.neighbours(0, 0);
        // North and west clamp back onto the cell itself.
        assert_eq!(n.as_slice(), &[(0, 0), (1, 0), (0, 0), (0, 1)]);
    }

    #[test]
    fn neighbours_wrap_corner() {
        let s = Square4::new(5, 5, EdgeBehavior::Wrap).unwrap();
        let n = s.neighbours(0, 0);
        assert_eq!(n.as_slice(), &[(4, 0), (1, 0), (0, 4), (0, 1)]);
    }

    #[test]
    fn neighbours_wrap_opposite_corner() {
        let s = Square4::new(5, 5, EdgeBehavior::Wrap).unwrap();
        let n = s.neighbours(4, 4);
        assert_eq!(n.as_slice(), &[(3, 4), (0, 4), (4, 3), (4, 0)]);
    }

    #[test]
    fn neighbours_out_of_bounds_is_empty() {
        let s = Square4::new(3, 3, EdgeBehavior::Wrap).unwrap();
        assert!(s.neighbours(3, 0).is_empty());
        assert!(s.neighbours_flat(9).is_empty());
    }

    #[test]
    fn neighbours_flat_matches_coords() {
        let s = Square4::new(3, 3, EdgeBehavior::Absorb).unwrap();
        // (1,1): up (0,1)=1, down (2,1)=7, left (1,0)=3, right (1,2)=5
        assert_eq!(s.neighbours_flat(4).as_slice(), &[1, 7, 3, 5]);
    }

    // ── Constructor tests ───────────────────────────────────────

    #[test]
    fn new_zero_rows_returns_error() {
        assert_eq!(
            Square4::new(0, 5, EdgeBehavior::Absorb),
            Err(SpaceError::EmptySpace)
        );
    }

    #[test]
    fn new_zero_cols_returns_error() {
        assert_eq!(
            Square4::new(5, 0, EdgeBehavior::Absorb),
            Err(SpaceError::EmptySpace)
        );
    }

    #[test]
    fn new_rejects_dims_exceeding_max() {
        let big = Square4::MAX_DIM + 1;
        assert!(matches!(
            Square4::new(big, 1, EdgeBehavior::Absorb),
            Err(SpaceError::DimensionTooLarge { name: "rows", .. })
        ));
        assert!(matches!(
            Square4::new(1, big, EdgeBehavior::Absorb),
            Err(SpaceError::DimensionTooLarge { name: "cols", .. })
        ));
        assert!(Square4::new(Square4::MAX_DIM, 1, EdgeBehavior::Absorb).is_ok());
    }

    #[test]
    fn wrap_resolves_at_max_dim() {
        let max = Square4::MAX_DIM;
        let s = Square4::new(1, max, EdgeBehavior::Wrap).unwrap();
        assert_eq!(
            s.neighbours(0, max - 1).as_slice(),
            &[(0, max - 1), (0, max - 1), (0, max - 2), (0, 0)]
        );
        assert_eq!(
            s.neighbours(0, 0).as_slice(),
            &[(0, 0), (0, 0), (0, max - 1), (0, 1)]
        );
    }

    #[test]
    fn for_grid_matches_shape() {
        let g = Grid::filled(3, 7, 0.0).unwrap();
        let s = Square4::for_grid(&g, EdgeBehavior::Absorb).unwrap();
        assert_eq!((s.rows(), s.cols()), (3, 7));
        assert_eq!(s.cell_count(), g.cell_count());
    }

    #[test]
    fn rank_and_coord_are_inverse() {
        let s = Square4::new(4, 6, EdgeBehavior::Absorb).unwrap();
        for i in 0..s.cell_count() {
            let (r, c) = s.coord_of(i).unwrap();
            assert_eq!(s.canonical_rank(r, c), Some(i));
        }
        assert_eq!(s.canonical_rank(4, 0), None);
        assert_eq!(s.coord_of(24), None);
    }

    // ── Degenerate shapes ──────────────────────────────────────

    #[test]
    fn single_cell_absorb_has_no_neighbours() {
        let s = Square4::new(1, 1, EdgeBehavior::Absorb).unwrap();
        assert!(s.neighbours(0, 0).is_empty());
        assert_eq!(s.max_neighbour_degree(), 0);
    }

    #[test]
    fn single_cell_wrap_loops_to_self() {
        let s = Square4::new(1, 1, EdgeBehavior::Wrap).unwrap();
        let n = s.neighbours(0, 0);
        assert_eq!(n.len(), 4);
        assert!(n.iter().all(|&nb| nb == (0, 0)));
    }

    #[test]
    fn single_row_absorb() {
        let s = Square4::new(1, 4, EdgeBehavior::Absorb).unwrap();
        assert_eq!(s.neighbours(0, 0).as_slice(), &[(0, 1)]);
        assert_eq!(s.neighbours(0, 2).as_slice(), &[(0, 1), (0, 3)]);
        assert_eq!(s.max_neighbour_degree(), 2);
    }

    #[test]
    fn max_degree_absorb() {
        let two = Square4::new(2, 2, EdgeBehavior::Absorb).unwrap();
        assert_eq!(two.max_neighbour_degree(), 2);
        let three = Square4::new(3, 3, EdgeBehavior::Absorb).unwrap();
        assert_eq!(three.max_neighbour_degree(), 4);
    }

    // ── Compliance suites ───────────────────────────────────────

    #[test]
    fn compliance_absorb() {
        let s = Square4::new(6, 5, EdgeBehavior::Absorb).unwrap();
        compliance::run_full_compliance(&s);
    }

    #[test]
    fn compliance_clamp() {
        let s = Square4::new(6, 5, EdgeBehavior::Clamp).unwrap();
        compliance::run_full_compliance(&s);
    }

    #[test]
    fn compliance_wrap() {
        let s = Square4::new(6, 5, EdgeBehavior::Wrap).unwrap();
        compliance::run_full_compliance(&s);
    }

    // ── Property tests ──────────────────────────────────────────

    fn arb_edge() -> impl Strategy<Value = EdgeBehavior> {
        prop_oneof![
            Just(EdgeBehavior::Absorb),
            Just(EdgeBehavior::Clamp),
            Just(EdgeBehavior::Wrap),
        ]
    }

    proptest! {
        #[test]
        fn absorb_degree_matches_position(
            rows in 2usize..10,
            cols in 2usize..10,
            r in 0usize..10, c in 0usize..10,
        ) {
            let r = r % rows;
            let c = c % cols;
            let s = Square4::new(rows, cols, EdgeBehavior::Absorb).unwrap();
            let on_row_edge = r == 0 || r == rows - 1;
            let on_col_edge = c == 0 || c == cols - 1;
            let expected = 4 - usize::from(on_row_edge) - usize::from(on_col_edge);
            prop_assert_eq!(s.neighbours(r, c).len(), expected);
        }

        #[test]
        fn neighbours_symmetric(
            rows in 2usize..10,
            cols in 2usize..10,
            edge in arb_edge(),
            r in 0usize..10, c in 0usize..10,
        ) {
            let r = r % rows;
            let c = c % cols;
            let s = Square4::new(rows, cols, edge).unwrap();
            for nb in s.neighbours(r, c) {
                prop_assert!(
                    s.neighbours(nb.0, nb.1).contains(&(r, c)),
                    "neighbour symmetry violated: {:?} in N({:?}) but not vice versa",
                    nb, (r, c),
                );
            }
        }
    }
}
