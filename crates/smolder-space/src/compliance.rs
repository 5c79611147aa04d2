//! Lattice compliance test helpers.
//!
//! These functions verify the invariants the propagation kernel relies
//! on. Reused across the edge-behavior test cases in `square4`.

use crate::square4::Square4;
use indexmap::IndexSet;

/// Assert that `b in neighbours(a)` implies `a in neighbours(b)`.
pub fn assert_neighbours_symmetric(space: &Square4) {
    for i in 0..space.cell_count() {
        for nb in space.neighbours_flat(i) {
            assert!(
                space.neighbours_flat(nb).contains(&i),
                "neighbour symmetry violated: {nb} in N({i}) but {i} not in N({nb})"
            );
        }
    }
}

/// Assert that every neighbour index is in bounds.
pub fn assert_neighbours_in_bounds(space: &Square4) {
    let n = space.cell_count();
    for i in 0..n {
        for nb in space.neighbours_flat(i) {
            assert!(nb < n, "neighbour {nb} of {i} out of bounds (n = {n})");
        }
    }
}

/// Assert that no cell reports more than `max_neighbour_degree` neighbours
/// and that some cell reaches it.
pub fn assert_degree_bound(space: &Square4) {
    let max = space.max_neighbour_degree();
    let observed = (0..space.cell_count())
        .map(|i| space.neighbours_flat(i).len())
        .max()
        .unwrap_or(0);
    assert_eq!(observed, max, "max_neighbour_degree mismatch");
}

/// Assert that two neighbour queries return the same order.
pub fn assert_neighbour_order_deterministic(space: &Square4) {
    for i in 0..space.cell_count() {
        assert_eq!(space.neighbours_flat(i), space.neighbours_flat(i));
    }
}

/// Assert that rank/coord conversion covers every cell exactly once.
pub fn assert_canonical_ordering_complete(space: &Square4) {
    let mut seen = IndexSet::new();
    for r in 0..space.rows() {
        for c in 0..space.cols() {
            let rank = space
                .canonical_rank(r, c)
                .expect("in-bounds coordinate must have a rank");
            assert!(seen.insert(rank), "duplicate rank {rank}");
            assert_eq!(space.coord_of(rank), Some((r, c)));
        }
    }
    assert_eq!(seen.len(), space.cell_count());
    assert_eq!(seen.first(), Some(&0));
}

/// Run all compliance checks on a lattice.
pub fn run_full_compliance(space: &Square4) {
    assert_neighbours_symmetric(space);
    assert_neighbours_in_bounds(space);
    assert_degree_bound(space);
    assert_neighbour_order_deterministic(space);
    assert_canonical_ordering_complete(space);
}
