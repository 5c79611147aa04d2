//! Axis resolution shared by the lattice and its neighbour table.

use crate::edge::EdgeBehavior;

/// Row, column offsets in neighbour order: up, down, left, right.
pub(crate) const VON_NEUMANN: [(i64, i64); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Resolve a single axis value under the given edge behavior.
/// Returns `Some(resolved)` or `None` for Absorb out-of-bounds.
pub(crate) fn resolve_axis(val: i64, len: usize, edge: EdgeBehavior) -> Option<usize> {
    let n = len as i64;
    if val >= 0 && val < n {
        return Some(val as usize);
    }
    match edge {
        EdgeBehavior::Absorb => None,
        EdgeBehavior::Clamp => Some(val.clamp(0, n - 1) as usize),
        EdgeBehavior::Wrap => Some((((val % n) + n) % n) as usize),
    }
}
