//! Spatial edge (boundary) behavior for the lattice.

/// How the lattice resolves neighbours that fall off its edges.
///
/// The propagation rule averages over *existing* neighbours, so the edge
/// policy directly changes how many values enter that mean.
///
/// # Examples
///
/// ```
/// use smolder_space::{Square4, EdgeBehavior};
///
/// // Absorb: corner has 2 neighbours, edge 3, interior 4.
/// let absorb = Square4::new(4, 4, EdgeBehavior::Absorb).unwrap();
/// assert_eq!(absorb.neighbours(0, 0).len(), 2);
/// assert_eq!(absorb.neighbours(0, 1).len(), 3);
/// assert_eq!(absorb.neighbours(1, 1).len(), 4);
///
/// // Wrap: all cells have exactly 4 neighbours (torus).
/// let wrap = Square4::new(4, 4, EdgeBehavior::Wrap).unwrap();
/// assert_eq!(wrap.neighbours(0, 0).len(), 4);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EdgeBehavior {
    /// Out-of-bounds neighbour is omitted (fewer neighbours at edges).
    /// No wraparound.
    #[default]
    Absorb,
    /// Out-of-bounds neighbour maps to the boundary cell (self-loop).
    Clamp,
    /// Out-of-bounds neighbour wraps to the opposite side (periodic).
    Wrap,
}
