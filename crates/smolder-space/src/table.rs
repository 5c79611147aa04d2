//! Precomputed flat-index adjacency.

use crate::square4::Square4;

/// Every cell's neighbours, flattened into one buffer.
///
/// Built once per run so the per-step kernel does index lookups instead
/// of re-resolving edges for every cell on every step. Neighbours of cell
/// `i` are `indices[offsets[i]..offsets[i + 1]]`, in the lattice's
/// up, down, left, right order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NeighbourTable {
    offsets: Vec<usize>,
    indices: Vec<usize>,
}

impl NeighbourTable {
    /// Build the table for `space`.
    pub fn build(space: &Square4) -> Self {
        let n = space.cell_count();
        let mut offsets = Vec::with_capacity(n + 1);
        let mut indices = Vec::with_capacity(n * 4);
        offsets.push(0);
        for i in 0..n {
            indices.extend(space.neighbours_flat(i));
            offsets.push(indices.len());
        }
        Self { offsets, indices }
    }

    /// Number of cells covered.
    pub fn cell_count(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Neighbours of cell `index` as flat indices.
    ///
    /// # Panics
    ///
    /// Panics if `index >= cell_count()`.
    #[inline]
    pub fn neighbours(&self, index: usize) -> &[usize] {
        &self.indices[self.offsets[index]..self.offsets[index + 1]]
    }

    /// Total number of (cell, neighbour) pairs.
    pub fn edge_count(&self) -> usize {
        self.indices.len()
    }
}
