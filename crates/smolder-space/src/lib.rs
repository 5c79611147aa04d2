//! Spatial topology for Smolder simulations.
//!
//! Propagation only ever asks one spatial question: which cells are the
//! neighbours of this one? This crate answers it for a rectangular
//! lattice with Von Neumann (4-connected) adjacency and makes the
//! boundary policy an explicit, tested value instead of a side effect of
//! bounds checks.
//!
//! - [`Square4`]: `rows x cols` lattice, neighbours up/down/left/right
//! - [`EdgeBehavior`]: how out-of-bounds neighbours resolve (absorb, clamp, wrap)
//! - [`NeighbourTable`]: precomputed flat-index adjacency for hot loops

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod edge;
pub mod error;
mod grid2d;
pub mod square4;
pub mod table;

#[cfg(test)]
pub(crate) mod compliance;

pub use edge::EdgeBehavior;
pub use error::SpaceError;
pub use square4::Square4;
pub use table::NeighbourTable;
