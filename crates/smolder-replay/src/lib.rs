//! Reproducibility checks for Smolder runs.
//!
//! A seeded run is bit-reproducible. This crate turns that property into
//! something testable: [`grid_hash`] fingerprints a grid, [`RunTrace`]
//! records the fingerprint after every step, and [`compare_traces`] /
//! [`compare_grids`] locate the first point where two runs disagree.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod compare;
pub mod hash;
pub mod trace;

pub use compare::{compare_grids, compare_traces, CellDivergence, DivergenceReason, DivergenceReport};
pub use hash::{config_hash, grid_hash};
pub use trace::RunTrace;
