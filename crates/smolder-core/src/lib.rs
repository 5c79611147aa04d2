//! Core types for the Smolder risk-propagation engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the [`Grid`] value type (a validated, row-major intensity lattice),
//! the [`StepId`] counter, and the [`SimError`] taxonomy shared by every
//! other crate in the workspace.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod grid;
pub mod id;

pub use error::SimError;
pub use grid::Grid;
pub use id::StepId;
