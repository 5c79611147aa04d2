//! Smolder: stochastic risk propagation over 2D grids.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Smolder sub-crates. For most users, adding `smolder` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use smolder::prelude::*;
//!
//! let grid = Grid::from_rows(&[[1.0, 0.0], [0.0, 0.0]]).unwrap();
//!
//! // Entropy-seeded, default rule and edges.
//! let out = simulate(&grid, 1.0, 3).unwrap();
//! assert_eq!(out.shape(), grid.shape());
//!
//! // Reproducible.
//! let a = simulate_seeded(&grid, 1.0, 3, 42).unwrap();
//! let b = simulate_seeded(&grid, 1.0, 3, 42).unwrap();
//! assert_eq!(a, b);
//!
//! // Fully configured, with a run report.
//! let outcome = simulate_with(
//!     &grid,
//!     &SimulationParams::new(1.5, 10).unwrap(),
//!     &EngineConfig::default()
//!         .with_edge(EdgeBehavior::Wrap)
//!         .with_execution(Execution::Parallel),
//!     &ChaChaSource::new(7),
//!     None,
//! )
//! .unwrap();
//! assert_eq!(outcome.report.steps_completed, 10);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `smolder-core` | `Grid`, `StepId`, `SimError` |
//! | [`space`] | `smolder-space` | Lattice, edge policies, neighbour tables |
//! | [`engine`] | `smolder-engine` | Kernel, worlds, config, randomness, cancellation |
//! | [`replay`] | `smolder-replay` | Grid hashing, run traces, divergence reports |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core value types (`smolder-core`).
pub use smolder_core as types;

/// Lattice topology (`smolder-space`).
///
/// [`space::Square4`] resolves Von Neumann neighbours under an
/// [`space::EdgeBehavior`]; [`space::NeighbourTable`] caches them.
pub use smolder_space as space;

/// Propagation engine (`smolder-engine`).
///
/// [`engine::simulate`] for one-shot runs, [`engine::PropagationWorld`] for
/// stepping one generation at a time.
pub use smolder_engine as engine;

/// Reproducibility checks (`smolder-replay`).
///
/// Record with [`replay::RunTrace`], compare with
/// [`replay::compare_traces`].
pub use smolder_replay as replay;

/// Common imports for typical Smolder usage.
///
/// ```rust
/// use smolder::prelude::*;
/// ```
///
/// The prelude is enough to plug in a custom randomness source:
///
/// ```rust
/// use smolder::prelude::*;
///
/// /// Every draw is zero, so every cell with burning neighbours ignites.
/// struct Eager;
/// struct EagerStream;
///
/// impl UnitStream for EagerStream {
///     fn next_unit(&mut self) -> f64 {
///         0.0
///     }
/// }
///
/// impl RandomSource for Eager {
///     type Stream = EagerStream;
///     fn stream_at(&self, _step: StepId, _first_cell: usize) -> EagerStream {
///         EagerStream
///     }
/// }
///
/// let grid = Grid::from_rows(&[[1.0, 0.0], [0.0, 0.0]]).unwrap();
/// let params = SimulationParams::new(1.0, 1).unwrap();
/// let out = simulate_with(&grid, &params, &EngineConfig::default(), &Eager, None).unwrap();
/// assert_eq!(out.grid.to_rows(), vec![vec![1.0, 0.3], vec![0.3, 0.0]]);
/// ```
pub mod prelude {
    // Core types
    pub use smolder_core::{Grid, SimError, StepId};

    // Space
    pub use smolder_space::EdgeBehavior;

    // Engine
    pub use smolder_engine::{
        simulate, simulate_seeded, simulate_with, CancelToken, ChaChaSource, EngineConfig,
        Execution, PropagationWorld, RandomSource, RunReport, SimulationOutcome,
        SimulationParams, SimulationRequest, SimulationResponse, SpreadRule, StepMetrics,
        StepResult, UnitStream,
    };
}
