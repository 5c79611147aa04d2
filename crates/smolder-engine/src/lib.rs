//! Stochastic risk-propagation engine.
//!
//! Advances a [`Grid`](smolder_core::Grid) of risk intensities through
//! discrete steps. Each step, every cell draws one uniform value; if it
//! falls below `mean(neighbours) x coefficient x wind_factor`, the cell's
//! intensity rises by a fixed increment (capped at the ceiling). All cells
//! of a step read the same prior snapshot (Jacobi update) and the engine
//! keeps two buffers that swap at each step barrier.
//!
//! Entry points, from simplest to most configurable:
//!
//! - [`simulate`]: entropy-seeded run with default rule and edges
//! - [`simulate_seeded`]: reproducible run from a `u64` seed
//! - [`simulate_with`]: explicit params, config, source, and cancellation
//! - [`PropagationWorld`]: step-at-a-time lockstep API

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cancel;
pub mod config;
mod kernel;
pub mod metrics;
pub mod request;
pub mod rng;
pub mod simulate;
pub mod world;

pub use cancel::CancelToken;
pub use config::{EngineConfig, Execution, SimulationParams, SpreadRule};
pub use metrics::{RunReport, StepMetrics};
pub use request::{SimulationRequest, SimulationResponse};
pub use rng::{ChaChaSource, RandomSource, UnitStream};
pub use simulate::{simulate, simulate_seeded, simulate_with, SimulationOutcome};
pub use world::{PropagationWorld, StepResult};
