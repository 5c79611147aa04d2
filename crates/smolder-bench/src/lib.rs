//! Benchmark profiles and utilities for the Smolder propagation engine.
//!
//! Provides pre-built [`BenchProfile`]s for benchmarking and examples:
//!
//! - [`reference_profile`]: 100x100 grid (10K cells)
//! - [`stress_profile`]: 316x316 grid (~100K cells)
//! - [`seeded_grid`]: deterministic sparse ignitions over a low background

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use smolder_core::{Grid, SimError};
use smolder_engine::{EngineConfig, Execution, SimulationParams};
use smolder_space::EdgeBehavior;

/// Everything needed to build a world for a benchmark run.
#[derive(Clone, Debug)]
pub struct BenchProfile {
    /// Initial grid.
    pub grid: Grid,
    /// Wind factor and step budget.
    pub params: SimulationParams,
    /// Rule, edges, and execution mode.
    pub config: EngineConfig,
}

impl BenchProfile {
    /// Same profile with a different execution mode.
    pub fn with_execution(mut self, execution: Execution) -> Self {
        self.config = self.config.with_execution(execution);
        self
    }
}

/// Build a reference benchmark profile: 100x100 grid (10K cells), 1%
/// ignitions, wind 1.2, 50 steps.
pub fn reference_profile(seed: u64) -> Result<BenchProfile, SimError> {
    profile(100, seed)
}

/// Build a stress benchmark profile: 316x316 grid (~100K cells).
///
/// Same settings as [`reference_profile`] at 10x the cell count.
pub fn stress_profile(seed: u64) -> Result<BenchProfile, SimError> {
    profile(316, seed)
}

fn profile(side: usize, seed: u64) -> Result<BenchProfile, SimError> {
    Ok(BenchProfile {
        grid: seeded_grid(side, side, 0.01, seed)?,
        params: SimulationParams::new(1.2, 50)?,
        config: EngineConfig::default().with_edge(EdgeBehavior::Absorb),
    })
}

/// Generate a deterministic grid.
///
/// Each cell ignites (value 1.0) with probability `ignition_rate`;
/// otherwise it takes a background value in `[0, 0.2)`.
pub fn seeded_grid(
    rows: usize,
    cols: usize,
    ignition_rate: f64,
    seed: u64,
) -> Result<Grid, SimError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let cells = (0..rows * cols)
        .map(|_| {
            if rng.random::<f64>() < ignition_rate {
                1.0
            } else {
                rng.random::<f64>() * 0.2
            }
        })
        .collect();
    Grid::from_flat(rows, cols, cells)
}
