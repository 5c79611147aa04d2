//! One-shot simulation entry points.

use smolder_core::{Grid, SimError};

use crate::cancel::CancelToken;
use crate::config::{EngineConfig, SimulationParams};
use crate::metrics::RunReport;
use crate::rng::{ChaChaSource, RandomSource};
use crate::world::PropagationWorld;

/// Final grid plus a summary of how it was produced.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationOutcome {
    /// Grid after the last step.
    pub grid: Grid,
    /// Per-run counters, timings, and the seed if known.
    pub report: RunReport,
}

/// Run `steps` propagation steps with a freshly seeded source.
///
/// Uses the default spread rule, absorbing edges, and sequential execution.
/// The input grid is not modified.
///
/// # Errors
///
/// [`SimError::InvalidParameter`] if `wind_factor` is negative or
/// non-finite.
///
/// # Examples
///
/// ```
/// use smolder_core::Grid;
/// use smolder_engine::simulate;
///
/// let grid = Grid::from_rows(&[[1.0, 0.0], [0.0, 0.0]]).unwrap();
/// let out = simulate(&grid, 1.0, 3).unwrap();
/// assert_eq!(out.shape(), (2, 2));
/// assert_eq!(out.get(0, 0), Some(1.0));
/// ```
pub fn simulate(grid: &Grid, wind_factor: f64, steps: u64) -> Result<Grid, SimError> {
    let params = SimulationParams::new(wind_factor, steps)?;
    let outcome = simulate_with(
        grid,
        &params,
        &EngineConfig::default(),
        &ChaChaSource::from_entropy(),
        None,
    )?;
    Ok(outcome.grid)
}

/// Like [`simulate`], but reproducible: the same `seed` and inputs always
/// give the same grid.
///
/// # Errors
///
/// As for [`simulate`].
pub fn simulate_seeded(
    grid: &Grid,
    wind_factor: f64,
    steps: u64,
    seed: u64,
) -> Result<Grid, SimError> {
    let params = SimulationParams::new(wind_factor, steps)?;
    let outcome = simulate_with(
        grid,
        &params,
        &EngineConfig::default(),
        &ChaChaSource::new(seed),
        None,
    )?;
    Ok(outcome.grid)
}

/// Fully configurable run.
///
/// All validation happens before the first step. With `steps == 0` the
/// returned grid equals the input.
///
/// # Errors
///
/// - [`SimError::InvalidParameter`] from `params` or `config` validation.
/// - [`SimError::InvalidGridShape`] if the grid is too large for the lattice.
/// - [`SimError::Cancelled`] if `cancel` fires before the last step lands.
pub fn simulate_with<R: RandomSource>(
    grid: &Grid,
    params: &SimulationParams,
    config: &EngineConfig,
    source: &R,
    cancel: Option<&CancelToken>,
) -> Result<SimulationOutcome, SimError> {
    let mut world = PropagationWorld::new(grid.clone(), *params, *config, source)?;
    let report = world.run(cancel)?;
    Ok(SimulationOutcome {
        grid: world.into_grid(),
        report,
    })
}
