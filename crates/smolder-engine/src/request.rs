//! Wire-level request and response shapes.
//!
//! These mirror the JSON a service front end would exchange:
//!
//! ```json
//! { "grid": [[1.0, 0.0], [0.0, 0.0]], "wind_factor": 1.0, "steps": 3 }
//! ```
//!
//! ```json
//! { "simulation_result": [[1.0, 0.3], [0.3, 0.0]] }
//! ```
//!
//! `wind_factor` and `steps` are optional and default to `1.0` and `3`.
//! `steps` is carried as a raw number so that negative or fractional
//! values reach validation instead of failing inside the decoder.

use serde::{Deserialize, Serialize};
use smolder_core::{Grid, SimError};

use crate::cancel::CancelToken;
use crate::config::{EngineConfig, SimulationParams, DEFAULT_STEPS, DEFAULT_WIND_FACTOR};
use crate::rng::RandomSource;
use crate::simulate::simulate_with;

fn default_wind_factor() -> f64 {
    DEFAULT_WIND_FACTOR
}

fn default_steps() -> f64 {
    DEFAULT_STEPS as f64
}

/// An incoming simulation request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    /// Initial intensities, row-major.
    pub grid: Vec<Vec<f64>>,
    /// Spread multiplier.
    #[serde(default = "default_wind_factor")]
    pub wind_factor: f64,
    /// Step count, validated as a non-negative integer.
    #[serde(default = "default_steps")]
    pub steps: f64,
}

impl SimulationRequest {
    /// Request with default `wind_factor` and `steps`.
    pub fn new(grid: Vec<Vec<f64>>) -> Self {
        Self {
            grid,
            wind_factor: DEFAULT_WIND_FACTOR,
            steps: DEFAULT_STEPS as f64,
        }
    }

    /// Check every field and convert to engine types.
    ///
    /// The grid is checked first, then `steps`, then `wind_factor`.
    ///
    /// # Errors
    ///
    /// Any validation variant of [`SimError`].
    pub fn validate(&self) -> Result<(Grid, SimulationParams), SimError> {
        let grid = Grid::from_rows(&self.grid)?;
        let params = SimulationParams::from_raw(self.wind_factor, self.steps)?;
        Ok((grid, params))
    }

    /// Validate, run, and wrap the result.
    ///
    /// # Errors
    ///
    /// Validation errors from [`validate()`](Self::validate), or
    /// [`SimError::Cancelled`].
    pub fn execute<R: RandomSource>(
        &self,
        config: &EngineConfig,
        source: &R,
        cancel: Option<&CancelToken>,
    ) -> Result<SimulationResponse, SimError> {
        let (grid, params) = self.validate()?;
        let outcome = simulate_with(&grid, &params, config, source, cancel)?;
        Ok(outcome.grid.into())
    }
}

/// A completed simulation, as returned to callers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationResponse {
    /// Grid after the last step.
    pub simulation_result: Grid,
}

impl From<Grid> for SimulationResponse {
    fn from(simulation_result: Grid) -> Self {
        Self { simulation_result }
    }
}
