//! Step-at-a-time propagation world.
//!
//! [`PropagationWorld`] owns the published grid, a scratch buffer of the
//! same size, and the precomputed neighbour table. Each
//! [`step_sync()`](PropagationWorld::step_sync) runs the kernel from the
//! published grid into the scratch buffer, then swaps them. Readers only
//! ever see whole generations.
//!
//! # Ownership model
//!
//! All mutating methods take `&mut self` and [`StepResult`] borrows the
//! world, so a snapshot cannot be held across the next step.

use std::time::Instant;

use smolder_core::{Grid, SimError, StepId};
use smolder_space::{NeighbourTable, Square4};
use tracing::{debug, trace};

use crate::cancel::CancelToken;
use crate::config::{EngineConfig, SimulationParams};
use crate::kernel::{KernelOutcome, StepKernel};
use crate::metrics::{RunReport, StepMetrics};
use crate::rng::{ChaChaSource, RandomSource};

const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<PropagationWorld<ChaChaSource>>();
    }
};

// ── StepResult ──────────────────────────────────────────────────

/// Result of a successful [`PropagationWorld::step_sync()`] call.
#[derive(Debug)]
pub struct StepResult<'w> {
    /// The step just completed.
    pub step: StepId,
    /// Grid state after this step.
    pub snapshot: &'w Grid,
    /// Counters and timings for this step.
    pub metrics: StepMetrics,
}

// ── PropagationWorld ────────────────────────────────────────────

/// A grid plus everything needed to advance it.
///
/// # Example
///
/// ```
/// use smolder_core::Grid;
/// use smolder_engine::{ChaChaSource, EngineConfig, PropagationWorld, SimulationParams};
///
/// let grid = Grid::from_rows(&[[1.0, 0.0], [0.0, 0.0]]).unwrap();
/// let params = SimulationParams::new(1.0, 2).unwrap();
/// let mut world =
///     PropagationWorld::new(grid, params, EngineConfig::default(), ChaChaSource::new(3))
///         .unwrap();
///
/// while world.remaining_steps() > 0 {
///     let result = world.step_sync().unwrap();
///     assert!(result.snapshot.max_value() <= 1.0);
/// }
/// assert_eq!(world.current_step().0, 2);
/// ```
pub struct PropagationWorld<R: RandomSource> {
    grid: Grid,
    scratch: Vec<f64>,
    space: Square4,
    table: NeighbourTable,
    params: SimulationParams,
    config: EngineConfig,
    source: R,
    current_step: StepId,
    last_metrics: StepMetrics,
}

impl<R: RandomSource> PropagationWorld<R> {
    /// Validate inputs and build a world at step 0.
    ///
    /// # Errors
    ///
    /// - [`SimError::InvalidParameter`] if `params` or `config` fail
    ///   validation.
    /// - [`SimError::InvalidGridShape`] if the grid is too large for the
    ///   lattice.
    pub fn new(
        grid: Grid,
        params: SimulationParams,
        config: EngineConfig,
        source: R,
    ) -> Result<Self, SimError> {
        params.validate()?;
        config.validate()?;
        let space = Square4::for_grid(&grid, config.edge)?;
        let table = space.neighbour_table();
        let scratch = vec![0.0; grid.cell_count()];
        Ok(Self {
            grid,
            scratch,
            space,
            table,
            params,
            config,
            source,
            current_step: StepId::default(),
            last_metrics: StepMetrics::default(),
        })
    }

    /// Run one step.
    ///
    /// Steps past the configured budget are allowed; only
    /// [`run()`](Self::run) stops at it.
    ///
    /// # Errors
    ///
    /// [`SimError::InvalidCellValue`] if the kernel produced an out-of-range
    /// value; the published grid is left untouched.
    pub fn step_sync(&mut self) -> Result<StepResult<'_>, SimError> {
        let metrics = self.advance(None)?;
        Ok(StepResult {
            step: self.current_step,
            snapshot: &self.grid,
            metrics,
        })
    }

    /// Run the remaining steps of the budget.
    ///
    /// `cancel` is checked before every step and between rows. On
    /// cancellation the step in flight is discarded and the world stays at
    /// the last completed step.
    ///
    /// # Errors
    ///
    /// [`SimError::Cancelled`] carrying the number of steps completed, or
    /// any error from [`step_sync()`](Self::step_sync).
    pub fn run(&mut self, cancel: Option<&CancelToken>) -> Result<RunReport, SimError> {
        let started = Instant::now();
        let mut report = RunReport::new(self.source.seed());
        debug!(
            rows = self.grid.rows(),
            cols = self.grid.cols(),
            steps = self.remaining_steps(),
            wind_factor = self.params.wind_factor,
            seed = ?report.seed,
            execution = ?self.config.execution,
            "propagation run starting"
        );

        while self.remaining_steps() > 0 {
            if cancel.is_some_and(CancelToken::is_cancelled) {
                debug!(completed = self.current_step.0, "propagation run cancelled");
                return Err(SimError::Cancelled {
                    completed_steps: self.current_step.0,
                });
            }
            match self.advance(cancel) {
                Ok(metrics) => report.record(metrics),
                Err(e) => {
                    debug!(completed = self.current_step.0, error = %e, "propagation run stopped");
                    return Err(e);
                }
            }
        }

        report.elapsed_us = started.elapsed().as_micros() as u64;
        debug!(
            steps = report.steps_completed,
            activations = report.activations,
            elapsed_us = report.elapsed_us,
            "propagation run finished"
        );
        Ok(report)
    }

    /// Replace the grid and rewind to step 0.
    ///
    /// The neighbour table is rebuilt only if the shape changed.
    ///
    /// # Errors
    ///
    /// [`SimError::InvalidGridShape`] if the new grid is too large for the
    /// lattice. The world is unchanged on error.
    pub fn reset(&mut self, grid: Grid) -> Result<(), SimError> {
        if grid.shape() != self.grid.shape() {
            let space = Square4::for_grid(&grid, self.config.edge)?;
            self.table = space.neighbour_table();
            self.space = space;
            self.scratch = vec![0.0; grid.cell_count()];
        }
        self.grid = grid;
        self.current_step = StepId::default();
        self.last_metrics = StepMetrics::default();
        Ok(())
    }

    /// The published grid.
    pub fn snapshot(&self) -> &Grid {
        &self.grid
    }

    /// Steps completed since construction or the last reset.
    pub fn current_step(&self) -> StepId {
        self.current_step
    }

    /// Steps left before the configured budget is met.
    pub fn remaining_steps(&self) -> u64 {
        self.params.steps.saturating_sub(self.current_step.0)
    }

    /// Metrics from the most recent step.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }

    /// Run parameters.
    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    /// Engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The lattice the grid lives on.
    pub fn space(&self) -> &Square4 {
        &self.space
    }

    /// The randomness source.
    pub fn source(&self) -> &R {
        &self.source
    }

    /// Consume the world, returning the published grid.
    pub fn into_grid(self) -> Grid {
        self.grid
    }

    fn advance(&mut self, cancel: Option<&CancelToken>) -> Result<StepMetrics, SimError> {
        let step = self.current_step.next();
        let started = Instant::now();

        let kernel = StepKernel {
            table: &self.table,
            rule: self.config.rule,
            wind_factor: self.params.wind_factor,
            cols: self.grid.cols(),
            source: &self.source,
            step,
        };
        let outcome = kernel.run(
            self.grid.as_slice(),
            &mut self.scratch,
            self.config.execution,
            cancel,
        );
        let kernel_us = started.elapsed().as_micros() as u64;

        let activations = match outcome {
            KernelOutcome::Completed { activations } => activations,
            KernelOutcome::Interrupted => {
                debug!(step = step.0, "step interrupted, discarding partial buffer");
                return Err(SimError::Cancelled {
                    completed_steps: self.current_step.0,
                });
            }
        };

        self.grid.swap_buffer(&mut self.scratch)?;
        self.current_step = step;

        let metrics = StepMetrics {
            step,
            activations,
            draws: self.grid.cell_count(),
            kernel_us,
            total_us: started.elapsed().as_micros() as u64,
        };
        self.last_metrics = metrics;
        trace!(step = step.0, activations, kernel_us, "step complete");
        Ok(metrics)
    }
}

impl<R: RandomSource> std::fmt::Debug for PropagationWorld<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropagationWorld")
            .field("shape", &self.grid.shape())
            .field("current_step", &self.current_step)
            .field("params", &self.params)
            .field("config", &self.config)
            .field("seed", &self.source.seed())
            .finish()
    }
}
