//! Run parameters and engine configuration.
//!
//! [`SimulationParams`] carries the per-run inputs (`wind_factor`, `steps`).
//! [`EngineConfig`] carries everything else: the spread rule constants, the
//! edge policy, and the execution mode. Both validate before any step runs.

use smolder_core::SimError;
use smolder_space::EdgeBehavior;

// ── SimulationParams ──────────────────────────────────────────────

/// Default multiplier on spread probability.
pub const DEFAULT_WIND_FACTOR: f64 = 1.0;

/// Default number of propagation steps.
pub const DEFAULT_STEPS: u64 = 3;

/// Per-run inputs to a simulation.
///
/// `steps` is a `u64`, so negative and fractional counts are unrepresentable
/// once constructed. Callers holding untyped numbers (e.g. decoded JSON)
/// go through [`SimulationParams::from_raw`], which rejects them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationParams {
    /// Multiplier on spread probability. Must be finite and `>= 0`.
    /// Default: 1.0.
    pub wind_factor: f64,
    /// Number of steps to run. Default: 3.
    pub steps: u64,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            wind_factor: DEFAULT_WIND_FACTOR,
            steps: DEFAULT_STEPS,
        }
    }
}

impl SimulationParams {
    /// Build validated parameters.
    ///
    /// # Errors
    ///
    /// [`SimError::InvalidParameter`] if `wind_factor` is negative or
    /// non-finite.
    pub fn new(wind_factor: f64, steps: u64) -> Result<Self, SimError> {
        let params = Self { wind_factor, steps };
        params.validate()?;
        Ok(params)
    }

    /// Build parameters from untyped numbers, as received at a wire boundary.
    ///
    /// # Errors
    ///
    /// [`SimError::InvalidParameter`] if `wind_factor` is negative or
    /// non-finite, or if `steps` is negative, non-finite, non-integral, or
    /// larger than `u64::MAX`.
    pub fn from_raw(wind_factor: f64, steps: f64) -> Result<Self, SimError> {
        if !steps.is_finite() {
            return Err(SimError::parameter(
                "steps",
                format!("must be finite, got {steps}"),
            ));
        }
        if steps < 0.0 {
            return Err(SimError::parameter(
                "steps",
                format!("must be >= 0, got {steps}"),
            ));
        }
        if steps.fract() != 0.0 {
            return Err(SimError::parameter(
                "steps",
                format!("must be an integer, got {steps}"),
            ));
        }
        // 2^64 is the first f64 that no longer fits.
        if steps >= 18_446_744_073_709_551_616.0 {
            return Err(SimError::parameter(
                "steps",
                format!("must fit in u64, got {steps}"),
            ));
        }
        Self::new(wind_factor, steps as u64)
    }

    /// Check parameter invariants.
    ///
    /// # Errors
    ///
    /// [`SimError::InvalidParameter`] naming `wind_factor` if it is
    /// negative or non-finite.
    pub fn validate(&self) -> Result<(), SimError> {
        if !self.wind_factor.is_finite() {
            return Err(SimError::parameter(
                "wind_factor",
                format!("must be finite, got {}", self.wind_factor),
            ));
        }
        if self.wind_factor < 0.0 {
            return Err(SimError::parameter(
                "wind_factor",
                format!("must be >= 0, got {}", self.wind_factor),
            ));
        }
        Ok(())
    }
}

// ── SpreadRule ────────────────────────────────────────────────────

/// Constants of the spread kernel.
///
/// Spread probability for a cell is `min(1, mean(neighbours) x coefficient x
/// wind_factor)`. On activation the cell becomes
/// `min(ceiling, value + increment)`, never lower than its prior value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpreadRule {
    /// Scale applied to the neighbour mean. Default: 0.6.
    pub coefficient: f64,
    /// Amount added to an activated cell. Default: 0.3.
    pub increment: f64,
    /// Upper bound on any cell value. Must be in `(0, 1]`. Default: 1.0.
    pub ceiling: f64,
}

impl Default for SpreadRule {
    fn default() -> Self {
        Self {
            coefficient: 0.6,
            increment: 0.3,
            ceiling: 1.0,
        }
    }
}

impl SpreadRule {
    /// Check rule invariants.
    ///
    /// # Errors
    ///
    /// [`SimError::InvalidParameter`] if any constant is non-finite,
    /// `coefficient` or `increment` is negative, or `ceiling` is outside
    /// `(0, 1]`.
    pub fn validate(&self) -> Result<(), SimError> {
        for (name, value) in [
            ("coefficient", self.coefficient),
            ("increment", self.increment),
            ("ceiling", self.ceiling),
        ] {
            if !value.is_finite() {
                return Err(SimError::parameter(
                    name,
                    format!("must be finite, got {value}"),
                ));
            }
        }
        if self.coefficient < 0.0 {
            return Err(SimError::parameter(
                "coefficient",
                format!("must be >= 0, got {}", self.coefficient),
            ));
        }
        if self.increment < 0.0 {
            return Err(SimError::parameter(
                "increment",
                format!("must be >= 0, got {}", self.increment),
            ));
        }
        if self.ceiling <= 0.0 || self.ceiling > 1.0 {
            return Err(SimError::parameter(
                "ceiling",
                format!("must be in (0, 1], got {}", self.ceiling),
            ));
        }
        Ok(())
    }

    /// Spread probability for a cell whose neighbours average `mean`.
    #[inline]
    pub fn probability(&self, mean: f64, wind_factor: f64) -> f64 {
        (mean * self.coefficient * wind_factor).min(1.0)
    }

    /// Value of a cell at `value` after activation.
    #[inline]
    pub fn activate(&self, value: f64) -> f64 {
        (value + self.increment).min(self.ceiling).max(value)
    }
}

// ── Execution ─────────────────────────────────────────────────────

/// How the kernel walks the grid within a step.
///
/// Both modes produce bit-identical results for the same seed: each row
/// draws from a stream positioned at its first cell, so the work split
/// does not affect which value a cell sees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Execution {
    /// One thread, row-major order.
    #[default]
    Sequential,
    /// Rows fan out across the rayon global pool.
    Parallel,
}

// ── EngineConfig ──────────────────────────────────────────────────

/// Engine-level configuration shared across runs.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EngineConfig {
    /// Spread kernel constants.
    pub rule: SpreadRule,
    /// Neighbour resolution at the grid boundary. Default: absorb.
    pub edge: EdgeBehavior,
    /// Sequential or parallel kernel. Default: sequential.
    pub execution: Execution,
}

impl EngineConfig {
    /// Replace the spread rule.
    pub fn with_rule(mut self, rule: SpreadRule) -> Self {
        self.rule = rule;
        self
    }

    /// Replace the edge policy.
    pub fn with_edge(mut self, edge: EdgeBehavior) -> Self {
        self.edge = edge;
        self
    }

    /// Replace the execution mode.
    pub fn with_execution(mut self, execution: Execution) -> Self {
        self.execution = execution;
        self
    }

    /// Check configuration invariants.
    ///
    /// # Errors
    ///
    /// Propagates [`SpreadRule::validate`] failures.
    pub fn validate(&self) -> Result<(), SimError> {
        self.rule.validate()
    }
}
