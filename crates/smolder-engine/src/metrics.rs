//! Per-step and per-run metrics for the propagation engine.
//!
//! [`StepMetrics`] captures what one step did; [`RunReport`] aggregates a
//! whole run. Durations are in microseconds.

use smolder_core::StepId;

/// Counters and timings collected during a single step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepMetrics {
    /// The step these metrics describe.
    pub step: StepId,
    /// Cells whose draw fell below their spread probability.
    pub activations: usize,
    /// Uniform draws consumed. Always equals the cell count.
    pub draws: usize,
    /// Time spent in the spread kernel, in microseconds.
    pub kernel_us: u64,
    /// Wall-clock time for the whole step including the buffer swap,
    /// in microseconds.
    pub total_us: u64,
}

/// Summary of a completed run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Steps that ran to completion.
    pub steps_completed: u64,
    /// Sum of [`StepMetrics::activations`] over the run.
    pub activations: u64,
    /// Wall-clock time for the run, in microseconds.
    pub elapsed_us: u64,
    /// Seed that reproduces the run, if the source exposes one.
    pub seed: Option<u64>,
    /// One entry per completed step, in order.
    pub steps: Vec<StepMetrics>,
}

impl RunReport {
    /// Empty report for a run keyed by `seed`.
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Fold one step's metrics into the report.
    pub fn record(&mut self, metrics: StepMetrics) {
        self.steps_completed += 1;
        self.activations += metrics.activations as u64;
        self.steps.push(metrics);
    }

    /// Mean kernel time per step, in microseconds. Zero for an empty run.
    pub fn mean_kernel_us(&self) -> u64 {
        if self.steps.is_empty() {
            return 0;
        }
        self.steps.iter().map(|m| m.kernel_us).sum::<u64>() / self.steps.len() as u64
    }
}
