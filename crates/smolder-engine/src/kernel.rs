//! The spread kernel: one Jacobi step from a read buffer into a write buffer.

use rayon::prelude::*;
use smolder_core::StepId;
use smolder_space::NeighbourTable;

use crate::cancel::CancelToken;
use crate::config::{Execution, SpreadRule};
use crate::rng::{RandomSource, UnitStream};

/// Inputs shared by every row of a step.
pub(crate) struct StepKernel<'a, R> {
    pub table: &'a NeighbourTable,
    pub rule: SpreadRule,
    pub wind_factor: f64,
    pub cols: usize,
    pub source: &'a R,
    pub step: StepId,
}

/// Outcome of one kernel pass.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum KernelOutcome {
    Completed { activations: usize },
    Interrupted,
}

impl<R: RandomSource> StepKernel<'_, R> {
    /// Write the next generation of `prev` into `next`.
    ///
    /// `next` is fully overwritten on completion. When `cancel` fires
    /// mid-pass the contents of `next` are unspecified and must be dropped.
    pub fn run(
        &self,
        prev: &[f64],
        next: &mut [f64],
        execution: Execution,
        cancel: Option<&CancelToken>,
    ) -> KernelOutcome {
        debug_assert_eq!(prev.len(), next.len());
        debug_assert_eq!(prev.len(), self.table.cell_count());

        match execution {
            Execution::Sequential => {
                let mut stream = self.source.stream_at(self.step, 0);
                let mut activations = 0;
                for (r, row) in next.chunks_mut(self.cols).enumerate() {
                    if cancel.is_some_and(CancelToken::is_cancelled) {
                        return KernelOutcome::Interrupted;
                    }
                    activations += self.row(prev, row, r * self.cols, &mut stream);
                }
                KernelOutcome::Completed { activations }
            }
            Execution::Parallel => {
                let activations: Option<usize> = next
                    .par_chunks_mut(self.cols)
                    .enumerate()
                    .map(|(r, row)| {
                        if cancel.is_some_and(CancelToken::is_cancelled) {
                            return None;
                        }
                        let first = r * self.cols;
                        let mut stream = self.source.stream_at(self.step, first);
                        Some(self.row(prev, row, first, &mut stream))
                    })
                    .sum();
                match activations {
                    Some(activations) => KernelOutcome::Completed { activations },
                    None => KernelOutcome::Interrupted,
                }
            }
        }
    }

    /// Update one row starting at flat index `first`. Returns activations.
    #[inline]
    fn row(
        &self,
        prev: &[f64],
        out: &mut [f64],
        first: usize,
        stream: &mut impl UnitStream,
    ) -> usize {
        let mut activations = 0;
        for (k, cell) in out.iter_mut().enumerate() {
            let i = first + k;
            let old = prev[i];
            // One draw per cell regardless of outcome keeps streams aligned.
            let u = stream.next_unit();

            let neighbours = self.table.neighbours(i);
            if neighbours.is_empty() {
                *cell = old;
                continue;
            }
            let sum: f64 = neighbours.iter().map(|&j| prev[j]).sum();
            let mean = sum / neighbours.len() as f64;

            if u < self.rule.probability(mean, self.wind_factor) {
                *cell = self.rule.activate(old);
                activations += 1;
            } else {
                *cell = old;
            }
        }
        activations
    }
}
