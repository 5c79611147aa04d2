//! Grid and trace comparison.
//!
//! Grids are compared cell-exact, so a report names exactly which cells
//! disagree. Traces only carry hashes and are compared hash by hash.

use smolder_core::{Grid, StepId};

use crate::trace::RunTrace;

/// One cell whose bit pattern differs between two grids.
#[derive(Clone, Debug, PartialEq)]
pub struct CellDivergence {
    /// Row of the cell.
    pub row: usize,
    /// Column of the cell.
    pub col: usize,
    /// Value in the recorded run.
    pub recorded: f64,
    /// Value in the replayed run.
    pub replayed: f64,
}

/// Why two runs were judged different.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DivergenceReason {
    /// Seed, parameters, rule, or edge policy differ.
    ConfigMismatch,
    /// Grids have different dimensions.
    ShapeMismatch,
    /// Grid hashes differ; no cell data was available.
    HashMismatch,
    /// One or more cells differ; see [`DivergenceReport::cells`].
    CellMismatch,
    /// One trace ended before the other.
    TraceLength {
        /// Steps in the recorded trace.
        recorded: usize,
        /// Steps in the replayed trace.
        replayed: usize,
    },
}

/// The first point at which two runs disagree.
#[derive(Clone, Debug, PartialEq)]
pub struct DivergenceReport {
    /// Step at which divergence was detected.
    pub step: StepId,
    /// What kind of difference was found.
    pub reason: DivergenceReason,
    /// Cell-level differences. Empty unless `reason` is
    /// [`DivergenceReason::CellMismatch`].
    pub cells: Vec<CellDivergence>,
}

impl DivergenceReport {
    fn new(step: StepId, reason: DivergenceReason) -> Self {
        Self {
            step,
            reason,
            cells: Vec::new(),
        }
    }
}

/// Compare two grids observed at `step`. `None` means bit-identical.
///
/// Every cell's bit pattern is checked; equal hashes are not trusted.
pub fn compare_grids(recorded: &Grid, replayed: &Grid, step: StepId) -> Option<DivergenceReport> {
    if recorded.shape() != replayed.shape() {
        return Some(DivergenceReport::new(step, DivergenceReason::ShapeMismatch));
    }

    let cols = recorded.cols();
    let cells: Vec<CellDivergence> = recorded
        .as_slice()
        .iter()
        .zip(replayed.as_slice())
        .enumerate()
        .filter(|(_, (a, b))| a.to_bits() != b.to_bits())
        .map(|(i, (&a, &b))| CellDivergence {
            row: i / cols,
            col: i % cols,
            recorded: a,
            replayed: b,
        })
        .collect();
    if cells.is_empty() {
        return None;
    }

    Some(DivergenceReport {
        step,
        reason: DivergenceReason::CellMismatch,
        cells,
    })
}

/// Find the first step at which two traces disagree. `None` means the
/// traces are identical.
///
/// A config mismatch is reported at step 0 when both traces carry a
/// config hash.
pub fn compare_traces(recorded: &RunTrace, replayed: &RunTrace) -> Option<DivergenceReport> {
    if let (Some(a), Some(b)) = (recorded.config_hash, replayed.config_hash) {
        if a != b {
            return Some(DivergenceReport::new(
                StepId(0),
                DivergenceReason::ConfigMismatch,
            ));
        }
    }

    if let Some(k) = recorded
        .hashes
        .iter()
        .zip(&replayed.hashes)
        .position(|(a, b)| a != b)
    {
        return Some(DivergenceReport::new(
            StepId(k as u64),
            DivergenceReason::HashMismatch,
        ));
    }

    if recorded.hashes.len() != replayed.hashes.len() {
        let common = recorded.hashes.len().min(replayed.hashes.len());
        return Some(DivergenceReport::new(
            StepId(common as u64),
            DivergenceReason::TraceLength {
                recorded: recorded.steps(),
                replayed: replayed.steps(),
            },
        ));
    }

    None
}
