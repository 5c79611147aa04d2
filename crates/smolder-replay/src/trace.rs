//! Per-step hash traces of a run.

use smolder_core::{SimError, StepId};
use smolder_engine::{CancelToken, PropagationWorld, RandomSource};

use crate::hash::{config_hash, grid_hash};

/// Grid fingerprints taken at every step of a run.
///
/// Index 0 of [`hashes`](Self::hashes) is the grid before the first step;
/// index `k` is the grid after step `k`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunTrace {
    /// [`config_hash`] of the run, when the source exposes its seed.
    pub config_hash: Option<u64>,
    /// Grid hashes from step 0 onward.
    pub hashes: Vec<u64>,
}

impl RunTrace {
    /// Drive `world` through its remaining steps, hashing after each.
    ///
    /// # Errors
    ///
    /// Any error raised by [`PropagationWorld::step_sync`].
    pub fn record<R: RandomSource>(world: &mut PropagationWorld<R>) -> Result<Self, SimError> {
        Self::record_with_cancel(world, None)
    }

    /// Like [`record`](Self::record), but checks `cancel` before every step.
    ///
    /// The trace grows one hash per completed step; nothing is reserved up
    /// front from the step budget.
    ///
    /// # Errors
    ///
    /// [`SimError::Cancelled`] carrying the steps completed, or any error
    /// raised by [`PropagationWorld::step_sync`].
    pub fn record_with_cancel<R: RandomSource>(
        world: &mut PropagationWorld<R>,
        cancel: Option<&CancelToken>,
    ) -> Result<Self, SimError> {
        let config_hash = world
            .source()
            .seed()
            .map(|seed| config_hash(seed, world.params(), world.config()));
        let mut hashes = vec![grid_hash(world.snapshot())];
        while world.remaining_steps() > 0 {
            if cancel.is_some_and(CancelToken::is_cancelled) {
                return Err(SimError::Cancelled {
                    completed_steps: world.current_step().0,
                });
            }
            let result = world.step_sync()?;
            hashes.push(grid_hash(result.snapshot));
        }
        Ok(Self {
            config_hash,
            hashes,
        })
    }

    /// Number of steps recorded (excluding the initial grid).
    pub fn steps(&self) -> usize {
        self.hashes.len().saturating_sub(1)
    }

    /// Hash of the grid at `step`, if recorded.
    pub fn hash_at(&self, step: StepId) -> Option<u64> {
        self.hashes.get(step.0 as usize).copied()
    }

    /// Hash of the last recorded grid.
    pub fn final_hash(&self) -> Option<u64> {
        self.hashes.last().copied()
    }
}
