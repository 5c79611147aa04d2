//! Hashing utilities for grid and configuration comparison.
//!
//! Uses FNV-1a for fast, deterministic hashing of simulation state.
//! These hashes are not cryptographically secure; they are equality
//! fingerprints for replay comparison.

use smolder_core::Grid;
use smolder_engine::{EngineConfig, SimulationParams};
use smolder_space::EdgeBehavior;

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

#[inline]
fn fnv1a_byte(hash: u64, byte: u8) -> u64 {
    (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
}

#[inline]
fn fnv1a_u64(mut hash: u64, v: u64) -> u64 {
    for &b in &v.to_le_bytes() {
        hash = fnv1a_byte(hash, b);
    }
    hash
}

/// Hash a grid's shape and every cell's bit pattern.
///
/// Shape is folded in first, so a 2x3 and a 3x2 grid with the same flat
/// contents hash differently. `0.0` and `-0.0` hash differently too.
pub fn grid_hash(grid: &Grid) -> u64 {
    let mut hash = FNV_OFFSET;
    hash = fnv1a_u64(hash, grid.rows() as u64);
    hash = fnv1a_u64(hash, grid.cols() as u64);
    for &v in grid.as_slice() {
        hash = fnv1a_u64(hash, v.to_bits());
    }
    hash
}

/// Hash everything besides the grid that determines a run's output.
///
/// Covers the seed, wind factor, step budget, spread rule, and edge policy.
/// Execution mode is excluded because it does not change results.
pub fn config_hash(seed: u64, params: &SimulationParams, config: &EngineConfig) -> u64 {
    let mut hash = FNV_OFFSET;
    hash = fnv1a_u64(hash, seed);
    hash = fnv1a_u64(hash, params.wind_factor.to_bits());
    hash = fnv1a_u64(hash, params.steps);
    hash = fnv1a_u64(hash, config.rule.coefficient.to_bits());
    hash = fnv1a_u64(hash, config.rule.increment.to_bits());
    hash = fnv1a_u64(hash, config.rule.ceiling.to_bits());
    let edge: u8 = match config.edge {
        EdgeBehavior::Absorb => 0,
        EdgeBehavior::Clamp => 1,
        EdgeBehavior::Wrap => 2,
    };
    fnv1a_byte(hash, edge)
}
