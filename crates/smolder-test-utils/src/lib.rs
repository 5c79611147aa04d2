//! Test utilities and mock types for Smolder development.
//!
//! Provides deterministic [`RandomSource`] implementations that let tests
//! force or script the kernel's draws, grid fixtures, and a one-call
//! tracing subscriber for test output.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use smolder_core::StepId;
use smolder_engine::{RandomSource, UnitStream};
use tracing_subscriber::EnvFilter;

/// Install a test-friendly `fmt` subscriber once per process.
///
/// Honours `RUST_LOG`; defaults to `warn`. Safe to call from every test.
pub fn init_test_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

// ── FixedSource ─────────────────────────────────────────────────

/// Every draw returns the same value.
///
/// `FixedSource(0.0)` activates every cell with positive spread
/// probability; `FixedSource::never()` activates none.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedSource(pub f64);

impl FixedSource {
    /// Draws that always activate when probability is positive.
    pub fn always() -> Self {
        Self(0.0)
    }

    /// Draws that never activate.
    pub fn never() -> Self {
        Self(1.0)
    }
}

pub struct FixedStream(f64);

impl UnitStream for FixedStream {
    fn next_unit(&mut self) -> f64 {
        self.0
    }
}

impl RandomSource for FixedSource {
    type Stream = FixedStream;

    fn stream_at(&self, _step: StepId, _first_cell: usize) -> FixedStream {
        FixedStream(self.0)
    }
}

// ── ScriptedSource ──────────────────────────────────────────────

/// Draws read from a per-step table.
///
/// `script[t][i]` is the draw for cell `i` (row-major) at step `t + 1`.
/// Draws past the end of the script return `fallback`, which defaults to a
/// value that never activates.
#[derive(Clone, Debug, PartialEq)]
pub struct ScriptedSource {
    script: Vec<Vec<f64>>,
    fallback: f64,
}

impl ScriptedSource {
    pub fn new(script: Vec<Vec<f64>>) -> Self {
        Self {
            script,
            fallback: 1.0,
        }
    }

    pub fn with_fallback(mut self, fallback: f64) -> Self {
        self.fallback = fallback;
        self
    }
}

pub struct ScriptedStream {
    draws: std::vec::IntoIter<f64>,
    fallback: f64,
}

impl UnitStream for ScriptedStream {
    fn next_unit(&mut self) -> f64 {
        self.draws.next().unwrap_or(self.fallback)
    }
}

impl RandomSource for ScriptedSource {
    type Stream = ScriptedStream;

    fn stream_at(&self, step: StepId, first_cell: usize) -> ScriptedStream {
        let draws = step
            .0
            .checked_sub(1)
            .and_then(|t| self.script.get(t as usize))
            .map(|row| row.iter().skip(first_cell).copied().collect::<Vec<_>>())
            .unwrap_or_default();
        ScriptedStream {
            draws: draws.into_iter(),
            fallback: self.fallback,
        }
    }
}
