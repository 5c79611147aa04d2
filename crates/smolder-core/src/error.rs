//! Error types for the Smolder propagation engine.
//!
//! Every failure is reported synchronously through [`SimError`]. Validation
//! runs before the first step executes, so an error never accompanies a
//! partially propagated grid.

use std::error::Error;
use std::fmt;

/// Errors from grid construction, parameter validation, and simulation runs.
#[derive(Clone, Debug, PartialEq)]
pub enum SimError {
    /// The grid is empty, has zero-length rows, or has rows of differing
    /// lengths.
    InvalidGridShape {
        /// Human-readable description of the shape problem.
        reason: String,
    },
    /// A simulation parameter is negative, non-finite, or (for step
    /// counts) non-integral.
    InvalidParameter {
        /// Name of the offending parameter (e.g. `"wind_factor"`).
        name: &'static str,
        /// What was wrong with it.
        reason: String,
    },
    /// A cell value is non-finite or outside `[0, 1]`.
    InvalidCellValue {
        /// Row of the offending cell.
        row: usize,
        /// Column of the offending cell.
        col: usize,
        /// The rejected value.
        value: f64,
    },
    /// The run was cancelled cooperatively before it finished.
    ///
    /// The in-progress snapshot is discarded; no grid is returned.
    Cancelled {
        /// Number of steps fully completed before cancellation was observed.
        completed_steps: u64,
    },
}

impl SimError {
    /// Shorthand for [`SimError::InvalidGridShape`].
    pub fn shape(reason: impl Into<String>) -> Self {
        Self::InvalidGridShape {
            reason: reason.into(),
        }
    }

    /// Shorthand for [`SimError::InvalidParameter`].
    pub fn parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Whether this error came from input validation (as opposed to
    /// cancellation of an otherwise valid run).
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::Cancelled { .. })
    }
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidGridShape { reason } => write!(f, "invalid grid shape: {reason}"),
            Self::InvalidParameter { name, reason } => {
                write!(f, "invalid parameter '{name}': {reason}")
            }
            Self::InvalidCellValue { row, col, value } => {
                write!(
                    f,
                    "cell ({row}, {col}) has value {value}, expected a finite value in [0, 1]"
                )
            }
            Self::Cancelled { completed_steps } => {
                write!(f, "simulation cancelled after {completed_steps} steps")
            }
        }
    }
}

impl Error for SimError {}
