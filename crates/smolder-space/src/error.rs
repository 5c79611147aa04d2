//! Error types for lattice construction.

use smolder_core::SimError;
use std::fmt;

/// Errors arising from lattice construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpaceError {
    /// Attempted to construct a lattice with zero cells.
    EmptySpace,
    /// A dimension exceeds the representable maximum.
    DimensionTooLarge {
        /// Which dimension (`"rows"` or `"cols"`).
        name: &'static str,
        /// The requested size.
        value: usize,
        /// The largest accepted size.
        max: usize,
    },
}

impl fmt::Display for SpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySpace => write!(f, "space must have at least one cell"),
            Self::DimensionTooLarge { name, value, max } => {
                write!(f, "{name} = {value} exceeds maximum of {max}")
            }
        }
    }
}

impl std::error::Error for SpaceError {}

impl From<SpaceError> for SimError {
    fn from(e: SpaceError) -> Self {
        SimError::shape(e.to_string())
    }
}
