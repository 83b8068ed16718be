//! Error types for board construction.

use std::fmt;

/// A square index outside the playable `1..=50` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SquareError {
    pub square: usize,
}

impl fmt::Display for SquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "square {} is outside the playable range 1..=50",
            self.square
        )
    }
}

impl std::error::Error for SquareError {}
