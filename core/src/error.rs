//! Error types for the seat map engine.

use thiserror::Error;

/// Errors surfaced by the direct (non-reducer) API.
///
/// Reducer actions never fail: invalid input degrades to a no-op. Only the
/// document import path and direct grid access report errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SeatMapError {
    /// An imported document is malformed or internally inconsistent
    ///
    /// The engine state is left untouched when this is returned.
    #[error("Invalid seat map document: {0}")]
    InvalidDocument(String),

    /// A coordinate outside the current grid was accessed
    #[error("Seat ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfBounds {
        /// Requested row
        row: u32,
        /// Requested column
        col: u32,
        /// Current row count
        rows: u32,
        /// Current column count
        cols: u32,
    },

    /// Grid dimensions must be at least 1x1 and within the seat limit
    #[error("Invalid grid dimensions {rows}x{cols}: need at least 1x1 and at most {} seats", crate::grid::MAX_CELLS)]
    InvalidDimensions {
        /// Requested row count
        rows: u32,
        /// Requested column count
        cols: u32,
    },
}

impl From<serde_json::Error> for SeatMapError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidDocument(err.to_string())
    }
}
