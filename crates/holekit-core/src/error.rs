//! Error handling for holekit
//!
//! Provides the error type for invalid geometric input. Crates higher in
//! the stack (placement, drawing I/O, settings) define their own enums and
//! report these as part of their own variants.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Geometry error type
///
/// Represents invalid geometric input detected before any computation runs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Polygon has too few vertices to enclose a region
    #[error("Polygon needs at least 3 points, got {count}")]
    TooFewPoints {
        /// The number of points supplied.
        count: usize,
    },

    /// Path has too few vertices to have a length
    #[error("Path needs at least 2 points, got {count}")]
    PathTooShort {
        /// The number of points supplied.
        count: usize,
    },

    /// A coordinate is NaN or infinite
    #[error("Non-finite coordinate at index {index}")]
    NonFiniteCoordinate {
        /// Index of the offending point.
        index: usize,
    },
}
