//! Error types for the placement engine.
//!
//! Per-request failures ([`PlacementError`]) stop a request or a single
//! branch; per-point failures ([`ClampFailure`]) are absorbed by the caller.

use holekit_core::{HoleCategory, Point};
use thiserror::Error;

/// Errors that can occur while placing holes.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlacementError {
    /// The clearance boundary collapsed: the requested clearance does not fit
    /// anywhere inside the panel.
    #[error(
        "Clearance exceeds available panel interior for {category} holes \
         (inset of {clearance:.3} mm leaves no region); reduce edge clearance or hole diameter"
    )]
    InfeasibleOffset {
        category: HoleCategory,
        /// Combined edge clearance plus hole radius (mm).
        clearance: f64,
    },

    /// No usable panel (or cable path) was supplied.
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// A request parameter failed validation.
    #[error("Parameter error: {0}")]
    Parameter(#[from] ParameterError),
}

/// Errors related to placement parameter validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// A parameter must be strictly positive.
    #[error("Parameter '{name}' must be > 0, got {value}")]
    NotPositive { name: String, value: f64 },

    /// A parameter must not be negative.
    #[error("Parameter '{name}' must be >= 0, got {value}")]
    Negative { name: String, value: f64 },

    /// A parameter is NaN or infinite.
    #[error("Parameter '{name}' must be finite")]
    NotFinite { name: String },

    /// A parameter value is invalid.
    #[error("Invalid value for '{name}': {reason}")]
    InvalidValue { name: String, reason: String },
}

/// A candidate point that could not be nudged inside the clearance boundary.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[error("Point ({:.3}, {:.3}) could not be moved inside the clearance boundary", .point.x, .point.y)]
pub struct ClampFailure {
    pub point: Point,
}

/// Result type alias for parameter validation.
pub type ParameterResult<T> = Result<T, ParameterError>;
