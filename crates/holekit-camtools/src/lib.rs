//! # holekit Placement Tools
//!
//! This crate computes where to drill mounting holes and cable holes in a
//! panel outline.
//!
//! ## Stages
//!
//! - **Offset**: Shrinks the panel outline into a clearance boundary (Clipper, mitred joins)
//! - **Sampler**: Border, centre-line and arc-length path sampling
//! - **Clamp**: Moves stray candidates toward the boundary centroid until they are inside
//! - **Dedupe**: Greedy minimum-gap filtering
//! - **Placement**: Runs the drill and cable branches and reports each outcome

pub mod clamp;
pub mod dedupe;
pub mod error;
pub mod offset;
pub mod placement;
pub mod sampler;

// Re-export commonly used items
pub use clamp::{clamp_inside, DEFAULT_CLAMP_STEPS};
pub use dedupe::dedupe_by_min_gap;
pub use error::{ClampFailure, ParameterError, PlacementError};
pub use offset::{offset_loops, offset_polygon, OffsetSettings};
pub use placement::{
    place_holes, BranchOutcome, PlacedBranch, PlacementOrchestrator, PlacementParameters,
    PlacementRequest, PlacementResult, PlacementTuning,
};
pub use sampler::{clearance_distance, sample_border, sample_path, BorderSampling};
