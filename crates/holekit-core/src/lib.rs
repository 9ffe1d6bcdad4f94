//! # holekit Core
//!
//! Core types and utilities for holekit.
//! Provides the geometric data model (points, polygons, paths), the polygon
//! math kernel, placement data models, and drawing unit handling.

pub mod data;
pub mod error;
pub mod geometry;
pub mod units;

pub use data::{HoleCategory, HoleSet, PlacementMode};

pub use error::GeometryError;

pub use geometry::{BoundingBox, Path, Point, Polygon};

pub use units::DrawingUnit;
