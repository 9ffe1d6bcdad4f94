//! Planar geometry primitives and the polygon math kernel.

pub mod kernel;
mod point;
mod polygon;

pub use kernel::{
    bounding_box, centroid, ensure_ccw_in_place, is_clockwise, path_length, perimeter_length,
    point_in_polygon, remove_duplicate_points, signed_area, RAY_CAST_EPSILON,
};
pub use point::Point;
pub use polygon::{BoundingBox, Path, Polygon};
