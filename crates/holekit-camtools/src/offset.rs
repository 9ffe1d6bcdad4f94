//! Polygon offset engine.
//!
//! Wraps the Clipper offsetter (through `geo-clipper`) with mitred joins and
//! closed-polygon ends. Coordinates are multiplied by [`OffsetSettings::scale`]
//! and rounded to integers before offsetting, so the result is exact at
//! micrometre resolution with the default scale of 1000.

use geo::{Coord as GeoCoord, LineString, MultiPolygon, Polygon as GeoPolygon};
use geo_clipper::{Clipper, EndType, JoinType};
use holekit_core::geometry::remove_duplicate_points;
use holekit_core::{Point, Polygon};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Integer scale applied before offsetting (1 unit = 1 µm for mm input).
pub const DEFAULT_OFFSET_SCALE: f64 = 1000.0;

/// Mitre limit used for offset corners, as a multiple of the offset distance.
pub const DEFAULT_MITER_LIMIT: f64 = 2.0;

/// Points of an offset loop closer than this (mm) are merged.
const LOOP_POINT_TOLERANCE: f64 = 1e-9;

/// Numeric knobs of the offset engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OffsetSettings {
    /// Integer scaling factor applied before the offset.
    pub scale: f64,
    /// Mitre limit for corner joins.
    pub miter_limit: f64,
}

impl Default for OffsetSettings {
    fn default() -> Self {
        Self {
            scale: DEFAULT_OFFSET_SCALE,
            miter_limit: DEFAULT_MITER_LIMIT,
        }
    }
}

/// Offsets `polygon` by `delta` mm (negative shrinks, positive grows).
///
/// When the offset splits the region, the loop with the largest absolute area
/// is returned. An empty polygon means the offset is infeasible.
pub fn offset_polygon(polygon: &Polygon, delta: f64, settings: &OffsetSettings) -> Polygon {
    offset_loops(polygon, delta, settings)
        .into_iter()
        .max_by(|a, b| a.area().total_cmp(&b.area()))
        .unwrap_or_default()
}

/// Offsets `polygon` by `delta` mm and returns every resulting outer loop,
/// CCW-normalised. Loops with fewer than three distinct points are discarded.
pub fn offset_loops(polygon: &Polygon, delta: f64, settings: &OffsetSettings) -> Vec<Polygon> {
    if polygon.is_degenerate() || !delta.is_finite() {
        return Vec::new();
    }

    let source = polygon.clone().ensure_ccw();
    let geo_poly = polygon_to_geo(&source);
    let result: MultiPolygon<f64> = geo_poly.offset(
        delta,
        JoinType::Miter(settings.miter_limit),
        EndType::ClosedPolygon,
        settings.scale,
    );

    let loops: Vec<Polygon> = result
        .0
        .iter()
        .filter_map(geo_to_polygon)
        .collect();

    debug!(
        "Offset by {:.3} mm produced {} loop(s) from {} input points",
        delta,
        loops.len(),
        source.len()
    );
    loops
}

fn polygon_to_geo(poly: &Polygon) -> GeoPolygon<f64> {
    let mut ring: Vec<GeoCoord<f64>> = poly
        .points()
        .iter()
        .map(|p| GeoCoord { x: p.x, y: p.y })
        .collect();

    if let Some(first) = ring.first().copied() {
        ring.push(first);
    }

    GeoPolygon::new(LineString::new(ring), vec![])
}

fn geo_to_polygon(geo_poly: &GeoPolygon<f64>) -> Option<Polygon> {
    let points: Vec<Point> = geo_poly
        .exterior()
        .coords()
        .map(|c| Point::new(c.x, c.y))
        .collect();

    // Drops the closing point along with any zero-length edges.
    let cleaned = remove_duplicate_points(&points, LOOP_POINT_TOLERANCE);
    let polygon = Polygon::new_ccw(cleaned);
    if polygon.is_degenerate() {
        None
    } else {
        Some(polygon)
    }
}
