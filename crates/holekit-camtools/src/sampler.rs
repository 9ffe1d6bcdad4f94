//! Candidate point generation.
//!
//! Border sampling walks the clearance boundary by arc length, centre-line
//! sampling follows the panel's bounding-box mid-lines, and path sampling
//! places points along an arbitrary reference polyline.

use holekit_core::{BoundingBox, Path, PlacementMode, Point, Polygon};
use tracing::warn;

/// Slack allowed when deciding whether the last centre-line sample still fits.
pub const LINE_END_TOLERANCE: f64 = 1e-6;

/// Default distance (mm) along the boundary from its first vertex to the
/// first border sample. Keeps holes away from the corner the outline starts at.
pub const DEFAULT_CORNER_OFFSET: f64 = 40.0;

/// Border sampling never produces fewer points than this.
pub const DEFAULT_MIN_BORDER_SAMPLES: usize = 4;

/// Upper bound on candidates from a single route (border, mid-line or path).
/// A spacing far below the hole size would otherwise exhaust memory.
pub const MAX_ROUTE_SAMPLES: usize = 100_000;

fn capped(route: &str, wanted: f64) -> usize {
    warn!(
        "{} sampling wants {:.0} points; capping at {}",
        route, wanted, MAX_ROUTE_SAMPLES
    );
    MAX_ROUTE_SAMPLES
}

/// How many of `0, spacing, 2 * spacing, ...` to try against `length`
/// (plus `slack`). One extra absorbs rounding; callers filter the tail.
fn steps_within(length: f64, spacing: f64, slack: f64, route: &str) -> usize {
    let whole = ((length + slack) / spacing).floor();
    if whole + 1.0 > MAX_ROUTE_SAMPLES as f64 {
        capped(route, whole + 1.0)
    } else {
        (whole as usize + 2).min(MAX_ROUTE_SAMPLES)
    }
}

/// Shrink distance for a hole category: edge clearance plus hole radius.
pub fn clearance_distance(edge_clearance: f64, diameter: f64) -> f64 {
    edge_clearance + diameter / 2.0
}

/// Border sampling options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderSampling {
    pub spacing: f64,
    pub corner_offset: f64,
    pub min_samples: usize,
}

impl BorderSampling {
    pub fn new(spacing: f64) -> Self {
        Self {
            spacing,
            corner_offset: DEFAULT_CORNER_OFFSET,
            min_samples: DEFAULT_MIN_BORDER_SAMPLES,
        }
    }
}

/// Equally spaced samples along the closed boundary.
///
/// `n = max(min_samples, round(perimeter / spacing))`; sample `k` sits at
/// arc length `(k * perimeter / n + corner_offset) mod perimeter` measured
/// from the first vertex.
pub fn sample_border(boundary: &Polygon, options: &BorderSampling) -> Vec<Point> {
    if boundary.is_degenerate() || options.spacing <= 0.0 {
        return Vec::new();
    }

    let total = boundary.perimeter();
    if total <= 0.0 {
        return Vec::new();
    }

    let wanted = (total / options.spacing).round();
    let count = if wanted >= MAX_ROUTE_SAMPLES as f64 {
        capped("border", wanted)
    } else {
        (wanted as usize).max(options.min_samples)
    };
    let step = total / count as f64;
    let edges: Vec<(Point, Point, f64)> = boundary
        .edges()
        .map(|(a, b)| (a, b, a.distance_to(&b)))
        .collect();

    (0..count)
        .filter_map(|k| {
            let target = (k as f64 * step + options.corner_offset).rem_euclid(total);
            point_at_distance(&edges, target)
        })
        .collect()
}

/// Finds the point `target` units along a chain of `(start, end, length)` edges.
///
/// Rounding can leave `target` a hair past the accumulated length, in which
/// case the chain's final point is returned.
fn point_at_distance(edges: &[(Point, Point, f64)], target: f64) -> Option<Point> {
    let mut remaining = target;
    for (a, b, length) in edges {
        if remaining <= *length {
            let t = if *length > 0.0 { remaining / length } else { 0.0 };
            return Some(a.lerp(b, t));
        }
        remaining -= length;
    }
    edges.last().map(|(_, b, _)| *b)
}

/// Usable extent of one axis after clearance is removed from both ends.
fn usable_span(min: f64, max: f64, inset: f64) -> Option<(f64, f64)> {
    let start = min + inset;
    let end = max - inset;
    if end - start > 0.0 {
        Some((start, end))
    } else {
        None
    }
}

fn line_positions(start: f64, end: f64, spacing: f64) -> Vec<f64> {
    if spacing <= 0.0 {
        return Vec::new();
    }
    let count = steps_within(end - start, spacing, LINE_END_TOLERANCE, "centre-line");
    (0..count)
        .map(|i| start + i as f64 * spacing)
        .filter(|v| *v <= end + LINE_END_TOLERANCE)
        .collect()
}

/// Samples along the bounding box's horizontal mid-line.
pub fn sample_center_horizontal(bbox: &BoundingBox, inset: f64, spacing: f64) -> Vec<Point> {
    let y = bbox.center().y;
    match usable_span(bbox.min_x, bbox.max_x, inset) {
        Some((start, end)) => line_positions(start, end, spacing)
            .into_iter()
            .map(|x| Point::new(x, y))
            .collect(),
        None => Vec::new(),
    }
}

/// Samples along the bounding box's vertical mid-line.
pub fn sample_center_vertical(bbox: &BoundingBox, inset: f64, spacing: f64) -> Vec<Point> {
    let x = bbox.center().x;
    match usable_span(bbox.min_y, bbox.max_y, inset) {
        Some((start, end)) => line_positions(start, end, spacing)
            .into_iter()
            .map(|y| Point::new(x, y))
            .collect(),
        None => Vec::new(),
    }
}

/// Generates drill candidates for `mode`.
///
/// Border mode walks `boundary`; the centre-line modes use the bounding box
/// of `panel` shrunk by `inset` at both ends.
pub fn sample_for_mode(
    mode: PlacementMode,
    panel: &Polygon,
    boundary: &Polygon,
    inset: f64,
    border: &BorderSampling,
) -> Vec<Point> {
    if mode == PlacementMode::Border {
        return sample_border(boundary, border);
    }

    let Some(bbox) = panel.bounding_box() else {
        return Vec::new();
    };

    let mut points = Vec::new();
    if mode.uses_horizontal_line() {
        points.extend(sample_center_horizontal(&bbox, inset, border.spacing));
    }
    if mode.uses_vertical_line() {
        points.extend(sample_center_vertical(&bbox, inset, border.spacing));
    }
    points
}

/// Places a point every `spacing` along `path`, starting at its first point.
///
/// No wraparound: a closed path must repeat its first point to have the
/// closing edge walked.
pub fn sample_path(path: &Path, spacing: f64) -> Vec<Point> {
    let points = path.points();
    if points.len() < 2 || spacing <= 0.0 {
        return Vec::new();
    }

    let edges: Vec<(Point, Point, f64)> = points
        .windows(2)
        .map(|w| (w[0], w[1], w[0].distance_to(&w[1])))
        .collect();
    let total: f64 = edges.iter().map(|(_, _, l)| l).sum();

    let count = steps_within(total, spacing, 0.0, "path");
    (0..count)
        .map(|i| i as f64 * spacing)
        .filter(|d| *d <= total)
        .filter_map(|d| point_at_distance(&edges, d))
        .collect()
}
