//! Polygon math kernel.
//!
//! Pure functions over point sequences. Polygons are implicitly closed: the
//! last point connects back to the first and is never repeated.

use super::{BoundingBox, Point};

/// Replaces a zero denominator in the ray-casting crossing test.
///
/// A horizontal edge never straddles the ray, so the value only has to keep
/// the division finite.
pub const RAY_CAST_EPSILON: f64 = 1e-9;

/// Shoelace area. Positive for counter-clockwise winding.
pub fn signed_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }

    let mut sum = 0.0;
    for (i, a) in points.iter().enumerate() {
        let b = &points[(i + 1) % points.len()];
        sum += a.x * b.y - b.x * a.y;
    }
    0.5 * sum
}

pub fn is_clockwise(points: &[Point]) -> bool {
    signed_area(points) < 0.0
}

/// Reverses the point order in place iff the winding is clockwise.
pub fn ensure_ccw_in_place(points: &mut [Point]) {
    if is_clockwise(points) {
        points.reverse();
    }
}

/// Sum of edge lengths including the closing edge.
pub fn perimeter_length(points: &[Point]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }

    let open = path_length(points);
    match (points.first(), points.last()) {
        (Some(first), Some(last)) => open + last.distance_to(first),
        _ => open,
    }
}

/// Sum of edge lengths of an open polyline.
pub fn path_length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| w[0].distance_to(&w[1])).sum()
}

/// Componentwise extent. A single point yields a zero-area box.
pub fn bounding_box(points: &[Point]) -> Option<BoundingBox> {
    let first = points.first()?;
    let mut bbox = BoundingBox {
        min_x: first.x,
        max_x: first.x,
        min_y: first.y,
        max_y: first.y,
    };
    for p in &points[1..] {
        bbox.min_x = bbox.min_x.min(p.x);
        bbox.max_x = bbox.max_x.max(p.x);
        bbox.min_y = bbox.min_y.min(p.y);
        bbox.max_y = bbox.max_y.max(p.y);
    }
    Some(bbox)
}

/// Arithmetic mean of the vertices.
///
/// This is not the area centroid. It only has to be an interior-ish target
/// for clamping, which it is for the panel shapes seen in practice.
pub fn centroid(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Some(Point::new(sx / n, sy / n))
}

/// Drops points closer than `tolerance` to their predecessor, including a
/// trailing point that repeats the first one.
pub fn remove_duplicate_points(points: &[Point], tolerance: f64) -> Vec<Point> {
    let mut cleaned: Vec<Point> = Vec::with_capacity(points.len());
    for p in points {
        match cleaned.last() {
            Some(last) if last.distance_to(p) <= tolerance => {}
            _ => cleaned.push(*p),
        }
    }
    if cleaned.len() > 1 {
        if let (Some(first), Some(last)) = (cleaned.first(), cleaned.last()) {
            if first.distance_to(last) <= tolerance {
                cleaned.pop();
            }
        }
    }
    cleaned
}

/// Ray-casting parity test. Points exactly on an edge may land either way.
pub fn point_in_polygon(point: &Point, polygon: &[Point]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let pi = &polygon[i];
        let pj = &polygon[j];
        if (pi.y > point.y) != (pj.y > point.y) {
            let mut dy = pj.y - pi.y;
            if dy == 0.0 {
                dy = RAY_CAST_EPSILON;
            }
            let x_cross = (pj.x - pi.x) * (point.y - pi.y) / dy + pi.x;
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
