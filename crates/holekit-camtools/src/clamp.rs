//! Containment checks and centroid-directed clamping.

use crate::error::ClampFailure;
use holekit_core::{Point, Polygon};

/// Default number of interpolation steps toward the centroid.
pub const DEFAULT_CLAMP_STEPS: usize = 20;

/// Returns `point` if it lies inside `boundary`, otherwise the first of
/// `point + (centroid - point) * i / steps` for `i = 1..=steps` that does.
///
/// The centroid is the vertex average, so on strongly concave boundaries it
/// may itself be outside and the clamp fails.
pub fn clamp_inside(point: Point, boundary: &Polygon, steps: usize) -> Result<Point, ClampFailure> {
    if boundary.contains(&point) {
        return Ok(point);
    }

    let Some(target) = boundary.centroid() else {
        return Err(ClampFailure { point });
    };

    (1..=steps)
        .map(|i| point.lerp(&target, i as f64 / steps as f64))
        .find(|candidate| boundary.contains(candidate))
        .ok_or(ClampFailure { point })
}

/// Clamps every point, splitting the input into kept points and the count
/// of points that could not be moved inside.
pub fn clamp_all(points: &[Point], boundary: &Polygon, steps: usize) -> (Vec<Point>, usize) {
    let mut kept = Vec::with_capacity(points.len());
    let mut dropped = 0;
    for point in points {
        match clamp_inside(*point, boundary, steps) {
            Ok(p) => kept.push(p),
            Err(failure) => {
                tracing::debug!("{}", failure);
                dropped += 1;
            }
        }
    }
    (kept, dropped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inside_point_unchanged() {
        let square = Polygon::rectangle(0.0, 0.0, 10.0, 10.0);
        let p = Point::new(3.0, 4.0);
        assert_eq!(clamp_inside(p, &square, DEFAULT_CLAMP_STEPS), Ok(p));
    }

    #[test]
    fn test_outside_point_moves_toward_centroid() {
        let square = Polygon::rectangle(0.0, 0.0, 10.0, 10.0);
        let clamped = clamp_inside(Point::new(25.0, 5.0), &square, DEFAULT_CLAMP_STEPS).unwrap();
        assert!(square.contains(&clamped));
        // x = 25 - i; i = 15 lands on the edge, i = 16 is the first interior step
        assert!((clamped.x - 9.0).abs() < 1e-9);
        assert_eq!(clamped.y, 5.0);
    }

    #[test]
    fn test_clamp_failure_when_centroid_outside() {
        // Thin U shape whose vertex average falls in the notch
        let u = Polygon::new_ccw(vec![
            Point::new(0.0, 0.0),
            Point::new(30.0, 0.0),
            Point::new(30.0, 30.0),
            Point::new(28.0, 30.0),
            Point::new(28.0, 2.0),
            Point::new(2.0, 2.0),
            Point::new(2.0, 30.0),
            Point::new(0.0, 30.0),
        ]);
        let centroid = u.centroid().unwrap();
        assert!(!u.contains(&centroid));

        let outside = Point::new(15.0, 40.0);
        let result = clamp_inside(outside, &u, DEFAULT_CLAMP_STEPS);
        assert_eq!(result, Err(ClampFailure { point: outside }));
    }

    #[test]
    fn test_clamp_all_counts_drops() {
        let square = Polygon::rectangle(0.0, 0.0, 10.0, 10.0);
        let points = vec![Point::new(5.0, 5.0), Point::new(12.0, 5.0)];
        let (kept, dropped) = clamp_all(&points, &square, DEFAULT_CLAMP_STEPS);
        assert_eq!(kept.len(), 2);
        assert_eq!(dropped, 0);

        let (kept, dropped) = clamp_all(&points, &Polygon::empty(), DEFAULT_CLAMP_STEPS);
        assert!(kept.is_empty());
        assert_eq!(dropped, 2);
    }
}
