//! Minimum-gap filtering of candidate points.

use holekit_core::Point;

/// Greedy, order-preserving filter: a point is kept iff it is at least
/// `min_gap` from every point kept before it.
///
/// Quadratic in the number of points, which stays small for panel work.
pub fn dedupe_by_min_gap(points: &[Point], min_gap: f64) -> Vec<Point> {
    let mut accepted: Vec<Point> = Vec::with_capacity(points.len());
    for p in points {
        if accepted.iter().all(|q| q.distance_to(p) >= min_gap) {
            accepted.push(*p);
        }
    }
    accepted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_well_spaced_points() {
        let pts = vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(20.0, 0.0)];
        assert_eq!(dedupe_by_min_gap(&pts, 5.0), pts);
    }

    #[test]
    fn test_drops_close_points_in_order() {
        let pts = vec![
            Point::new(0.0, 0.0),
            Point::new(3.0, 0.0),
            Point::new(6.0, 0.0),
            Point::new(6.0, 4.0),
        ];
        let kept = dedupe_by_min_gap(&pts, 5.0);
        assert_eq!(kept, vec![Point::new(0.0, 0.0), Point::new(6.0, 0.0)]);
    }

    #[test]
    fn test_exact_gap_is_accepted() {
        let pts = vec![Point::new(0.0, 0.0), Point::new(5.0, 0.0)];
        assert_eq!(dedupe_by_min_gap(&pts, 5.0).len(), 2);
    }

    #[test]
    fn test_empty() {
        assert!(dedupe_by_min_gap(&[], 5.0).is_empty());
    }
}
