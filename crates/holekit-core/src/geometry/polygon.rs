use super::kernel;
use super::Point;
use crate::error::GeometryError;
use serde::{Deserialize, Serialize};

/// Axis-aligned extent of a point set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Grows the box by `margin` on every side.
    pub fn padded(&self, margin: f64) -> BoundingBox {
        BoundingBox {
            min_x: self.min_x - margin,
            max_x: self.max_x + margin,
            min_y: self.min_y - margin,
            max_y: self.max_y + margin,
        }
    }
}

/// A simple closed polygon.
///
/// The closing edge is implicit; the first point is never repeated at the
/// end. Fewer than three points is a valid value and means "no region",
/// which is how an infeasible offset is reported.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    points: Vec<Point>,
}

impl Polygon {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Builds a polygon normalised to counter-clockwise winding.
    pub fn new_ccw(points: Vec<Point>) -> Self {
        Self::new(points).ensure_ccw()
    }

    /// Axis-aligned rectangle with its lower-left corner at `(x, y)`, CCW.
    pub fn rectangle(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new_ccw(vec![
            Point::new(x, y),
            Point::new(x + width, y),
            Point::new(x + width, y + height),
            Point::new(x, y + height),
        ])
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// True when the polygon has fewer than three points and encloses nothing.
    pub fn is_degenerate(&self) -> bool {
        self.points.len() < 3
    }

    /// Checks the point count and that every coordinate is finite.
    pub fn validate(&self) -> Result<(), GeometryError> {
        if self.is_degenerate() {
            return Err(GeometryError::TooFewPoints {
                count: self.points.len(),
            });
        }
        check_finite(&self.points)
    }

    pub fn signed_area(&self) -> f64 {
        kernel::signed_area(&self.points)
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    pub fn is_clockwise(&self) -> bool {
        kernel::is_clockwise(&self.points)
    }

    /// Reverses the point order iff the polygon is clockwise.
    pub fn ensure_ccw(mut self) -> Self {
        if self.is_clockwise() {
            tracing::trace!("Reversing clockwise polygon with {} points", self.points.len());
        }
        kernel::ensure_ccw_in_place(&mut self.points);
        self
    }

    pub fn perimeter(&self) -> f64 {
        kernel::perimeter_length(&self.points)
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        kernel::bounding_box(&self.points)
    }

    pub fn centroid(&self) -> Option<Point> {
        kernel::centroid(&self.points)
    }

    pub fn contains(&self, point: &Point) -> bool {
        kernel::point_in_polygon(point, &self.points)
    }

    /// Multiplies every coordinate by `factor`.
    pub fn scaled(&self, factor: f64) -> Polygon {
        Polygon::new(self.points.iter().map(|p| p.scaled(factor)).collect())
    }

    /// Iterates the edges as `(start, end)` pairs, closing edge last.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }
}

/// An open or closed reference polyline used for arc-length sampling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    points: Vec<Point>,
}

impl Path {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn validate(&self) -> Result<(), GeometryError> {
        if self.points.len() < 2 {
            return Err(GeometryError::PathTooShort {
                count: self.points.len(),
            });
        }
        check_finite(&self.points)
    }

    /// Length along the polyline; no closing edge is added.
    pub fn length(&self) -> f64 {
        kernel::path_length(&self.points)
    }

    pub fn scaled(&self, factor: f64) -> Path {
        Path::new(self.points.iter().map(|p| p.scaled(factor)).collect())
    }
}

impl From<&Polygon> for Path {
    /// Turns a polygon into a closed path by repeating its first point.
    fn from(polygon: &Polygon) -> Self {
        let mut points = polygon.points().to_vec();
        if let Some(first) = points.first().copied() {
            points.push(first);
        }
        Path::new(points)
    }
}

fn check_finite(points: &[Point]) -> Result<(), GeometryError> {
    match points.iter().position(|p| !p.is_finite()) {
        Some(index) => Err(GeometryError::NonFiniteCoordinate { index }),
        None => Ok(()),
    }
}
