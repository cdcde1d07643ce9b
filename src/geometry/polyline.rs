use crate::math::polygon_2d::{rotate_to_canonical_start, signed_area};
use crate::math::Point2;

/// An ordered sequence of points.
///
/// A polyline is *closed* when its first point equals its last point
/// exactly; there is no separate flag. A closed square therefore holds five
/// points, the first repeated at the end.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polyline {
    pub points: Vec<Point2>,
}

impl Polyline {
    /// Creates a polyline from its points.
    #[must_use]
    pub fn new(points: Vec<Point2>) -> Self {
        Self { points }
    }

    /// Returns `true` if the polyline has at least two points and the first
    /// equals the last.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        is_closed(&self.points)
    }

    /// Number of points, including a repeated closing point.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    #[must_use]
    pub fn into_points(self) -> Vec<Point2> {
        self.points
    }

    /// The distinct vertices of the loop: all points except a repeated
    /// closing point. For open polylines this is every point.
    #[must_use]
    pub fn vertex_cycle(&self) -> &[Point2] {
        if self.is_closed() {
            &self.points[..self.points.len() - 1]
        } else {
            &self.points
        }
    }

    /// Closes the polyline by repeating its first point, if not already closed.
    #[must_use]
    pub fn closed(mut self) -> Self {
        if !self.is_closed() {
            if let Some(&first) = self.points.first() {
                self.points.push(first);
            }
        }
        self
    }

    /// Returns the polyline with its point order reversed.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            points: self.points.iter().rev().copied().collect(),
        }
    }

    /// Signed enclosed area; positive for counter-clockwise loops.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        signed_area(self.vertex_cycle())
    }

    /// Rotates a closed polyline so it starts (and ends) at its
    /// lexicographically smallest vertex. Open polylines are returned as is.
    #[must_use]
    pub fn canonical(&self) -> Self {
        if !self.is_closed() {
            return self.clone();
        }
        Self::new(rotate_to_canonical_start(self.vertex_cycle())).closed()
    }
}

impl From<Vec<Point2>> for Polyline {
    fn from(points: Vec<Point2>) -> Self {
        Self::new(points)
    }
}

impl From<Polyline> for Vec<Point2> {
    fn from(line: Polyline) -> Self {
        line.points
    }
}

impl AsRef<[Point2]> for Polyline {
    fn as_ref(&self) -> &[Point2] {
        &self.points
    }
}

impl FromIterator<Point2> for Polyline {
    fn from_iter<I: IntoIterator<Item = Point2>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Returns `true` if `points` has at least two entries and the first is
/// exactly equal to the last.
#[must_use]
pub fn is_closed(points: &[Point2]) -> bool {
    points.len() > 1 && points.first() == points.last()
}
