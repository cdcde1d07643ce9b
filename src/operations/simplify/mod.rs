mod curves;
mod vertices;

pub use curves::{simplify_curves, SimplifyCurves};
pub use vertices::{simplify_vertices, SimplifyVertices};

use crate::error::{check_tolerance, GeometryError, Result};
use crate::geometry::Polyline;
use crate::math::polygon_2d::dedup_consecutive;
use crate::math::Point2;

/// Input shared by both simplifiers after validation.
struct Prepared {
    /// Distinct vertices; for a closed input the closing point is dropped.
    points: Vec<Point2>,
    closed: bool,
}

/// Validates the tolerance and collapses consecutive duplicates.
fn prepare(polyline: &Polyline, tolerance: f64) -> Result<Prepared> {
    check_tolerance(tolerance)?;
    let closed = polyline.is_closed();
    let mut points = dedup_consecutive(polyline.points());
    if closed {
        points.pop();
    }
    if points.len() < 2 {
        return Err(GeometryError::TooFewPoints {
            required: 2,
            found: points.len(),
        }
        .into());
    }
    Ok(Prepared { points, closed })
}

impl Prepared {
    /// Rebuilds a polyline from the surviving vertex indices (ascending).
    fn finish(&self, kept: &[usize]) -> Polyline {
        let line: Polyline = kept.iter().map(|&i| self.points[i]).collect();
        if self.closed {
            line.closed()
        } else {
            line
        }
    }

    fn identity(&self) -> Polyline {
        let all: Vec<usize> = (0..self.points.len()).collect();
        self.finish(&all)
    }
}
