use std::f64::consts::PI;

use tracing::debug;

use crate::error::Result;
use crate::geometry::Polyline;
use crate::math::{cross, Point2};

use super::prepare;

/// Flat-vertex decimation.
///
/// `tolerance` is an angle in radians: a vertex whose turning angle
/// relative to its current neighbours is below it is dropped. Passes repeat
/// until nothing more qualifies or the polyline is down to its minimum size
/// (2 points open, 3 vertices closed). Endpoints of open polylines are never
/// removed, and neither is a vertex where the line doubles back on itself,
/// even for tolerances above π. Works well on straight-edged outlines, less so on smooth ones
/// (see [`SimplifyCurves`](super::SimplifyCurves)).
#[derive(Debug)]
pub struct SimplifyVertices {
    polyline: Polyline,
    tolerance: f64,
}

impl SimplifyVertices {
    /// Creates a new vertex simplification operation.
    #[must_use]
    pub fn new(polyline: Polyline, tolerance: f64) -> Self {
        Self {
            polyline,
            tolerance,
        }
    }

    /// Executes the simplification.
    ///
    /// # Errors
    ///
    /// - `ParameterError::InvalidTolerance` if the tolerance is negative or not finite
    /// - `GeometryError::TooFewPoints` if fewer than 2 distinct points are given
    pub fn execute(&self) -> Result<Polyline> {
        let prepared = prepare(&self.polyline, self.tolerance)?;
        let points = &prepared.points;
        let n = points.len();
        let min_count = if prepared.closed { 3 } else { 2 };
        if self.tolerance == 0.0 || n <= min_count {
            return Ok(prepared.identity());
        }

        // Doubly linked list over the vertices so removals are O(1).
        let mut prev: Vec<usize> = (0..n).map(|i| (i + n - 1) % n).collect();
        let mut next: Vec<usize> = (0..n).map(|i| (i + 1) % n).collect();
        let mut alive = vec![true; n];
        let mut count = n;
        let mut passes = 0;
        // A reversal (turn of π) is never flat, whatever the tolerance.
        let flat = self.tolerance.min(PI);

        loop {
            passes += 1;
            let mut removed = false;
            for i in 0..n {
                if !alive[i] || count <= min_count {
                    continue;
                }
                if !prepared.closed && (i == 0 || i == n - 1) {
                    continue;
                }
                let (p, q) = (prev[i], next[i]);
                if turn_angle(&points[p], &points[i], &points[q]) < flat {
                    alive[i] = false;
                    next[p] = q;
                    prev[q] = p;
                    count -= 1;
                    removed = true;
                }
            }
            if !removed || count <= min_count {
                break;
            }
        }

        let kept: Vec<usize> = (0..n).filter(|&i| alive[i]).collect();
        debug!(
            input = self.polyline.len(),
            kept = kept.len(),
            passes,
            closed = prepared.closed,
            tolerance = self.tolerance,
            "simplified vertices"
        );
        Ok(prepared.finish(&kept))
    }
}

/// Absolute turning angle at `b` when walking `a → b → c`, in `[0, π]`.
///
/// Zero when either leg has no length.
fn turn_angle(a: &Point2, b: &Point2, c: &Point2) -> f64 {
    let u = b - a;
    let v = c - b;
    if u.norm_squared() == 0.0 || v.norm_squared() == 0.0 {
        return 0.0;
    }
    // cross(a, b, c) equals u × v.
    cross(a, b, c).atan2(u.dot(&v)).abs()
}

/// Simplifies a point sequence with [`SimplifyVertices`].
///
/// # Errors
///
/// See [`SimplifyVertices::execute`].
pub fn simplify_vertices(polyline: &[Point2], tolerance: f64) -> Result<Vec<Point2>> {
    SimplifyVertices::new(Polyline::new(polyline.to_vec()), tolerance)
        .execute()
        .map(Polyline::into_points)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::simplify::test_support::{circle, is_subsequence};
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn edged_square() -> Polyline {
        Polyline::new(vec![
            p(0.0, 0.0),
            p(1.0, 0.0),
            p(2.0, 0.0),
            p(2.0, 1.0),
            p(2.0, 2.0),
            p(1.0, 2.0),
            p(0.0, 2.0),
            p(0.0, 1.0),
            p(0.0, 0.0),
        ])
    }

    #[test]
    fn turn_angle_values() {
        let o = p(0.0, 0.0);
        assert_abs_diff_eq!(turn_angle(&p(-1.0, 0.0), &o, &p(1.0, 0.0)), 0.0);
        assert_abs_diff_eq!(turn_angle(&p(-1.0, 0.0), &o, &p(0.0, 1.0)), FRAC_PI_2);
        assert_abs_diff_eq!(turn_angle(&p(-1.0, 0.0), &o, &p(0.0, -1.0)), FRAC_PI_2);
        assert_abs_diff_eq!(turn_angle(&p(-1.0, 0.0), &o, &p(-2.0, 0.0)), PI);
        assert_abs_diff_eq!(turn_angle(&o, &o, &p(1.0, 0.0)), 0.0);
    }

    #[test]
    fn straight_line_collapses_to_endpoints() {
        let line: Vec<Point2> = (0..5).map(|i| p(f64::from(i), 0.5)).collect();
        assert_eq!(simplify_vertices(&line, 0.01).unwrap(), vec![line[0], line[4]]);
    }

    #[test]
    fn zero_tolerance_is_identity() {
        let square = edged_square();
        let out = SimplifyVertices::new(square.clone(), 0.0).execute().unwrap();
        assert_eq!(out, square);
    }

    #[test]
    fn closed_square_keeps_corners() {
        let out = SimplifyVertices::new(edged_square(), 0.1).execute().unwrap();
        assert_eq!(
            out.points,
            vec![p(0.0, 0.0), p(2.0, 0.0), p(2.0, 2.0), p(0.0, 2.0), p(0.0, 0.0)]
        );
    }

    #[test]
    fn closed_loop_keeps_three_vertices() {
        let out = SimplifyVertices::new(edged_square(), 3.0).execute().unwrap();
        assert!(out.is_closed());
        assert_eq!(out.vertex_cycle().len(), 3);
    }

    #[test]
    fn open_endpoints_survive_aggressive_tolerance() {
        let zigzag = vec![p(0.0, 0.0), p(1.0, 1.0), p(2.0, 0.0), p(3.0, 1.0), p(4.0, 0.0)];
        assert_eq!(simplify_vertices(&zigzag, 3.0).unwrap(), vec![zigzag[0], zigzag[4]]);
    }

    #[test]
    fn reversal_is_never_flat() {
        let spike = vec![p(0.0, 0.0), p(2.0, 0.0), p(1.0, 0.0)];
        assert_eq!(simplify_vertices(&spike, 3.0).unwrap(), spike);
    }

    #[test]
    fn reversal_survives_tolerance_above_pi() {
        let spike = vec![p(0.0, 0.0), p(2.0, 0.0), p(1.0, 0.0)];
        assert_eq!(simplify_vertices(&spike, 4.0).unwrap(), spike);
        assert_eq!(simplify_vertices(&spike, 100.0).unwrap(), spike);

        // Everything short of a reversal still goes.
        let zigzag = vec![p(0.0, 0.0), p(1.0, 1.0), p(2.0, 0.0), p(3.0, 1.0)];
        assert_eq!(simplify_vertices(&zigzag, 4.0).unwrap(), vec![zigzag[0], zigzag[3]]);
    }

    #[test]
    fn gradual_curve_is_flattened() {
        let arc: Vec<Point2> = circle(360, 50.0)[..90].to_vec();
        let out = simplify_vertices(&arc, 0.1).unwrap();
        assert!(out.len() <= 12, "kept {} points", out.len());
        assert_eq!(out.first(), arc.first());
        assert_eq!(out.last(), arc.last());
    }

    proptest! {
        #[test]
        fn output_is_a_subsequence_with_endpoints(
            raw in prop::collection::vec((-50.0..50.0_f64, -50.0..50.0_f64), 2..40),
            tolerance in 0.0..PI,
        ) {
            let line: Vec<Point2> = raw.into_iter().map(|(x, y)| p(x, y)).collect();
            prop_assume!(!crate::geometry::is_closed(&line));
            let out = simplify_vertices(&line, tolerance).unwrap();
            prop_assert!(out.len() <= line.len());
            prop_assert!(is_subsequence(&out, &line));
            prop_assert_eq!(out.first(), line.first());
            prop_assert_eq!(out.last(), line.last());
        }

        #[test]
        fn closed_output_keeps_a_triangle(n in 3_usize..64, tolerance in 0.0..PI) {
            let ring = Polyline::new(circle(n, 5.0)).closed();
            let out = SimplifyVertices::new(ring.clone(), tolerance).execute().unwrap();
            prop_assert!(out.is_closed());
            prop_assert!(out.vertex_cycle().len() >= 3);
            prop_assert!(is_subsequence(out.vertex_cycle(), ring.vertex_cycle()));
        }
    }
}
