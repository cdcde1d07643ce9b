use tracing::debug;

use crate::error::Result;
use crate::geometry::Polyline;
use crate::math::distance_2d::{path_length, signed_line_dist};
use crate::math::polygon_2d::extreme_indices;
use crate::math::Point2;

use super::prepare;

/// Douglas-Peucker simplification.
///
/// Works well on smooth or gently curved outlines, less so on angular ones
/// (see [`SimplifyVertices`](super::SimplifyVertices)).
///
/// - Open polylines keep both endpoints.
/// - Closed polylines are split at their lexicographically smallest and
///   largest vertices, each half is simplified, and the loop is rebuilt
///   starting from the lowest surviving input vertex.
/// - Spans whose chord and path length are both within `tolerance / 2`
///   collapse to their endpoints.
/// - A tolerance of zero returns the input with consecutive duplicates
///   removed.
#[derive(Debug)]
pub struct SimplifyCurves {
    polyline: Polyline,
    tolerance: f64,
}

impl SimplifyCurves {
    /// Creates a new curve simplification operation.
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
        if self.tolerance == 0.0 {
            return Ok(prepared.identity());
        }

        let points = &prepared.points;
        let n = points.len();
        let mut kept = if prepared.closed && n > 2 {
            let (start, end) = extreme_indices(points);
            let mut kept = vec![start, end];
            douglas_peucker(points, start, end, self.tolerance, &mut kept);
            douglas_peucker(points, end, start, self.tolerance, &mut kept);
            kept
        } else {
            let mut kept = vec![0, n - 1];
            douglas_peucker(points, 0, n - 1, self.tolerance, &mut kept);
            kept
        };
        kept.sort_unstable();
        kept.dedup();

        debug!(
            input = self.polyline.len(),
            kept = kept.len(),
            closed = prepared.closed,
            tolerance = self.tolerance,
            "simplified curves"
        );
        Ok(prepared.finish(&kept))
    }
}

/// Pushes the indices strictly between `start` and `end` (walking forward,
/// wrapping around `points`) that survive simplification.
fn douglas_peucker(
    points: &[Point2],
    start: usize,
    end: usize,
    tolerance: f64,
    kept: &mut Vec<usize>,
) {
    let n = points.len();
    let next = |i: usize| (i + 1) % n;
    let min = tolerance * 0.5;

    let mut stack = vec![(start, end)];
    while let Some((s, e)) = stack.pop() {
        if (e + n - s) % n < 2 {
            continue;
        }

        let (a, b) = (points[s], points[e]);
        if (b - a).norm() <= min && span_is_short(points, s, e, min) {
            continue;
        }

        let mut max = 0.0;
        let mut max_i = s;
        let mut i = next(s);
        while i != e {
            let dist = signed_line_dist(&points[i], &a, &b).abs();
            if dist > max {
                max = dist;
                max_i = i;
            }
            i = next(i);
        }

        if max > tolerance {
            kept.push(max_i);
            stack.push((max_i, e));
            stack.push((s, max_i));
        }
    }
}

/// `true` if the path from `start` to `end` is no longer than `min`.
fn span_is_short(points: &[Point2], start: usize, end: usize, min: f64) -> bool {
    let n = points.len();
    let mut path = Vec::new();
    let mut i = start;
    loop {
        path.push(points[i]);
        if i == end {
            break;
        }
        i = (i + 1) % n;
    }
    path_length(&path) <= min
}

/// Simplifies a point sequence with [`SimplifyCurves`].
///
/// # Errors
///
/// See [`SimplifyCurves::execute`].
pub fn simplify_curves(polyline: &[Point2], tolerance: f64) -> Result<Vec<Point2>> {
    SimplifyCurves::new(Polyline::new(polyline.to_vec()), tolerance)
        .execute()
        .map(Polyline::into_points)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{AutogeomError, GeometryError, ParameterError};
    use crate::operations::simplify::test_support::{circle, is_subsequence};
    use proptest::prelude::*;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn straight_line_collapses_to_endpoints() {
        let line: Vec<Point2> = (0..5).map(|i| p(f64::from(i), 2.0 * f64::from(i))).collect();
        for tolerance in [1e-9, 0.1, 10.0] {
            let out = simplify_curves(&line, tolerance).unwrap();
            assert_eq!(out, vec![line[0], line[4]], "tolerance {tolerance}");
        }
    }

    #[test]
    fn zero_tolerance_is_identity() {
        let line = vec![p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0), p(2.0, 1.0)];
        assert_eq!(simplify_curves(&line, 0.0).unwrap(), line);
    }

    #[test]
    fn zero_tolerance_still_collapses_duplicates() {
        let line = vec![p(0.0, 0.0), p(0.0, 0.0), p(1.0, 0.0), p(1.0, 0.0)];
        assert_eq!(simplify_curves(&line, 0.0).unwrap(), vec![p(0.0, 0.0), p(1.0, 0.0)]);
    }

    #[test]
    fn keeps_points_beyond_tolerance() {
        let zigzag = vec![p(0.0, 0.0), p(1.0, 1.0), p(2.0, 0.0), p(3.0, 1.0), p(4.0, 0.0)];
        assert_eq!(simplify_curves(&zigzag, 0.5).unwrap(), zigzag);
        assert_eq!(simplify_curves(&zigzag, 1.5).unwrap(), vec![zigzag[0], zigzag[4]]);
    }

    #[test]
    fn keeps_the_peak_of_a_tent() {
        let tent = vec![p(0.0, 0.0), p(1.0, 1.6), p(2.0, 3.0), p(3.0, 1.6), p(4.0, 0.0)];
        assert_eq!(
            simplify_curves(&tent, 0.5).unwrap(),
            vec![p(0.0, 0.0), p(2.0, 3.0), p(4.0, 0.0)]
        );
    }

    #[test]
    fn closed_circle_stays_closed_and_shrinks() {
        let ring = Polyline::new(circle(64, 10.0)).closed();
        let out = SimplifyCurves::new(ring.clone(), 0.5).execute().unwrap();
        assert!(out.is_closed());
        assert!(out.len() < ring.len());
        assert!(out.vertex_cycle().len() >= 3);
        assert!(is_subsequence(out.vertex_cycle(), ring.vertex_cycle()));
    }

    #[test]
    fn closed_square_keeps_corners() {
        let square = Polyline::new(vec![
            p(0.0, 0.0),
            p(1.0, 0.0),
            p(2.0, 0.0),
            p(2.0, 2.0),
            p(0.0, 2.0),
            p(0.0, 0.0),
        ]);
        let out = SimplifyCurves::new(square, 0.1).execute().unwrap();
        assert_eq!(
            out.points,
            vec![p(0.0, 0.0), p(2.0, 0.0), p(2.0, 2.0), p(0.0, 2.0), p(0.0, 0.0)]
        );
    }

    #[test]
    fn rejects_degenerate_input() {
        let err = simplify_curves(&[p(1.0, 1.0), p(1.0, 1.0), p(1.0, 1.0)], 0.1).unwrap_err();
        assert!(matches!(
            err,
            AutogeomError::Geometry(GeometryError::TooFewPoints { required: 2, .. })
        ));
        assert!(simplify_curves(&[], 0.1).is_err());
        let err = simplify_curves(&[p(0.0, 0.0), p(1.0, 0.0)], -1.0).unwrap_err();
        assert!(matches!(
            err,
            AutogeomError::Parameter(ParameterError::InvalidTolerance(_))
        ));
    }

    fn open_polyline() -> impl Strategy<Value = Vec<Point2>> {
        prop::collection::vec((-100.0..100.0_f64, -100.0..100.0_f64), 2..40)
            .prop_map(|v| v.into_iter().map(|(x, y)| p(x, y)).collect())
    }

    proptest! {
        #[test]
        fn output_is_a_subsequence_with_endpoints(line in open_polyline(), tolerance in 0.0..20.0_f64) {
            prop_assume!(!crate::geometry::is_closed(&line));
            let out = simplify_curves(&line, tolerance).unwrap();
            prop_assert!(out.len() <= line.len());
            prop_assert!(is_subsequence(&out, &line));
            prop_assert_eq!(out.first(), line.first());
            prop_assert_eq!(out.last(), line.last());
        }

        #[test]
        fn closed_output_is_a_cyclic_subsequence(n in 3_usize..64, tolerance in 0.0..5.0_f64) {
            let ring = Polyline::new(circle(n, 10.0)).closed();
            let out = SimplifyCurves::new(ring.clone(), tolerance).execute().unwrap();
            prop_assert!(out.is_closed());
            prop_assert!(out.len() <= ring.len());
            prop_assert!(is_subsequence(out.vertex_cycle(), ring.vertex_cycle()));
        }
    }
}
