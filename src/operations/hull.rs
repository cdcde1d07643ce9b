use tracing::debug;

use crate::error::{check_tolerance, GeometryError, Result};
use crate::geometry::Polyline;
use crate::math::{cross, lex_cmp, Point2};

/// Convex hull of a 2D point set (Andrew's monotone chain).
///
/// The hull is returned closed, counter-clockwise, starting at the
/// lexicographically smallest point. A point whose distance to the right of
/// the chord joining its hull neighbours is at most `tolerance` is dropped,
/// so collinear points never appear as vertices and a positive tolerance
/// coarsens the hull of noisy input.
#[derive(Debug)]
pub struct ConvexHull2D {
    points: Vec<Point2>,
    tolerance: f64,
}

impl ConvexHull2D {
    /// Creates a new convex hull operation.
    #[must_use]
    pub fn new(points: Vec<Point2>, tolerance: f64) -> Self {
        Self { points, tolerance }
    }

    /// Executes the hull construction.
    ///
    /// # Errors
    ///
    /// - `ParameterError::InvalidTolerance` if the tolerance is negative or not finite
    /// - `GeometryError::TooFewPoints` if fewer than 3 distinct points are given
    /// - `GeometryError::Collinear` if fewer than 3 vertices survive. Besides
    ///   truly collinear input, this happens when every point lies within
    ///   `tolerance` of the chord between the two extreme points, e.g. a
    ///   triangle no taller than the tolerance.
    pub fn execute(&self) -> Result<Polyline> {
        check_tolerance(self.tolerance)?;

        let mut sorted = self.points.clone();
        sorted.sort_by(lex_cmp);
        sorted.dedup();
        if sorted.len() < 3 {
            return Err(GeometryError::TooFewPoints {
                required: 3,
                found: sorted.len(),
            }
            .into());
        }

        let mut lower = self.chain(sorted.iter());
        let mut upper = self.chain(sorted.iter().rev());
        // Each chain ends where the other begins.
        lower.pop();
        upper.pop();
        lower.append(&mut upper);

        if lower.len() < 3 {
            return Err(GeometryError::Collinear.into());
        }

        debug!(
            input = self.points.len(),
            vertices = lower.len(),
            tolerance = self.tolerance,
            "built convex hull"
        );
        Ok(Polyline::new(lower).closed())
    }

    /// Builds one half of the hull, turning strictly left at every vertex.
    fn chain<'a>(&self, points: impl Iterator<Item = &'a Point2>) -> Vec<Point2> {
        let mut chain: Vec<Point2> = Vec::new();
        for &b in points {
            while chain.len() >= 2 {
                let o = chain[chain.len() - 2];
                let a = chain[chain.len() - 1];
                let chord = (b - o).norm();
                // Distance of `a` to the right of `o → b`.
                if chord == 0.0 || cross(&o, &a, &b) / chord <= self.tolerance {
                    chain.pop();
                } else {
                    break;
                }
            }
            chain.push(b);
        }
        chain
    }
}

/// Computes the convex hull of `points` with [`ConvexHull2D`].
///
/// # Errors
///
/// See [`ConvexHull2D::execute`].
pub fn convex_hull(points: &[Point2], tolerance: f64) -> Result<Vec<Point2>> {
    ConvexHull2D::new(points.to_vec(), tolerance)
        .execute()
        .map(Polyline::into_points)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{AutogeomError, ParameterError};
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn unit_square_corners() {
        let corners = vec![p(1.0, 1.0), p(0.0, 0.0), p(0.0, 1.0), p(1.0, 0.0)];
        let hull = convex_hull(&corners, 0.0).unwrap();
        assert_eq!(
            hull,
            vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0), p(0.0, 0.0)]
        );
        assert!(Polyline::new(hull).signed_area() > 0.0);
    }

    #[test]
    fn interior_duplicate_and_edge_points_are_dropped() {
        let points = vec![
            p(0.0, 0.0),
            p(2.0, 0.0),
            p(2.0, 2.0),
            p(0.0, 2.0),
            p(1.0, 1.0),
            p(1.0, 0.0),
            p(2.0, 1.0),
            p(0.0, 0.0),
            p(2.0, 2.0),
        ];
        let hull = ConvexHull2D::new(points, 0.0).execute().unwrap();
        assert_eq!(hull.vertex_cycle().len(), 4);
        assert_abs_diff_eq!(hull.signed_area(), 4.0);
    }

    #[test]
    fn tolerance_absorbs_shallow_bumps() {
        let points = vec![p(0.0, 0.0), p(1.0, -0.01), p(2.0, 0.0), p(2.0, 2.0), p(0.0, 2.0)];
        let exact = ConvexHull2D::new(points.clone(), 0.0).execute().unwrap();
        assert_eq!(exact.vertex_cycle().len(), 5);
        let coarse = ConvexHull2D::new(points, 0.05).execute().unwrap();
        assert_eq!(
            coarse.points,
            vec![p(0.0, 0.0), p(2.0, 0.0), p(2.0, 2.0), p(0.0, 2.0), p(0.0, 0.0)]
        );
    }

    #[test]
    fn signed_zero_duplicates_collapse() {
        let points = [p(-0.0, 0.0), p(-0.0, 1.0), p(0.0, 0.0), p(1.0, 0.0)];
        let hull = Polyline::new(convex_hull(&points, 0.0).unwrap());
        assert!(hull.is_closed());
        let cycle = hull.vertex_cycle();
        assert_eq!(cycle.len(), 3);
        for i in 0..3 {
            assert!(cross(&cycle[i], &cycle[(i + 1) % 3], &cycle[(i + 2) % 3]) > 0.0);
        }
        assert_abs_diff_eq!(hull.signed_area(), 0.5);

        let err = convex_hull(&[p(0.0, 0.0), p(-0.0, -0.0), p(1.0, 1.0)], 0.0).unwrap_err();
        assert!(matches!(
            err,
            AutogeomError::Geometry(GeometryError::TooFewPoints {
                required: 3,
                found: 2
            })
        ));
    }

    #[test]
    fn flat_triangle_within_tolerance_is_collinear() {
        let sliver = [p(0.0, 0.0), p(2.0, 0.0), p(1.0, 0.1)];
        let hull = convex_hull(&sliver, 0.05).unwrap();
        assert_eq!(hull.len(), 4);
        let err = convex_hull(&sliver, 0.5).unwrap_err();
        assert!(matches!(err, AutogeomError::Geometry(GeometryError::Collinear)));
    }

    #[test]
    fn too_few_distinct_points() {
        let err = convex_hull(&[p(0.0, 0.0), p(1.0, 1.0), p(0.0, 0.0)], 0.0).unwrap_err();
        assert!(matches!(
            err,
            AutogeomError::Geometry(GeometryError::TooFewPoints {
                required: 3,
                found: 2
            })
        ));
    }

    #[test]
    fn collinear_points_have_no_hull() {
        let err = convex_hull(&[p(0.0, 0.0), p(1.0, 1.0), p(3.0, 3.0)], 0.0).unwrap_err();
        assert!(matches!(err, AutogeomError::Geometry(GeometryError::Collinear)));
    }

    #[test]
    fn negative_tolerance_is_rejected() {
        let err = convex_hull(&[p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0)], -0.5).unwrap_err();
        assert!(matches!(
            err,
            AutogeomError::Parameter(ParameterError::InvalidTolerance(_))
        ));
    }

    proptest! {
        #[test]
        fn hull_is_ccw_and_contains_input(
            raw in prop::collection::vec((-100.0..100.0_f64, -100.0..100.0_f64), 3..60),
        ) {
            let points: Vec<Point2> = raw.into_iter().map(|(x, y)| p(x, y)).collect();
            let hull = match convex_hull(&points, 0.0) {
                Ok(hull) => Polyline::new(hull),
                Err(AutogeomError::Geometry(GeometryError::Collinear)) => return Ok(()),
                Err(err) => return Err(TestCaseError::fail(err.to_string())),
            };
            prop_assert!(hull.is_closed());
            let cycle = hull.vertex_cycle();
            let n = cycle.len();
            for i in 0..n {
                let turn = cross(&cycle[i], &cycle[(i + 1) % n], &cycle[(i + 2) % n]);
                prop_assert!(turn > 0.0);
            }
            for q in &points {
                for i in 0..n {
                    let a = cycle[i];
                    let b = cycle[(i + 1) % n];
                    let side = cross(&a, &b, q) / (b - a).norm();
                    prop_assert!(side >= -1e-9, "{q:?} outside edge {a:?} -> {b:?}");
                }
            }
        }
    }
}
