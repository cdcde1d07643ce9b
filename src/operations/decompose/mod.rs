mod diagonal;
mod merge;

use tracing::{debug, trace, warn};

use crate::error::{check_tolerance, AutogeomError, GeometryError, Result};
use crate::geometry::Polyline;
use crate::math::polygon_2d::{dedup_consecutive, signed_area};
use crate::math::Point2;
use crate::operations::ConvexHull2D;

use diagonal::{deepest_notch, find_diagonal, split};
use merge::merge_pieces;

/// Approximate convex decomposition of a simple polygon.
///
/// A vertex's concavity is its distance from the convex hull edge spanning
/// the pocket it sits in. The polygon is cut along interior diagonals from
/// its most concave reflex vertex until no piece has a vertex more than
/// `tolerance` inside its hull. A merge pass then rejoins neighbouring
/// pieces whose union still meets that bound. Each remaining piece is
/// emitted as its convex hull: closed, counter-clockwise and starting at its
/// lexicographically smallest vertex. Replacing a piece by its hull only
/// fills pockets at most `tolerance` deep, so the added area is at most
/// `tolerance` times the length of the boundary those pockets run along.
///
/// Self-intersecting input is processed best-effort. Where no interior
/// diagonal exists the hull of the whole piece is emitted instead, so the
/// result may be coarser than the input.
#[derive(Debug)]
pub struct ConvexDecomposition {
    polygon: Polyline,
    tolerance: f64,
}

impl ConvexDecomposition {
    /// Creates a new decomposition operation.
    #[must_use]
    pub fn new(polygon: Polyline, tolerance: f64) -> Self {
        Self { polygon, tolerance }
    }

    /// Executes the decomposition.
    ///
    /// Pieces with no area are dropped, so an all-collinear polygon yields
    /// an empty result.
    ///
    /// # Errors
    ///
    /// - `ParameterError::InvalidTolerance` if the tolerance is negative or not finite
    /// - `GeometryError::EmptyPolygon` if the polygon has no points
    /// - `GeometryError::OpenPolygon` if the first and last points differ
    /// - `GeometryError::TooFewPoints` if fewer than 3 distinct vertices remain
    pub fn execute(&self) -> Result<Vec<Polyline>> {
        check_tolerance(self.tolerance)?;
        let verts = self.vertices()?;

        let mut stack = vec![(0..verts.len()).collect::<Vec<usize>>()];
        let mut pieces = Vec::new();
        let mut fallbacks = 0;

        while let Some(piece) = stack.pop() {
            let Some(k) = deepest_notch(&verts, &piece, self.tolerance) else {
                pieces.push(piece);
                continue;
            };
            if let Some(j) = find_diagonal(&verts, &piece, k) {
                trace!(from = piece[k], to = piece[j], "cutting diagonal");
                let (left, right) = split(&piece, k, j);
                stack.push(left);
                stack.push(right);
            } else {
                warn!(
                    vertices = piece.len(),
                    notch = piece[k],
                    "no interior diagonal, falling back to convex hull of piece"
                );
                fallbacks += 1;
                pieces.push(piece);
            }
        }

        let cut = pieces.len();
        let merges = merge_pieces(&verts, &mut pieces, self.tolerance);

        let mut out = Vec::with_capacity(pieces.len());
        for piece in &pieces {
            let points = piece.iter().map(|&i| verts[i]).collect();
            match ConvexHull2D::new(points, 0.0).execute() {
                Ok(hull) => out.push(hull),
                Err(AutogeomError::Geometry(
                    GeometryError::Collinear | GeometryError::TooFewPoints { .. },
                )) => trace!(vertices = piece.len(), "dropping zero-area piece"),
                Err(err) => return Err(err),
            }
        }

        debug!(
            vertices = verts.len(),
            cut,
            merges,
            fallbacks,
            pieces = out.len(),
            tolerance = self.tolerance,
            "decomposed polygon"
        );
        Ok(out)
    }

    /// Distinct vertices of the polygon, counter-clockwise.
    fn vertices(&self) -> Result<Vec<Point2>> {
        if self.polygon.is_empty() {
            return Err(GeometryError::EmptyPolygon.into());
        }
        if !self.polygon.is_closed() {
            return Err(GeometryError::OpenPolygon.into());
        }
        let mut verts = dedup_consecutive(self.polygon.vertex_cycle());
        if verts.len() > 1 && verts.first() == verts.last() {
            verts.pop();
        }
        if verts.len() < 3 {
            return Err(GeometryError::TooFewPoints {
                required: 3,
                found: verts.len(),
            }
            .into());
        }
        if signed_area(&verts) < 0.0 {
            verts.reverse();
        }
        Ok(verts)
    }
}

/// Decomposes a closed polygon with [`ConvexDecomposition`].
///
/// # Errors
///
/// See [`ConvexDecomposition::execute`].
pub fn convex_decomposition(polygon: &[Point2], tolerance: f64) -> Result<Vec<Vec<Point2>>> {
    let pieces = ConvexDecomposition::new(Polyline::new(polygon.to_vec()), tolerance).execute()?;
    Ok(pieces.into_iter().map(Polyline::into_points).collect())
}
