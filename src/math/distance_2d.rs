use super::{Point2, TOLERANCE};

/// Returns the signed distance of `p` from the infinite line through `a → b`.
///
/// Positive on the left of the direction of travel. When `a` and `b`
/// coincide, returns the (unsigned) distance from `p` to `a`.
#[must_use]
pub fn signed_line_dist(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let d = b - a;
    let len = d.norm();
    if len < TOLERANCE {
        return (p - a).norm();
    }
    (d.x * (p.y - a.y) - d.y * (p.x - a.x)) / len
}

/// Total length of the path through `points`.
#[must_use]
pub fn path_length(points: &[Point2]) -> f64 {
    points.windows(2).map(|w| (w[1] - w[0]).norm()).sum()
}
