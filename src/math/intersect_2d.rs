use super::{cross, Point2};

/// Returns `true` if `c` lies on the closed segment `a → b`, given that the
/// three points are already known to be collinear.
fn on_collinear_segment(a: &Point2, b: &Point2, c: &Point2) -> bool {
    c.x >= a.x.min(b.x) && c.x <= a.x.max(b.x) && c.y >= a.y.min(b.y) && c.y <= a.y.max(b.y)
}

/// Bounded segment-segment intersection test in 2D.
///
/// Returns `true` when the closed segments `a0 → a1` and `b0 → b1` share at
/// least one point, including touching endpoints and collinear overlap.
#[must_use]
pub fn segments_intersect(a0: &Point2, a1: &Point2, b0: &Point2, b1: &Point2) -> bool {
    let d1 = cross(b0, b1, a0);
    let d2 = cross(b0, b1, a1);
    let d3 = cross(a0, a1, b0);
    let d4 = cross(a0, a1, b1);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    (d1 == 0.0 && on_collinear_segment(b0, b1, a0))
        || (d2 == 0.0 && on_collinear_segment(b0, b1, a1))
        || (d3 == 0.0 && on_collinear_segment(a0, a1, b0))
        || (d4 == 0.0 && on_collinear_segment(a0, a1, b1))
}
