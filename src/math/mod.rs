pub mod distance_2d;
pub mod intersect_2d;
pub mod polygon_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// Global geometric tolerance for degenerate-length checks.
///
/// Endpoint matching and closure tests never use it; those are exact.
pub const TOLERANCE: f64 = 1e-10;

/// Linear interpolation between `a` and `b`.
#[inline]
#[must_use]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// Z component of the cross product of `(a - o)` and `(b - o)`.
///
/// Positive when `o → a → b` turns counter-clockwise.
#[inline]
#[must_use]
pub fn cross(o: &Point2, a: &Point2, b: &Point2) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

/// Lexicographic (x, then y) ordering of points.
///
/// `-0.0` and `0.0` compare equal, so the ordering agrees with `==`.
#[must_use]
pub fn lex_cmp(a: &Point2, b: &Point2) -> std::cmp::Ordering {
    // Adding `0.0` turns `-0.0` into `0.0` and leaves everything else alone.
    let key = |v: f64| v + 0.0;
    key(a.x)
        .total_cmp(&key(b.x))
        .then(key(a.y).total_cmp(&key(b.y)))
}
