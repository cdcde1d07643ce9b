use super::{lex_cmp, Point2};

/// Computes the signed area of a polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise. A repeated
/// closing vertex contributes nothing, so open and closed forms agree.
#[must_use]
pub fn signed_area(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Rotates a vertex cycle (no repeated closing vertex) so it starts at the
/// lexicographically smallest vertex. Ensures deterministic output for tests.
#[must_use]
pub fn rotate_to_canonical_start(points: &[Point2]) -> Vec<Point2> {
    if points.len() < 2 {
        return points.to_vec();
    }
    let mut best = 0;
    for (i, pt) in points.iter().enumerate().skip(1) {
        if lex_cmp(pt, &points[best]).is_lt() {
            best = i;
        }
    }
    let mut rotated = Vec::with_capacity(points.len());
    rotated.extend_from_slice(&points[best..]);
    rotated.extend_from_slice(&points[..best]);
    rotated
}

/// Removes consecutive exact duplicates.
#[must_use]
pub fn dedup_consecutive(points: &[Point2]) -> Vec<Point2> {
    let mut out: Vec<Point2> = Vec::with_capacity(points.len());
    for &p in points {
        if out.last() != Some(&p) {
            out.push(p);
        }
    }
    out
}

/// Index of the lexicographically smallest and largest points.
///
/// Returns `(0, 0)` for an empty slice.
#[must_use]
pub fn extreme_indices(points: &[Point2]) -> (usize, usize) {
    let mut min = 0;
    let mut max = 0;
    for (i, pt) in points.iter().enumerate().skip(1) {
        if lex_cmp(pt, &points[min]).is_lt() {
            min = i;
        }
        if lex_cmp(pt, &points[max]).is_gt() {
            max = i;
        }
    }
    (min, max)
}
