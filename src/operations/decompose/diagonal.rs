//! Concavity measurement and diagonal search over a polygon piece.
//!
//! A piece is a counter-clockwise cycle of indices into a shared vertex
//! array. Every function here takes positions within the piece, not vertex
//! indices.

use crate::math::distance_2d::signed_line_dist;
use crate::math::intersect_2d::segments_intersect;
use crate::math::{cross, lex_cmp, Point2};

/// Previous, current and next vertex around position `k`.
fn corner<'a>(verts: &'a [Point2], piece: &[usize], k: usize) -> (&'a Point2, &'a Point2, &'a Point2) {
    let m = piece.len();
    (
        &verts[piece[(k + m - 1) % m]],
        &verts[piece[k]],
        &verts[piece[(k + 1) % m]],
    )
}

/// How far the vertex at `k` pokes into the piece, measured from the chord
/// joining its neighbours. `None` when the vertex is not reflex.
pub(super) fn reflex_depth(verts: &[Point2], piece: &[usize], k: usize) -> Option<f64> {
    let (prev, v, next) = corner(verts, piece, k);
    if cross(prev, v, next) < 0.0 {
        // Reflex vertices sit left of the chord on a counter-clockwise loop.
        Some(signed_line_dist(v, prev, next))
    } else {
        None
    }
}

/// Positions of the piece's convex hull vertices, ascending.
///
/// Empty when the piece has no area.
fn hull_positions(verts: &[Point2], piece: &[usize]) -> Vec<usize> {
    let at = move |k: usize| &verts[piece[k]];
    let mut order: Vec<usize> = (0..piece.len()).collect();
    order.sort_by(|&x, &y| lex_cmp(at(x), at(y)));
    order.dedup_by(|x, y| at(*x) == at(*y));

    let half = |positions: &mut dyn Iterator<Item = usize>| {
        let mut chain: Vec<usize> = Vec::new();
        for k in positions {
            while chain.len() >= 2
                && cross(at(chain[chain.len() - 2]), at(chain[chain.len() - 1]), at(k)) <= 0.0
            {
                chain.pop();
            }
            chain.push(k);
        }
        chain
    };
    let mut hull = half(&mut order.iter().copied());
    let mut upper = half(&mut order.iter().rev().copied());
    hull.pop();
    upper.pop();
    hull.append(&mut upper);
    if hull.len() < 3 {
        return Vec::new();
    }
    hull.sort_unstable();
    hull
}

/// Concavity of every vertex: its distance from the hull edge that spans
/// the pocket it lies in. Hull vertices have depth zero.
///
/// A piece whose depths are all within `tolerance` differs from its hull
/// only by pockets no deeper than `tolerance`.
pub(super) fn pocket_depths(verts: &[Point2], piece: &[usize]) -> Vec<f64> {
    let m = piece.len();
    let mut depths = vec![0.0; m];
    let hull = hull_positions(verts, piece);
    for (i, &from) in hull.iter().enumerate() {
        let to = hull[(i + 1) % hull.len()];
        let (a, b) = (&verts[piece[from]], &verts[piece[to]]);
        let mut k = (from + 1) % m;
        while k != to {
            depths[k] = signed_line_dist(&verts[piece[k]], a, b).abs();
            k = (k + 1) % m;
        }
    }
    depths
}

/// Position of the reflex vertex lying deepest in a pocket, provided the
/// depth exceeds `tolerance`.
///
/// Ties go to the lowest position.
pub(super) fn deepest_notch(verts: &[Point2], piece: &[usize], tolerance: f64) -> Option<usize> {
    pocket_depths(verts, piece)
        .into_iter()
        .enumerate()
        .filter(|&(k, depth)| depth > tolerance && reflex_depth(verts, piece, k).is_some())
        .max_by(|a, b| a.1.total_cmp(&b.1).then(b.0.cmp(&a.0)))
        .map(|(k, _)| k)
}

/// Returns `true` if the segment from the vertex at `k` towards `target`
/// starts out inside the piece.
fn in_cone(verts: &[Point2], piece: &[usize], k: usize, target: &Point2) -> bool {
    let (prev, a, next) = corner(verts, piece, k);
    if cross(a, next, prev) >= 0.0 {
        cross(a, target, prev) > 0.0 && cross(target, a, next) > 0.0
    } else {
        !(cross(a, target, next) >= 0.0 && cross(target, a, prev) >= 0.0)
    }
}

/// Returns `true` if positions `k` and `j` can be joined by an interior
/// diagonal that touches no other edge of the piece.
fn is_diagonal(verts: &[Point2], piece: &[usize], k: usize, j: usize) -> bool {
    let a = verts[piece[k]];
    let b = verts[piece[j]];
    if a == b || !in_cone(verts, piece, k, &b) || !in_cone(verts, piece, j, &a) {
        return false;
    }
    let m = piece.len();
    (0..m).all(|e| {
        let f = (e + 1) % m;
        if e == k || e == j || f == k || f == j {
            return true;
        }
        !segments_intersect(&a, &b, &verts[piece[e]], &verts[piece[f]])
    })
}

/// Finds the best diagonal partner for the reflex vertex at `k`.
///
/// Reflex partners are preferred since one cut then resolves two notches;
/// after that the shortest diagonal wins, then the lowest position.
pub(super) fn find_diagonal(verts: &[Point2], piece: &[usize], k: usize) -> Option<usize> {
    let m = piece.len();
    let origin = verts[piece[k]];
    let rank = |j: usize| u8::from(reflex_depth(verts, piece, j).is_none());
    let length = |j: usize| (verts[piece[j]] - origin).norm_squared();

    (0..m)
        .filter(|&j| j != k && j != (k + 1) % m && j != (k + m - 1) % m)
        .filter(|&j| is_diagonal(verts, piece, k, j))
        .min_by(|&x, &y| {
            rank(x)
                .cmp(&rank(y))
                .then(length(x).total_cmp(&length(y)))
                .then(x.cmp(&y))
        })
}

/// Cuts a piece along the diagonal between positions `k` and `j`.
///
/// Both halves keep the diagonal's endpoints and the piece's orientation.
pub(super) fn split(piece: &[usize], k: usize, j: usize) -> (Vec<usize>, Vec<usize>) {
    let m = piece.len();
    let walk = |from: usize, to: usize| {
        let mut out = Vec::new();
        let mut i = from;
        loop {
            out.push(piece[i]);
            if i == to {
                break;
            }
            i = (i + 1) % m;
        }
        out
    };
    (walk(k, j), walk(j, k))
}
