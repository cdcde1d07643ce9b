use tracing::trace;

use crate::math::Point2;

use super::diagonal::pocket_depths;

/// Greedily merges pieces that share an edge while the union stays convex
/// within `tolerance`. Returns the number of merges performed.
pub(super) fn merge_pieces(verts: &[Point2], pieces: &mut Vec<Vec<usize>>, tolerance: f64) -> usize {
    let mut merges = 0;
    'scan: loop {
        for i in 0..pieces.len() {
            for j in (i + 1)..pieces.len() {
                if let Some(merged) = try_merge(verts, &pieces[i], &pieces[j], tolerance) {
                    trace!(vertices = merged.len(), "merged neighbouring pieces");
                    pieces[i] = merged;
                    pieces.remove(j);
                    merges += 1;
                    continue 'scan;
                }
            }
        }
        return merges;
    }
}

/// Returns `true` if no vertex of `piece` lies more than `tolerance` inside
/// its convex hull.
pub(super) fn is_convex(verts: &[Point2], piece: &[usize], tolerance: f64) -> bool {
    pocket_depths(verts, piece).iter().all(|&depth| depth <= tolerance)
}

/// Positions `(ia, ib)` such that edge `ia → ia+1` of `a` runs opposite to
/// edge `ib → ib+1` of `b`.
fn shared_edge(a: &[usize], b: &[usize]) -> Option<(usize, usize)> {
    let (ma, mb) = (a.len(), b.len());
    (0..ma).find_map(|ia| {
        let (u, v) = (a[ia], a[(ia + 1) % ma]);
        (0..mb)
            .find(|&ib| b[ib] == v && b[(ib + 1) % mb] == u)
            .map(|ib| (ia, ib))
    })
}

fn try_merge(verts: &[Point2], a: &[usize], b: &[usize], tolerance: f64) -> Option<Vec<usize>> {
    let (ia, ib) = shared_edge(a, b)?;
    let (ma, mb) = (a.len(), b.len());

    // All of `a` from the far end of the shared edge round to its near end,
    // then the vertices of `b` strictly between the two.
    let mut merged = Vec::with_capacity(ma + mb - 2);
    merged.extend((1..=ma).map(|s| a[(ia + s) % ma]));
    merged.extend((2..mb).map(|s| b[(ib + s) % mb]));

    let mut seen = merged.clone();
    seen.sort_unstable();
    seen.dedup();
    if seen.len() != merged.len() {
        // Pinched union.
        return None;
    }
    is_convex(verts, &merged, tolerance).then_some(merged)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn square() -> Vec<Point2> {
        vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)]
    }

    #[test]
    fn triangles_of_a_square_merge() {
        let verts = square();
        let mut pieces = vec![vec![0, 1, 2], vec![0, 2, 3]];
        assert_eq!(merge_pieces(&verts, &mut pieces, 0.0), 1);
        assert_eq!(pieces, vec![vec![0, 1, 2, 3]]);
    }

    #[test]
    fn fan_merges_completely() {
        let verts = vec![
            p(0.0, 0.0),
            p(2.0, 0.0),
            p(3.0, 1.0),
            p(2.0, 2.0),
            p(0.0, 2.0),
        ];
        let mut pieces = vec![vec![0, 1, 2], vec![0, 2, 3], vec![0, 3, 4]];
        assert_eq!(merge_pieces(&verts, &mut pieces, 0.0), 2);
        assert_eq!(pieces.len(), 1);
        assert!(is_convex(&verts, &pieces[0], 0.0));
        assert_eq!(pieces[0].len(), 5);
    }

    #[test]
    fn l_halves_stay_apart() {
        let verts = vec![
            p(0.0, 0.0),
            p(2.0, 0.0),
            p(2.0, 1.0),
            p(1.0, 1.0),
            p(1.0, 2.0),
            p(0.0, 2.0),
        ];
        let mut pieces = vec![vec![3, 4, 5, 0], vec![0, 1, 2, 3]];
        assert_eq!(merge_pieces(&verts, &mut pieces, 0.0), 0);
        assert_eq!(pieces.len(), 2);
        // A loose enough tolerance accepts the notch.
        assert_eq!(merge_pieces(&verts, &mut pieces, 1.0), 1);
    }

    #[test]
    fn pieces_without_common_edge_are_kept() {
        let verts = vec![
            p(0.0, 0.0),
            p(1.0, 0.0),
            p(1.0, 1.0),
            p(2.0, 1.0),
            p(2.0, 2.0),
        ];
        // Touch at vertex 2 only.
        let mut pieces = vec![vec![0, 1, 2], vec![2, 3, 4]];
        assert_eq!(merge_pieces(&verts, &mut pieces, 0.0), 0);
    }
}
