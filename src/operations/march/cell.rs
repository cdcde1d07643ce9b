use crate::math::{lerp, Point2};

use super::MarchMode;

/// One side of a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Bottom,
    Right,
    Top,
    Left,
}

impl Side {
    fn is_opposite(self, other: Side) -> bool {
        matches!(
            (self, other),
            (Side::Bottom, Side::Top)
                | (Side::Top, Side::Bottom)
                | (Side::Left, Side::Right)
                | (Side::Right, Side::Left)
        )
    }
}

use Side::{Bottom as B, Left as L, Right as R, Top as T};

/// Boundary crossings for each of the 16 marching-squares cases, as
/// `(from, to)` side pairs with the inside on the left of `from → to`.
///
/// The case index packs `a > t` into bit 0, `b > t` into bit 1, `c > t`
/// into bit 2 and `d > t` into bit 3. Saddles (0x6, 0x9) list the variant
/// that keeps the inside corners apart; see [`SADDLE_JOINED`].
const CROSSINGS: [&[(Side, Side)]; 16] = [
    &[],
    &[(B, L)],
    &[(R, B)],
    &[(R, L)],
    &[(L, T)],
    &[(B, T)],
    &[(R, B), (L, T)],
    &[(R, T)],
    &[(T, R)],
    &[(B, L), (T, R)],
    &[(T, B)],
    &[(T, L)],
    &[(L, R)],
    &[(B, R)],
    &[(L, B)],
    &[],
];

/// Saddle variants where the inside corners connect through the cell centre.
const SADDLE_JOINED: [&[(Side, Side)]; 2] = [&[(L, B), (R, T)], &[(B, R), (T, L)]];

/// Sample values at the four corners of a cell together with its extent.
///
/// Corner layout: `a` bottom-left, `b` bottom-right, `c` top-left,
/// `d` top-right.
#[derive(Debug, Clone, Copy)]
pub(super) struct Cell {
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl Cell {
    /// Marching-squares case index against `threshold`.
    fn case(&self, threshold: f64) -> usize {
        usize::from(self.a > threshold)
            | usize::from(self.b > threshold) << 1
            | usize::from(self.c > threshold) << 2
            | usize::from(self.d > threshold) << 3
    }

    /// Side pairs crossed by the contour in this cell.
    ///
    /// Saddles are resolved by the mean of the four corners: a mean above
    /// the threshold puts the centre inside and joins the inside corners.
    fn crossings(&self, threshold: f64) -> &'static [(Side, Side)] {
        let case = self.case(threshold);
        if case == 0x6 || case == 0x9 {
            let mean = (self.a + self.b + self.c + self.d) * 0.25;
            if mean > threshold {
                return SADDLE_JOINED[usize::from(case == 0x9)];
            }
        }
        CROSSINGS[case]
    }

    /// Interpolated crossing on `side`.
    fn soft_point(&self, side: Side, t: f64) -> Point2 {
        match side {
            Side::Bottom => Point2::new(midlerp(self.x0, self.x1, self.a, self.b, t), self.y0),
            Side::Top => Point2::new(midlerp(self.x0, self.x1, self.c, self.d, t), self.y1),
            Side::Left => Point2::new(self.x0, midlerp(self.y0, self.y1, self.a, self.c, t)),
            Side::Right => Point2::new(self.x1, midlerp(self.y0, self.y1, self.b, self.d, t)),
        }
    }

    /// Midpoint of `side`.
    fn hard_point(&self, side: Side) -> Point2 {
        let xm = lerp(self.x0, self.x1, 0.5);
        let ym = lerp(self.y0, self.y1, 0.5);
        match side {
            Side::Bottom => Point2::new(xm, self.y0),
            Side::Top => Point2::new(xm, self.y1),
            Side::Left => Point2::new(self.x0, ym),
            Side::Right => Point2::new(self.x1, ym),
        }
    }

    fn center(&self) -> Point2 {
        Point2::new(lerp(self.x0, self.x1, 0.5), lerp(self.y0, self.y1, 0.5))
    }

    /// Emits the boundary segments of this cell, skipping zero-length ones.
    ///
    /// Returns the number of segments passed to `emit`.
    pub(super) fn march<E, F>(&self, threshold: f64, mode: MarchMode, emit: &mut F) -> Result<usize, E>
    where
        F: FnMut(Point2, Point2) -> Result<(), E>,
    {
        let mut emitted = 0;
        for &(from, to) in self.crossings(threshold) {
            match mode {
                MarchMode::Soft => {
                    let v0 = self.soft_point(from, threshold);
                    let v1 = self.soft_point(to, threshold);
                    emitted += segment(v0, v1, emit)?;
                }
                MarchMode::Hard => {
                    let v0 = self.hard_point(from);
                    let v1 = self.hard_point(to);
                    if from.is_opposite(to) {
                        emitted += segment(v0, v1, emit)?;
                    } else {
                        let mid = self.center();
                        emitted += segment(v0, mid, emit)?;
                        emitted += segment(mid, v1, emit)?;
                    }
                }
            }
        }
        Ok(emitted)
    }
}

/// Position along `x0 → x1` where the linear ramp from `s0` to `s1` meets `t`.
fn midlerp(x0: f64, x1: f64, s0: f64, s1: f64, t: f64) -> f64 {
    lerp(x0, x1, (t - s0) / (s1 - s0))
}

fn segment<E, F>(v0: Point2, v1: Point2, emit: &mut F) -> Result<usize, E>
where
    F: FnMut(Point2, Point2) -> Result<(), E>,
{
    if v0 == v1 {
        return Ok(0);
    }
    emit(v0, v1)?;
    Ok(1)
}
