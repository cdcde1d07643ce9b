mod cell;

use tracing::debug;

use crate::error::{AutogeomError, ParameterError, Result};
use crate::geometry::BoundingBox;
use crate::math::{lerp, Point2};

use cell::Cell;

/// How boundary crossings are placed along crossed cell edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarchMode {
    /// Anti-aliased: crossings are interpolated between the corner samples.
    #[default]
    Soft,
    /// Aliased: crossings sit at edge midpoints and corners are routed
    /// through the cell centre, giving a pixel staircase.
    Hard,
}

/// Parameters controlling contour tracing.
#[derive(Debug, Clone, Copy)]
pub struct MarchParams {
    /// Number of sample columns, including both box edges.
    pub x_samples: usize,
    /// Number of sample rows, including both box edges.
    pub y_samples: usize,
    /// Samples strictly above this value are inside the contour.
    pub threshold: f64,
    pub mode: MarchMode,
}

impl Default for MarchParams {
    fn default() -> Self {
        Self {
            x_samples: 64,
            y_samples: 64,
            threshold: 0.5,
            mode: MarchMode::Soft,
        }
    }
}

/// Traces the iso-contour of a sampled scalar field with marching squares.
///
/// A regular `x_samples × y_samples` grid spans the bounding box. Samples are
/// taken row by row from the bottom edge upward, left to right within a
/// row, and every grid point is sampled exactly once. Each cell whose corners
/// straddle the threshold emits one or more segments with the inside
/// (values above the threshold) on the left, so outlines of filled regions
/// run counter-clockwise.
///
/// Shared cell edges produce bit-identical crossing points, which lets a
/// [`PolylineSet`](crate::operations::PolylineSet) join the segments by exact
/// endpoint equality.
#[derive(Debug)]
pub struct MarchSquares {
    bb: BoundingBox,
    params: MarchParams,
}

impl MarchSquares {
    /// Creates a new contour tracing operation.
    #[must_use]
    pub fn new(bb: BoundingBox, params: MarchParams) -> Self {
        Self { bb, params }
    }

    /// Checks the grid and box before any sampling happens.
    fn validate(&self) -> Result<()> {
        if self.params.x_samples < 2 {
            return Err(ParameterError::TooFewSamples {
                axis: "x",
                value: self.params.x_samples,
            }
            .into());
        }
        if self.params.y_samples < 2 {
            return Err(ParameterError::TooFewSamples {
                axis: "y",
                value: self.params.y_samples,
            }
            .into());
        }
        if !self.params.threshold.is_finite() {
            return Err(ParameterError::InvalidThreshold(self.params.threshold).into());
        }
        if self.bb.is_degenerate() {
            return Err(self.bb.degenerate_error());
        }
        Ok(())
    }

    /// Traces the contour with infallible callbacks.
    ///
    /// Returns the number of segments passed to `emit`.
    ///
    /// # Errors
    ///
    /// Returns `ParameterError::TooFewSamples` or `ParameterError::InvalidThreshold`
    /// for bad parameters, or `GeometryError::DegenerateBoundingBox` if the box
    /// has no area. Nothing is sampled or emitted in that case.
    pub fn execute<S, F>(&self, mut sample: S, mut emit: F) -> Result<usize>
    where
        S: FnMut(Point2) -> f64,
        F: FnMut(Point2, Point2),
    {
        self.try_execute::<AutogeomError, _, _>(
            |p| Ok(sample(p)),
            |v0, v1| {
                emit(v0, v1);
                Ok(())
            },
        )
    }

    /// Traces the contour with fallible callbacks.
    ///
    /// The first error returned by `sample` or `emit` stops the trace and is
    /// returned unchanged. Segments of rows finished before the failing
    /// call have already been delivered to `emit`.
    ///
    /// # Errors
    ///
    /// Validation failures (see [`execute`](Self::execute)) converted into
    /// `E`, or any error produced by a callback.
    pub fn try_execute<E, S, F>(&self, mut sample: S, mut emit: F) -> std::result::Result<usize, E>
    where
        E: From<AutogeomError>,
        S: FnMut(Point2) -> std::result::Result<f64, E>,
        F: FnMut(Point2, Point2) -> std::result::Result<(), E>,
    {
        self.validate()?;

        let MarchParams {
            x_samples,
            y_samples,
            threshold,
            mode,
        } = self.params;

        let xs = axis_coords(self.bb.left, self.bb.right, x_samples);
        let ys = axis_coords(self.bb.bottom, self.bb.top, y_samples);

        let mut below = Vec::with_capacity(x_samples);
        for &x in &xs {
            below.push(sample(Point2::new(x, ys[0]))?);
        }
        let mut above = vec![0.0; x_samples];

        let mut segments = 0;
        for row in ys.windows(2) {
            let (y0, y1) = (row[0], row[1]);
            for (value, &x) in above.iter_mut().zip(&xs) {
                *value = sample(Point2::new(x, y1))?;
            }

            for i in 0..x_samples - 1 {
                let cell = Cell {
                    x0: xs[i],
                    x1: xs[i + 1],
                    y0,
                    y1,
                    a: below[i],
                    b: below[i + 1],
                    c: above[i],
                    d: above[i + 1],
                };
                segments += cell.march(threshold, mode, &mut emit)?;
            }

            std::mem::swap(&mut below, &mut above);
        }

        debug!(
            x_samples,
            y_samples,
            threshold,
            ?mode,
            segments,
            "traced contour"
        );
        Ok(segments)
    }
}

/// Evenly spaced coordinates from `lo` to `hi` inclusive.
#[allow(clippy::cast_precision_loss)]
fn axis_coords(lo: f64, hi: f64, samples: usize) -> Vec<f64> {
    let denom = 1.0 / (samples - 1) as f64;
    (0..samples).map(|i| lerp(lo, hi, i as f64 * denom)).collect()
}

/// Traces an anti-aliased contour of `sample_fn` along `threshold`.
///
/// `segment_fn` is called for each boundary segment found.
///
/// # Errors
///
/// See [`MarchSquares::execute`].
pub fn march_soft<F, S>(
    bb: BoundingBox,
    x_samples: usize,
    y_samples: usize,
    threshold: f64,
    segment_fn: F,
    sample_fn: S,
) -> Result<usize>
where
    F: FnMut(Point2, Point2),
    S: FnMut(Point2) -> f64,
{
    let params = MarchParams {
        x_samples,
        y_samples,
        threshold,
        mode: MarchMode::Soft,
    };
    MarchSquares::new(bb, params).execute(sample_fn, segment_fn)
}

/// Traces an aliased (pixel staircase) contour of `sample_fn` along `threshold`.
///
/// # Errors
///
/// See [`MarchSquares::execute`].
pub fn march_hard<F, S>(
    bb: BoundingBox,
    x_samples: usize,
    y_samples: usize,
    threshold: f64,
    segment_fn: F,
    sample_fn: S,
) -> Result<usize>
where
    F: FnMut(Point2, Point2),
    S: FnMut(Point2) -> f64,
{
    let params = MarchParams {
        x_samples,
        y_samples,
        threshold,
        mode: MarchMode::Hard,
    };
    MarchSquares::new(bb, params).execute(sample_fn, segment_fn)
}
