use thiserror::Error;

/// Top-level error type for the autogeom crate.
#[derive(Debug, Error)]
pub enum AutogeomError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Parameter(#[from] ParameterError),

    #[error(transparent)]
    Set(#[from] SetError),
}

/// Errors raised when input geometry is too degenerate to process.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate bounding box: ({left}, {bottom}, {right}, {top})")]
    DegenerateBoundingBox {
        left: f64,
        bottom: f64,
        right: f64,
        top: f64,
    },

    #[error("at least {required} distinct points required, found {found}")]
    TooFewPoints { required: usize, found: usize },

    #[error("polygon is empty")]
    EmptyPolygon,

    #[error("polygon is not closed")]
    OpenPolygon,

    #[error("all points are collinear")]
    Collinear,
}

/// Errors raised for out-of-range operation parameters.
#[derive(Debug, Error)]
pub enum ParameterError {
    #[error("{axis} sample count must be at least 2, got {value}")]
    TooFewSamples { axis: &'static str, value: usize },

    #[error("tolerance must be finite and non-negative, got {0}")]
    InvalidTolerance(f64),

    #[error("threshold must be finite, got {0}")]
    InvalidThreshold(f64),
}

/// Errors raised when reading from a polyline set.
#[derive(Debug, Error)]
pub enum SetError {
    #[error("polyline index {index} out of bounds for set of {len}")]
    OutOfBounds { index: usize, len: usize },
}

/// Convenience type alias for results using [`AutogeomError`].
pub type Result<T> = std::result::Result<T, AutogeomError>;

/// Checks that a simplification/hull tolerance is usable.
///
/// # Errors
///
/// Returns `ParameterError::InvalidTolerance` for negative, NaN or infinite values.
pub(crate) fn check_tolerance(tolerance: f64) -> Result<()> {
    if tolerance.is_finite() && tolerance >= 0.0 {
        Ok(())
    } else {
        Err(ParameterError::InvalidTolerance(tolerance).into())
    }
}
