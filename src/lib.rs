//! Vector geometry extraction from sampled scalar fields.
//!
//! Contours are traced with marching squares, assembled into polylines by a
//! [`PolylineSet`], then simplified, wrapped in convex hulls or split into
//! convex pieces.

pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;

pub use error::{AutogeomError, GeometryError, ParameterError, Result, SetError};
pub use geometry::{is_closed, BoundingBox, Polyline};
pub use math::Point2;
pub use operations::{
    convex_decomposition, convex_hull, march_hard, march_soft, simplify_curves, simplify_vertices,
    ConvexDecomposition, ConvexHull2D, MarchMode, MarchParams, MarchSquares, PolylineId,
    PolylineSet, SimplifyCurves, SimplifyVertices,
};
