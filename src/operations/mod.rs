mod decompose;
mod hull;
mod march;
mod polyline_set;
mod simplify;

pub use decompose::{convex_decomposition, ConvexDecomposition};
pub use hull::{convex_hull, ConvexHull2D};
pub use march::{march_hard, march_soft, MarchMode, MarchParams, MarchSquares};
pub use polyline_set::{PolylineId, PolylineSet};
pub use simplify::{simplify_curves, simplify_vertices, SimplifyCurves, SimplifyVertices};
