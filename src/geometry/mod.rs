pub mod bbox;
pub mod polyline;

pub use bbox::BoundingBox;
pub use polyline::{is_closed, Polyline};
