use crate::error::{GeometryError, Result};

/// An axis-aligned rectangle given by its `left`, `bottom`, `right` and
/// `top` coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
    pub top: f64,
}

impl BoundingBox {
    /// Creates a bounding box, checking `left <= right` and `bottom <= top`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::DegenerateBoundingBox` if the sides are
    /// inverted or any coordinate is not finite.
    pub fn new(left: f64, bottom: f64, right: f64, top: f64) -> Result<Self> {
        let bb = Self {
            left,
            bottom,
            right,
            top,
        };
        let finite = [left, bottom, right, top].iter().all(|v| v.is_finite());
        if !finite || left > right || bottom > top {
            return Err(bb.degenerate_error());
        }
        Ok(bb)
    }

    /// Horizontal extent.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Vertical extent.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    /// `true` unless the box has a positive, finite width and height.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        let (w, h) = (self.width(), self.height());
        !(w > 0.0 && h > 0.0 && w.is_finite() && h.is_finite())
    }

    pub(crate) fn degenerate_error(&self) -> crate::error::AutogeomError {
        GeometryError::DegenerateBoundingBox {
            left: self.left,
            bottom: self.bottom,
            right: self.right,
            top: self.top,
        }
        .into()
    }
}
