//! Axis-aligned bounding boxes in subpixel units.

use crate::fixed::{Subpixel, Vector};

/// An axis-aligned box in 26.6 units.
///
/// A box whose minimum exceeds its maximum on either axis is degenerate;
/// aggregations collapse such boxes to [`BBox::ZERO`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BBox {
    pub x_min: Subpixel,
    pub y_min: Subpixel,
    pub x_max: Subpixel,
    pub y_max: Subpixel,
}

impl BBox {
    /// The zero box.
    pub const ZERO: Self = Self::from_raw(0, 0, 0, 0);

    /// Starting value for min/max aggregation.
    ///
    /// The sentinels lie outside any real glyph extent, so a box that is
    /// never expanded stays inverted and can be detected afterwards.
    pub const EMPTY: Self = Self::from_raw(32000, 32000, -32000, -32000);

    #[inline]
    pub const fn new(x_min: Subpixel, y_min: Subpixel, x_max: Subpixel, y_max: Subpixel) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Create a box from raw 26.6 coordinates.
    #[inline]
    pub const fn from_raw(x_min: i32, y_min: i32, x_max: i32, y_max: i32) -> Self {
        Self::new(
            Subpixel::new(x_min),
            Subpixel::new(y_min),
            Subpixel::new(x_max),
            Subpixel::new(y_max),
        )
    }

    /// Grow this box to contain `other`, componentwise.
    #[inline]
    pub fn expand(&mut self, other: &BBox) {
        self.x_min = self.x_min.min(other.x_min);
        self.y_min = self.y_min.min(other.y_min);
        self.x_max = self.x_max.max(other.x_max);
        self.y_max = self.y_max.max(other.y_max);
    }

    /// Grow this box to contain a point.
    #[inline]
    pub fn include(&mut self, point: Vector) {
        self.x_min = self.x_min.min(point.x);
        self.y_min = self.y_min.min(point.y);
        self.x_max = self.x_max.max(point.x);
        self.y_max = self.y_max.max(point.y);
    }

    /// Check if the minimum exceeds the maximum on either axis.
    #[inline]
    pub fn is_inverted(&self) -> bool {
        self.x_min > self.x_max || self.y_min > self.y_max
    }

    /// This box, or [`BBox::ZERO`] if it is inverted.
    #[inline]
    pub fn or_zero(self) -> Self {
        if self.is_inverted() { Self::ZERO } else { self }
    }

    #[inline]
    pub fn width(&self) -> Subpixel {
        self.x_max - self.x_min
    }

    #[inline]
    pub fn height(&self) -> Subpixel {
        self.y_max - self.y_min
    }
}
