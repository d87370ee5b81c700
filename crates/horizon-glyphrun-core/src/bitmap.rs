//! Rasterized glyph coverage.

/// An 8-bit coverage bitmap produced by rasterizing an outline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bitmap {
    /// Coverage data, row-major, one byte per pixel.
    pub buffer: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels (number of rows).
    pub height: u32,
    /// Pixels from the outline origin to the left edge of the bitmap.
    pub left: i32,
    /// Pixels from the outline origin up to the top row of the bitmap.
    pub top: i32,
}

impl Bitmap {
    /// A bitmap with no pixels, positioned at `(left, top)`.
    pub fn empty(left: i32, top: i32) -> Self {
        Self {
            buffer: Vec::new(),
            width: 0,
            height: 0,
            left,
            top,
        }
    }

    /// Check if this bitmap has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}
