//! The 8-bit grayscale pixel buffer glyphs are composited into.
//!
//! Compositing is a bitwise OR of source coverage into the destination:
//! drawing the same bitmap twice at the same place leaves the buffer
//! unchanged, and overlapping glyphs never saturate additively. Pixels that
//! fall outside the canvas are dropped silently.
//!
//! # Example
//!
//! ```
//! use horizon_glyphrun::Canvas;
//!
//! let mut canvas = Canvas::new();
//! canvas.set_size(8, 4);
//! canvas.draw_rect(0, 0, 7, 3).unwrap();
//!
//! assert_eq!(canvas.pixel(3, 0), Some(255));
//! assert_eq!(canvas.pixel(3, 1), Some(0));
//! assert_eq!(canvas.as_bytes().len(), 8 * 4);
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::{GrayImage, ImageFormat, Luma};
use tracing::debug;

use horizon_glyphrun_core::Bitmap;
use horizon_glyphrun_core::logging::targets;

use crate::error::{GlyphRunResult, RangeError};

/// A snapshot of the canvas: dimensions and raw row-major bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanvasData {
    pub width: u32,
    pub height: u32,
    pub bytes: Vec<u8>,
}

/// A row-major 8-bit grayscale buffer of exactly `width * height` bytes.
#[derive(Debug, Default, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    origin_x: i32,
    origin_y: i32,
    buffer: Vec<u8>,
}

impl Canvas {
    /// Create a canvas with no pixels.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the buffer with a zero-filled `width * height` one.
    pub fn set_size(&mut self, width: u32, height: u32) {
        // Release the old buffer before allocating its replacement.
        self.buffer = Vec::new();
        self.buffer = vec![0; width as usize * height as usize];
        self.width = width;
        self.height = height;
        debug!(target: targets::CANVAS, width, height, "allocated canvas");
    }

    /// Release the buffer and reset size and origin to zero.
    pub fn clear(&mut self) {
        self.buffer = Vec::new();
        self.width = 0;
        self.height = 0;
        self.origin_x = 0;
        self.origin_y = 0;
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Check if the canvas has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Pixel offset of the canvas relative to the string origin, as computed
    /// by the last automatic layout draw.
    pub fn origin(&self) -> (i32, i32) {
        (self.origin_x, self.origin_y)
    }

    pub(crate) fn set_origin(&mut self, x: i32, y: i32) {
        self.origin_x = x;
        self.origin_y = y;
    }

    /// The raw buffer, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// The value at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.buffer
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// OR a coverage bitmap into the canvas with its top-left corner at
    /// `(x, y)`, clipping at the canvas edges.
    pub fn draw_bitmap(&mut self, bitmap: &Bitmap, x: i32, y: i32) {
        if bitmap.is_empty() {
            return;
        }
        let width = i64::from(self.width);
        let height = i64::from(self.height);
        let src_width = bitmap.width as usize;

        for row in 0..bitmap.height as usize {
            let dst_y = i64::from(y) + row as i64;
            if dst_y < 0 || dst_y >= height {
                continue;
            }
            for col in 0..src_width {
                let dst_x = i64::from(x) + col as i64;
                if dst_x < 0 || dst_x >= width {
                    continue;
                }
                let Some(&src) = bitmap.buffer.get(row * src_width + col) else {
                    continue;
                };
                self.buffer[(dst_x + dst_y * width) as usize] |= src;
            }
        }
    }

    /// Draw a one-pixel rectangle border at full intensity.
    ///
    /// All four coordinates must lie within `[0, width]` and `[0, height]`.
    /// The edges are walked half-open: the top and bottom rows cover
    /// `x0..x1`, the left and right columns cover `y0..y1`, so the corner
    /// `(x1, y1)` itself is not set. Because the bounds are inclusive, an
    /// edge at `x1 == width` addresses the first pixel of the following row;
    /// writes past the end of the buffer are dropped.
    pub fn draw_rect(&mut self, x0: i64, y0: i64, x1: i64, y1: i64) -> Result<(), RangeError> {
        let width = i64::from(self.width);
        let height = i64::from(self.height);
        let in_x = |v: i64| (0..=width).contains(&v);
        let in_y = |v: i64| (0..=height).contains(&v);
        if !(in_x(x0) && in_x(x1) && in_y(y0) && in_y(y1)) {
            return Err(RangeError::RectOutsideCanvas {
                x0,
                y0,
                x1,
                y1,
                width: self.width,
                height: self.height,
            });
        }

        for i in x0..x1 {
            self.set_linear(i + y0 * width);
            self.set_linear(i + y1 * width);
        }
        for j in y0..y1 {
            self.set_linear(x0 + j * width);
            self.set_linear(x1 + j * width);
        }
        Ok(())
    }

    fn set_linear(&mut self, index: i64) {
        if let Some(pixel) = usize::try_from(index)
            .ok()
            .and_then(|index| self.buffer.get_mut(index))
        {
            *pixel = 255;
        }
    }

    /// Copy out the dimensions and buffer.
    pub fn serialize(&self) -> CanvasData {
        CanvasData {
            width: self.width,
            height: self.height,
            bytes: self.buffer.clone(),
        }
    }

    /// Write the raw buffer, row-major, with no header.
    pub fn write_to<W: Write>(&self, mut writer: W) -> GlyphRunResult<()> {
        writer.write_all(&self.buffer)?;
        writer.flush()?;
        Ok(())
    }

    /// Write the raw buffer to a file. Width and height are not recorded.
    pub fn write_raw(&self, path: impl AsRef<Path>) -> GlyphRunResult<()> {
        let file = File::create(path.as_ref())?;
        self.write_to(BufWriter::new(file))
    }

    /// Convert to a grayscale image.
    pub fn to_gray_image(&self) -> GrayImage {
        let width = self.width as usize;
        GrayImage::from_fn(self.width, self.height, |x, y| {
            Luma([self.buffer[y as usize * width + x as usize]])
        })
    }

    /// Encode the canvas as a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> GlyphRunResult<()> {
        self.to_gray_image()
            .save_with_format(path.as_ref(), ImageFormat::Png)?;
        Ok(())
    }
}
