//! Error types for the glyph renderer.

use thiserror::Error;

use horizon_glyphrun_core::{RasterizeError, ResourceError};

/// An operation needs setup that has not happened yet.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// The canvas has zero width or height.
    #[error("the canvas has no size; call set_bitmap_size first")]
    CanvasNotSized,

    /// A stored glyph's outline was already consumed by rasterization.
    #[error("glyph {index} has already been rasterized")]
    GlyphRasterized { index: usize },

    /// The current layout's outlines were already consumed by rasterization.
    #[error("the current string has already been drawn; call set_text again")]
    LayoutRasterized,
}

/// An index or coordinate argument is out of bounds.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    /// Glyph store index past the end.
    #[error("glyph index {index} is out of range (have {count})")]
    GlyphIndex { index: usize, count: usize },

    /// Positioned glyph index past the end of the current layout.
    #[error("layout glyph index {index} is out of range (have {count})")]
    LayoutIndex { index: usize, count: usize },

    /// Rectangle corner outside `[0, width] x [0, height]`.
    #[error("rect ({x0}, {y0})-({x1}, {y1}) lies outside the {width}x{height} canvas")]
    RectOutsideCanvas {
        x0: i64,
        y0: i64,
        x1: i64,
        y1: i64,
        width: u32,
        height: u32,
    },
}

/// Errors that can occur while rendering glyphs.
#[derive(Error, Debug)]
pub enum GlyphRunError {
    /// The font resource or character size cannot be used.
    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// A glyph outline could not be rasterized.
    #[error("could not convert glyph to bitmap: {0}")]
    Rasterize(#[from] RasterizeError),

    /// Required setup is missing.
    #[error(transparent)]
    State(#[from] StateError),

    /// An argument is out of bounds.
    #[error(transparent)]
    Range(#[from] RangeError),

    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding the canvas as an image failed.
    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    /// The configuration is malformed or holds invalid values.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result type for glyph rendering operations.
pub type GlyphRunResult<T> = Result<T, GlyphRunError>;
