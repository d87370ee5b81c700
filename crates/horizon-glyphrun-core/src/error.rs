//! Error types reported by glyph providers.

use std::path::PathBuf;

use thiserror::Error;

use crate::provider::GlyphId;

/// The font resource cannot be used.
///
/// Fatal to session construction and size changes.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// The font file could not be read.
    #[error("could not open font file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The font data is not a parseable font.
    #[error("could not parse font data: {0}")]
    Parse(String),

    /// The font parsed but lacks something rendering requires.
    #[error("unsupported font: {0}")]
    Unsupported(String),

    /// The requested character size cannot be applied.
    #[error("could not set the font size to {point_size}pt at {dpi} dpi")]
    InvalidSize { point_size: f64, dpi: f64 },

    /// A character could not be loaded into the glyph store.
    #[error("could not load character code {code:#x}: {source}")]
    CharLoad {
        code: u32,
        #[source]
        source: GlyphLoadError,
    },
}

/// A single glyph's outline cannot be loaded.
///
/// Layout treats this as non-fatal and skips the character.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GlyphLoadError {
    /// The glyph id is outside the face's glyph range.
    #[error("glyph {0} is not present in the face")]
    NotFound(GlyphId),

    /// The glyph data exists but could not be decoded.
    #[error("glyph {0} has malformed outline data")]
    Malformed(GlyphId),
}

/// An outline cannot be converted to a bitmap.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RasterizeError {
    /// The bitmap would exceed the rasterizer's size limits.
    #[error("glyph bitmap of {width}x{height} pixels is too large")]
    TooLarge { width: u32, height: u32 },

    /// The rasterizer could not allocate its coverage buffer.
    #[error("could not allocate a {width}x{height} coverage buffer")]
    Allocation { width: u32, height: u32 },
}
