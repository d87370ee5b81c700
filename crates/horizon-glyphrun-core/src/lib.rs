//! Core types for Horizon Glyphrun.
//!
//! This crate holds the pieces of the glyph renderer that do not depend on a
//! font backend:
//!
//! - [`Subpixel`], [`Fixed`], [`Vector`] and [`Matrix`]: 26.6 and 16.16
//!   fixed-point geometry
//! - [`BBox`]: subpixel bounding boxes
//! - [`Outline`]: vector glyph shapes that can be translated and rotated
//! - [`Bitmap`]: rasterized coverage
//! - [`GlyphProvider`]: the seam a concrete font backend implements
//!
//! # Example
//!
//! ```
//! use horizon_glyphrun_core::{BBox, Matrix, Outline, Vector};
//!
//! let mut outline = Outline::new();
//! outline.move_to(Vector::from_raw(0, 0));
//! outline.line_to(Vector::from_raw(640, 0));
//! outline.line_to(Vector::from_raw(640, 640));
//! outline.close();
//!
//! outline.translate(Vector::from_raw(64, 0));
//! outline.transform(&Matrix::IDENTITY);
//! assert_eq!(outline.control_box(), BBox::from_raw(64, 0, 704, 640));
//! ```

mod bbox;
mod bitmap;
mod error;
mod fixed;
pub mod logging;
mod outline;
mod provider;

pub use bbox::BBox;
pub use bitmap::Bitmap;
pub use error::{GlyphLoadError, RasterizeError, ResourceError};
pub use fixed::{Fixed, Matrix, SUBPIXELS_PER_PIXEL, Subpixel, Vector};
pub use outline::{Outline, PathSegment};
pub use provider::{GlyphId, GlyphMetrics, GlyphProvider, LoadedGlyph};
