//! Glyph-string rendering for Horizon Glyphrun.
//!
//! This crate lays out a single line of text from a font face, optionally
//! rotates it, and rasterizes it into an 8-bit grayscale pixel buffer.
//!
//! # Getting Started
//!
//! Initialize a [`FontLibrary`] once, then open a [`FontSession`] per face:
//!
//! ```no_run
//! use horizon_glyphrun::{FontLibrary, LibraryConfig};
//!
//! let library = FontLibrary::init(LibraryConfig::default())?;
//! let mut session = library.open_face("/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf")?;
//!
//! session.set_size(24.0, 96.0)?;
//! session.set_text("Hello, world", 30.0);
//! session.draw_glyphs_to_bitmap()?;
//!
//! let data = session.serialize();
//! println!("{}x{} pixels", data.width, data.height);
//! session.save_png("hello.png")?;
//! # Ok::<(), horizon_glyphrun::GlyphRunError>(())
//! ```
//!
//! # Manual Placement
//!
//! Glyphs can also be loaded one at a time and drawn at explicit pixel
//! positions on a canvas of your choosing:
//!
//! ```no_run
//! use horizon_glyphrun::{FontLibrary, LibraryConfig};
//!
//! # fn example(library: &FontLibrary) -> horizon_glyphrun::GlyphRunResult<()> {
//! let mut session = library.open_face("DejaVuSans.ttf")?;
//! session.set_bitmap_size(64, 32);
//!
//! let glyph = session.load_char('A' as u32)?;
//! session.draw_glyph_to_bitmap(4, 4, glyph.index)?;
//! session.draw_rect(0, 0, 63, 31)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Font Backends
//!
//! [`TtfProvider`] reads TrueType and OpenType faces. Any other backend can
//! be plugged in by implementing [`GlyphProvider`] and opening a session with
//! [`FontLibrary::open_with_provider`].
//!
//! # Units
//!
//! Layout geometry is in 26.6 fixed-point [`Subpixel`] units (64 per pixel)
//! with y pointing up. Canvas coordinates are whole pixels with y pointing
//! down.

mod bbox;
mod canvas;
mod config;
mod error;
mod layout;
mod library;
mod session;
mod store;
mod ttf;

pub use bbox::string_bbox;
pub use canvas::{Canvas, CanvasData};
pub use config::LibraryConfig;
pub use error::{GlyphRunError, GlyphRunResult, RangeError, StateError};
pub use layout::{LayoutEngine, PositionedGlyph, StringLayout};
pub use library::FontLibrary;
pub use session::FontSession;
pub use store::{Glyph, GlyphStore};
pub use ttf::{FaceMetrics, TtfProvider};

// Re-export core types for convenience
pub use horizon_glyphrun_core::{
    BBox, Bitmap, Fixed, GlyphId, GlyphLoadError, GlyphMetrics, GlyphProvider, LoadedGlyph,
    Matrix, Outline, PathSegment, RasterizeError, ResourceError, SUBPIXELS_PER_PIXEL, Subpixel,
    Vector, logging,
};
