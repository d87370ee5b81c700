//! A font-rendering session.
//!
//! A [`FontSession`] owns everything needed to turn text into pixels for one
//! face: the glyph provider, the glyph store, the current string layout and
//! the canvas. It is single-threaded and synchronous; share it across
//! threads only behind external synchronization.
//!
//! There are two ways to draw:
//!
//! - Automatic: [`set_text`](FontSession::set_text) followed by
//!   [`draw_glyphs_to_bitmap`](FontSession::draw_glyphs_to_bitmap), which
//!   sizes the canvas to fit the string.
//! - Manual: [`set_bitmap_size`](FontSession::set_bitmap_size),
//!   [`load_char`](FontSession::load_char) and
//!   [`draw_glyph_to_bitmap`](FontSession::draw_glyph_to_bitmap) at pixel
//!   positions of your choosing.
//!
//! Either way a glyph's outline is consumed when it is rasterized, so each
//! glyph can be drawn once.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use horizon_glyphrun_core::logging::targets;
use horizon_glyphrun_core::{BBox, GlyphProvider, Subpixel};

use crate::canvas::{Canvas, CanvasData};
use crate::error::{GlyphRunResult, RangeError, StateError};
use crate::layout::{LayoutEngine, PositionedGlyph, StringLayout};
use crate::library::LibraryState;
use crate::store::{Glyph, GlyphStore};
use crate::ttf::{FaceMetrics, TtfProvider};

/// Pixels of margin added to each canvas dimension around a drawn string.
const STRING_MARGIN: i32 = 2;

/// A font-rendering session over one glyph provider.
pub struct FontSession<P: GlyphProvider> {
    provider: P,
    store: GlyphStore,
    engine: LayoutEngine,
    canvas: Canvas,
    library: Arc<LibraryState>,
}

impl<P: GlyphProvider> FontSession<P> {
    /// Create a session and apply the library's default character size.
    pub(crate) fn new(mut provider: P, library: Arc<LibraryState>) -> GlyphRunResult<Self> {
        let config = library.config();
        provider.set_char_size(config.default_point_size, config.default_dpi)?;

        library.session_opened();
        debug!(target: targets::SESSION, "opened font session");
        Ok(Self {
            provider,
            store: GlyphStore::new(),
            engine: LayoutEngine::new(),
            canvas: Canvas::new(),
            library,
        })
    }

    /// The glyph backend.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Change the character size for glyphs loaded from now on.
    ///
    /// Glyphs already in the store and the current layout keep the size they
    /// were loaded at. On failure the previous size stays active.
    pub fn set_size(&mut self, point_size: f64, dpi: f64) -> GlyphRunResult<()> {
        self.provider.set_char_size(point_size, dpi)?;
        Ok(())
    }

    /// Lay out `text` rotated by `angle_degrees`, replacing the current layout.
    pub fn set_text(&mut self, text: &str, angle_degrees: f64) {
        self.set_char_codes(text.chars().map(u32::from), angle_degrees);
    }

    /// Lay out raw character codes rotated by `angle_degrees`.
    pub fn set_char_codes<I>(&mut self, char_codes: I, angle_degrees: f64)
    where
        I: IntoIterator<Item = u32>,
    {
        self.engine.set_text(&self.provider, char_codes, angle_degrees);
    }

    /// The current layout.
    pub fn layout(&self) -> &StringLayout {
        self.engine.layout()
    }

    /// Number of glyphs in the current layout.
    pub fn layout_glyph_count(&self) -> usize {
        self.engine.layout().len()
    }

    /// A positioned glyph of the current layout.
    pub fn layout_glyph(&self, index: usize) -> Result<&PositionedGlyph, RangeError> {
        self.engine.layout().get(index)
    }

    /// Load a character into the glyph store.
    pub fn load_char(&mut self, char_code: u32) -> GlyphRunResult<Glyph> {
        Ok(self.store.load_char(&self.provider, char_code)?)
    }

    /// A glyph previously returned by [`load_char`](Self::load_char).
    pub fn glyph(&self, index: usize) -> Result<Glyph, RangeError> {
        self.store.get(index)
    }

    /// Number of glyphs in the store.
    pub fn glyph_count(&self) -> usize {
        self.store.count()
    }

    /// Extent of the current layout in subpixels.
    pub fn string_bbox(&self) -> BBox {
        self.engine.layout().bbox()
    }

    /// Width and height of the current layout in subpixels, rotation included.
    /// Divide by 64 for pixels.
    pub fn width_height(&self) -> (Subpixel, Subpixel) {
        let bbox = self.string_bbox();
        (bbox.width(), bbox.height())
    }

    /// Replace the canvas with a zero-filled `width * height` buffer.
    pub fn set_bitmap_size(&mut self, width: u32, height: u32) {
        self.canvas.set_size(width, height);
    }

    /// Reset for a new render: free the canvas, the layout and the store.
    pub fn clear(&mut self) {
        self.canvas.clear();
        self.engine.clear();
        self.store.clear();
        debug!(target: targets::SESSION, "cleared session");
    }

    /// Draw the current layout, sizing the canvas to fit it.
    ///
    /// The canvas becomes `ceil(width / 64) + 2` by `ceil(height / 64) + 2`
    /// pixels for the string's bounding box. Each glyph is rasterized and
    /// ORed in; a glyph that fails to rasterize is logged and left out.
    ///
    /// # Errors
    ///
    /// [`StateError::LayoutRasterized`] if the layout was already drawn. The
    /// canvas is left untouched in that case.
    pub fn draw_glyphs_to_bitmap(&mut self) -> GlyphRunResult<()> {
        let layout = self.engine.layout();
        if layout.any_rasterized() {
            return Err(StateError::LayoutRasterized.into());
        }

        let bbox = layout.bbox();
        let width = bbox.width().ceil_pixels() + STRING_MARGIN;
        let height = bbox.height().ceil_pixels() + STRING_MARGIN;
        let origin_x = bbox.x_min.floor_pixels();
        // Rotated text anchors at the top edge of its box.
        let origin_y = if layout.angle() == 0.0 {
            -height
        } else {
            (-bbox.y_max).floor_pixels()
        };

        self.canvas.set_size(width as u32, height as u32);
        self.canvas.set_origin(origin_x, origin_y);

        let outlines = self.engine.layout_mut().take_outlines()?;
        for (char_code, outline) in outlines {
            let bitmap = match self.provider.rasterize(outline) {
                Ok(bitmap) => bitmap,
                Err(err) => {
                    warn!(
                        target: targets::CANVAS,
                        char_code,
                        error = %err,
                        "could not rasterize glyph, skipping"
                    );
                    continue;
                }
            };
            let x = bitmap.left - bbox.x_min.trunc_pixels();
            let y = bbox.y_max.trunc_pixels() - bitmap.top + 1;
            self.canvas.draw_bitmap(&bitmap, x, y);
        }
        Ok(())
    }

    /// Rasterize a stored glyph and composite it with its bitmap's top-left
    /// corner at pixel `(x, y)`.
    ///
    /// # Errors
    ///
    /// - [`StateError::CanvasNotSized`] before [`set_bitmap_size`](Self::set_bitmap_size)
    /// - [`RangeError::GlyphIndex`] if `index` is not in the store
    /// - [`StateError::GlyphRasterized`] if the glyph was already drawn
    pub fn draw_glyph_to_bitmap(&mut self, x: i32, y: i32, index: usize) -> GlyphRunResult<()> {
        if self.canvas.is_empty() {
            return Err(StateError::CanvasNotSized.into());
        }
        let outline = self.store.take_outline(index)?;
        let bitmap = self.provider.rasterize(outline)?;
        self.canvas.draw_bitmap(&bitmap, x, y);
        Ok(())
    }

    /// Draw a one-pixel rectangle border. See [`Canvas::draw_rect`].
    pub fn draw_rect(&mut self, x0: i64, y0: i64, x1: i64, y1: i64) -> GlyphRunResult<()> {
        self.canvas.draw_rect(x0, y0, x1, y1)?;
        Ok(())
    }

    /// The canvas.
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Width, height and a copy of the canvas bytes.
    pub fn serialize(&self) -> CanvasData {
        self.canvas.serialize()
    }

    /// Write the raw canvas bytes to a file, row-major, with no header.
    pub fn write_bitmap(&self, path: impl AsRef<Path>) -> GlyphRunResult<()> {
        self.canvas.write_raw(path)
    }

    /// Encode the canvas as a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> GlyphRunResult<()> {
        self.canvas.save_png(path)
    }
}

impl FontSession<TtfProvider> {
    /// Face-wide metrics of the open font.
    pub fn face_metrics(&self) -> Option<FaceMetrics> {
        self.provider.face_metrics()
    }
}

impl<P: GlyphProvider> Drop for FontSession<P> {
    fn drop(&mut self) {
        self.library.session_closed();
        debug!(target: targets::SESSION, "closed font session");
    }
}

impl<P: GlyphProvider> std::fmt::Debug for FontSession<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontSession")
            .field("stored_glyphs", &self.store.count())
            .field("layout_glyphs", &self.engine.layout().len())
            .field("canvas", &(self.canvas.width(), self.canvas.height()))
            .finish()
    }
}
