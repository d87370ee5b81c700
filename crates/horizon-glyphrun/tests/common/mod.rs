//! Shared fixtures for the integration tests.
//!
//! [`BlockProvider`] is a glyph backend with no font file behind it: every
//! printable ASCII character is a solid rectangle, which keeps expected
//! pixel positions easy to compute by hand.
//!
//! At the default 12pt / 72 dpi size a block glyph is:
//!
//! - control box `(64, 0)-(576, 640)`: pixels 1..9 across, 0..10 up
//! - horizontal advance 640 (10 px)
//!
//! The space is an empty outline with the same advance. `~` does not exist
//! in the face and fails to load. `#` loads a glyph too wide to rasterize.

#![allow(dead_code)]

use std::collections::HashMap;

use horizon_glyphrun::{
    BBox, Bitmap, GlyphId, GlyphLoadError, GlyphMetrics, GlyphProvider, LoadedGlyph, Outline,
    RasterizeError, ResourceError, Subpixel, Vector,
};

pub const ADVANCE: i32 = 640;
pub const BLOCK: BBox = BBox::from_raw(64, 0, 576, 640);
pub const WIDE_BLOCK: BBox = BBox::from_raw(0, 0, 2000 * 64, 640);
pub const MAX_BITMAP_PIXELS: i32 = 1024;

const MISSING: GlyphId = GlyphId(9999);
const BASE_PPEM: f64 = 12.0;

/// Install a test-writer subscriber once so log output lands with the test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

#[derive(Debug, Clone)]
pub struct BlockProvider {
    ppem: f64,
    kerning: HashMap<(u32, u32), i32>,
    reject_sizes: bool,
}

impl BlockProvider {
    pub fn new() -> Self {
        Self {
            ppem: BASE_PPEM,
            kerning: HashMap::new(),
            reject_sizes: false,
        }
    }

    /// Add a kerning adjustment, in subpixels at the default size.
    pub fn with_kerning(mut self, left: char, right: char, adjust: i32) -> Self {
        self.kerning.insert((left as u32, right as u32), adjust);
        self
    }

    /// Fail every `set_char_size` call.
    pub fn rejecting_sizes(mut self) -> Self {
        self.reject_sizes = true;
        self
    }

    pub fn ppem(&self) -> f64 {
        self.ppem
    }

    fn scaled(&self, raw: i32) -> i32 {
        (f64::from(raw) * self.ppem / BASE_PPEM).round() as i32
    }

    fn scaled_box(&self, bbox: BBox) -> BBox {
        BBox::from_raw(
            self.scaled(bbox.x_min.raw()),
            self.scaled(bbox.y_min.raw()),
            self.scaled(bbox.x_max.raw()),
            self.scaled(bbox.y_max.raw()),
        )
    }
}

fn rectangle(bbox: BBox) -> Outline {
    let mut outline = Outline::new();
    outline.move_to(Vector::new(bbox.x_min, bbox.y_min));
    outline.line_to(Vector::new(bbox.x_max, bbox.y_min));
    outline.line_to(Vector::new(bbox.x_max, bbox.y_max));
    outline.line_to(Vector::new(bbox.x_min, bbox.y_max));
    outline.close();
    outline
}

impl GlyphProvider for BlockProvider {
    fn resolve_char(&self, code: u32) -> GlyphId {
        match code {
            0x7e => MISSING,
            0x20..=0x7d => GlyphId(code),
            _ => GlyphId::UNDEFINED,
        }
    }

    fn has_kerning(&self) -> bool {
        !self.kerning.is_empty()
    }

    fn kerning(&self, left: GlyphId, right: GlyphId) -> Vector {
        let adjust = self.kerning.get(&(left.0, right.0)).copied().unwrap_or(0);
        Vector::from_raw(self.scaled(adjust), 0)
    }

    fn set_char_size(&mut self, point_size: f64, dpi: f64) -> Result<(), ResourceError> {
        let valid = point_size.is_finite() && point_size > 0.0 && dpi.is_finite() && dpi > 0.0;
        if self.reject_sizes || !valid {
            return Err(ResourceError::InvalidSize { point_size, dpi });
        }
        self.ppem = point_size * dpi / 72.0;
        Ok(())
    }

    fn load_outline(&self, glyph: GlyphId) -> Result<LoadedGlyph, GlyphLoadError> {
        if glyph == MISSING {
            return Err(GlyphLoadError::NotFound(glyph));
        }

        let advance = Subpixel::new(self.scaled(ADVANCE));
        let outline = match glyph.0 {
            0x20 => Outline::new(),
            0x23 => rectangle(self.scaled_box(WIDE_BLOCK)),
            _ => rectangle(self.scaled_box(BLOCK)),
        };
        let metrics = GlyphMetrics::from_control_box(outline.control_box(), advance, advance);
        Ok(LoadedGlyph { outline, metrics })
    }

    fn rasterize(&self, outline: Outline) -> Result<Bitmap, RasterizeError> {
        if outline.is_empty() {
            return Ok(Bitmap::empty(0, 0));
        }
        let bbox = outline.control_box();
        let left = bbox.x_min.floor_pixels();
        let right = bbox.x_max.ceil_pixels();
        let bottom = bbox.y_min.floor_pixels();
        let top = bbox.y_max.ceil_pixels();

        let width = (right - left) as u32;
        let height = (top - bottom) as u32;
        if right - left > MAX_BITMAP_PIXELS || top - bottom > MAX_BITMAP_PIXELS {
            return Err(RasterizeError::TooLarge { width, height });
        }

        Ok(Bitmap {
            buffer: vec![255; (width * height) as usize],
            width,
            height,
            left,
            top,
        })
    }
}
