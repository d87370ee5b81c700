//! The glyph provider seam.
//!
//! A [`GlyphProvider`] is the only boundary between the rendering core and a
//! concrete font backend. It resolves characters, reports kerning, loads
//! scaled outlines with their metrics, transforms outlines and rasterizes
//! them. Rasterization takes the outline by value: once a glyph has been
//! turned into a bitmap its outline is gone.

use std::fmt;

use crate::bbox::BBox;
use crate::bitmap::Bitmap;
use crate::error::{GlyphLoadError, RasterizeError, ResourceError};
use crate::fixed::{Matrix, Subpixel, Vector};
use crate::outline::Outline;

/// A glyph index within a face. Index 0 is the undefined glyph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GlyphId(pub u32);

impl GlyphId {
    /// The undefined (`.notdef`) glyph.
    pub const UNDEFINED: Self = Self(0);

    /// Check if this is the undefined glyph.
    #[inline]
    pub fn is_undefined(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for GlyphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A snapshot of a glyph's metrics at load time, in subpixel units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlyphMetrics {
    pub width: Subpixel,
    pub height: Subpixel,
    pub hori_bearing_x: Subpixel,
    pub hori_bearing_y: Subpixel,
    pub hori_advance: Subpixel,
    pub vert_bearing_x: Subpixel,
    pub vert_bearing_y: Subpixel,
    pub vert_advance: Subpixel,
    /// Control box of the untransformed outline.
    pub bbox: BBox,
}

impl GlyphMetrics {
    /// Derive metrics from an outline's control box and its advances.
    ///
    /// Vertical bearings are synthesized: the glyph is centered horizontally
    /// on the vertical pen and centered within the vertical advance.
    pub fn from_control_box(bbox: BBox, hori_advance: Subpixel, vert_advance: Subpixel) -> Self {
        let width = bbox.width();
        let height = bbox.height();
        Self {
            width,
            height,
            hori_bearing_x: bbox.x_min,
            hori_bearing_y: bbox.y_max,
            hori_advance,
            vert_bearing_x: bbox.x_min - Subpixel::new(hori_advance.raw() / 2),
            vert_bearing_y: Subpixel::new((vert_advance - height).raw() / 2),
            vert_advance,
            bbox,
        }
    }
}

/// An outline together with the metrics it was loaded with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedGlyph {
    pub outline: Outline,
    pub metrics: GlyphMetrics,
}

/// Character resolution, outline loading and rasterization for one face.
pub trait GlyphProvider {
    /// Map a character code to a glyph. Unmapped codes give [`GlyphId::UNDEFINED`].
    fn resolve_char(&self, code: u32) -> GlyphId;

    /// Check if the face carries pair kerning data.
    fn has_kerning(&self) -> bool {
        false
    }

    /// Pen adjustment between two adjacent glyphs.
    fn kerning(&self, _left: GlyphId, _right: GlyphId) -> Vector {
        Vector::ZERO
    }

    /// Change the active character size. Affects outlines loaded afterwards.
    fn set_char_size(&mut self, point_size: f64, dpi: f64) -> Result<(), ResourceError>;

    /// Load a glyph's outline scaled to the active size.
    fn load_outline(&self, glyph: GlyphId) -> Result<LoadedGlyph, GlyphLoadError>;

    /// Apply `matrix` (about the origin) and then `delta` to an outline in place.
    fn transform(&self, outline: &mut Outline, matrix: Option<&Matrix>, delta: Option<Vector>) {
        if let Some(matrix) = matrix {
            outline.transform(matrix);
        }
        if let Some(delta) = delta {
            outline.translate(delta);
        }
    }

    /// Convert an outline into a coverage bitmap, consuming it.
    fn rasterize(&self, outline: Outline) -> Result<Bitmap, RasterizeError>;
}
