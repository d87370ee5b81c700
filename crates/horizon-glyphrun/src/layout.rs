//! Single-line string layout.
//!
//! The [`LayoutEngine`] turns a sequence of character codes and a rotation
//! angle into a [`StringLayout`]: glyph outlines moved along a horizontal pen
//! path, adjusted by pair kerning, and then rotated as one rigid block about
//! the string's origin.
//!
//! Layout happens in two passes. The first pass translates each outline to
//! the pen position at which it was placed; the second pass applies the
//! rotation matrix to every outline. Because the rotation comes after all
//! translations, glyphs turn around the string anchor rather than around
//! their own centers.

use tracing::{debug, trace, warn};

use horizon_glyphrun_core::logging::targets;
use horizon_glyphrun_core::{BBox, GlyphId, GlyphMetrics, GlyphProvider, Matrix, Outline, Vector};

use crate::bbox::string_bbox;
use crate::error::{GlyphRunResult, RangeError, StateError};

/// One glyph of a laid-out string.
#[derive(Debug)]
pub struct PositionedGlyph {
    char_code: u32,
    id: GlyphId,
    metrics: GlyphMetrics,
    pen: Vector,
    bbox: BBox,
    outline: Option<Outline>,
}

impl PositionedGlyph {
    /// The character code this glyph was laid out for.
    pub fn char_code(&self) -> u32 {
        self.char_code
    }

    /// The face glyph the character resolved to.
    pub fn id(&self) -> GlyphId {
        self.id
    }

    /// Metrics of the untransformed glyph.
    pub fn metrics(&self) -> &GlyphMetrics {
        &self.metrics
    }

    /// Pen position at which the glyph was placed, before rotation.
    pub fn pen(&self) -> Vector {
        self.pen
    }

    /// Control box of the translated and rotated outline.
    pub fn bbox(&self) -> BBox {
        self.bbox
    }

    /// Check if the outline has been consumed by rasterization.
    pub fn is_rasterized(&self) -> bool {
        self.outline.is_none()
    }

    /// The positioned outline, if it has not been rasterized yet.
    pub fn outline(&self) -> Option<&Outline> {
        self.outline.as_ref()
    }
}

/// The positioned glyphs of one string.
#[derive(Debug)]
pub struct StringLayout {
    glyphs: Vec<PositionedGlyph>,
    angle: f64,
    matrix: Matrix,
    pen: Vector,
}

impl Default for StringLayout {
    fn default() -> Self {
        Self {
            glyphs: Vec::new(),
            angle: 0.0,
            matrix: Matrix::IDENTITY,
            pen: Vector::ZERO,
        }
    }
}

impl StringLayout {
    /// The positioned glyphs, in string order.
    pub fn glyphs(&self) -> &[PositionedGlyph] {
        &self.glyphs
    }

    /// The glyph at `index`.
    pub fn get(&self, index: usize) -> Result<&PositionedGlyph, RangeError> {
        self.glyphs.get(index).ok_or(RangeError::LayoutIndex {
            index,
            count: self.glyphs.len(),
        })
    }

    /// Number of successfully placed glyphs.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Rotation angle in degrees.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// The 16.16 rotation matrix built from the angle.
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// Pen position after the last glyph, before rotation.
    pub fn pen(&self) -> Vector {
        self.pen
    }

    /// Aggregate extent of all glyphs, in subpixel units.
    pub fn bbox(&self) -> BBox {
        string_bbox(self.glyphs.iter().map(PositionedGlyph::bbox))
    }

    /// Check if any glyph has already been rasterized.
    pub fn any_rasterized(&self) -> bool {
        self.glyphs.iter().any(PositionedGlyph::is_rasterized)
    }

    /// Take every outline for rasterization, in string order.
    ///
    /// Fails without removing anything if some outline is already gone.
    pub(crate) fn take_outlines(&mut self) -> GlyphRunResult<Vec<(u32, Outline)>> {
        if self.any_rasterized() {
            return Err(StateError::LayoutRasterized.into());
        }
        Ok(self
            .glyphs
            .iter_mut()
            .filter_map(|glyph| glyph.outline.take().map(|outline| (glyph.char_code, outline)))
            .collect())
    }
}

/// Builds and owns the current [`StringLayout`].
#[derive(Debug, Default)]
pub struct LayoutEngine {
    layout: StringLayout,
}

impl LayoutEngine {
    /// Create an engine with an empty layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current layout.
    pub fn layout(&self) -> &StringLayout {
        &self.layout
    }

    pub(crate) fn layout_mut(&mut self) -> &mut StringLayout {
        &mut self.layout
    }

    /// Lay out `char_codes` rotated by `angle_degrees`, replacing the
    /// current layout.
    ///
    /// Characters whose outline cannot be loaded are logged and skipped:
    /// they take no slot and do not move the pen.
    pub fn set_text<P, I>(&mut self, provider: &P, char_codes: I, angle_degrees: f64)
    where
        P: GlyphProvider + ?Sized,
        I: IntoIterator<Item = u32>,
    {
        // Release the previous layout's outlines before loading new ones.
        self.layout = StringLayout::default();

        let matrix = Matrix::rotation_degrees(angle_degrees);
        let use_kerning = provider.has_kerning();
        let mut previous = GlyphId::UNDEFINED;
        let mut pen = Vector::ZERO;
        let mut glyphs = Vec::new();

        for char_code in char_codes {
            let id = provider.resolve_char(char_code);
            if use_kerning && !previous.is_undefined() && !id.is_undefined() {
                pen.x += provider.kerning(previous, id).x;
            }

            let loaded = match provider.load_outline(id) {
                Ok(loaded) => loaded,
                Err(err) => {
                    warn!(
                        target: targets::LAYOUT,
                        char_code,
                        glyph = %id,
                        error = %err,
                        "could not load glyph, skipping character"
                    );
                    continue;
                }
            };

            let mut outline = loaded.outline;
            provider.transform(&mut outline, None, Some(pen));
            trace!(
                target: targets::LAYOUT,
                char_code,
                glyph = %id,
                pen_x = pen.x.raw(),
                "placed glyph"
            );

            glyphs.push(PositionedGlyph {
                char_code,
                id,
                metrics: loaded.metrics,
                pen,
                bbox: BBox::ZERO,
                outline: Some(outline),
            });
            pen.x += loaded.metrics.hori_advance;
            previous = id;
        }

        for glyph in &mut glyphs {
            if let Some(outline) = glyph.outline.as_mut() {
                provider.transform(outline, Some(&matrix), None);
                glyph.bbox = outline.control_box();
            }
        }

        debug!(
            target: targets::LAYOUT,
            glyphs = glyphs.len(),
            angle = angle_degrees,
            "laid out string"
        );

        self.layout = StringLayout {
            glyphs,
            angle: angle_degrees,
            matrix,
            pen,
        };
    }

    /// Drop the current layout and every outline it owns.
    pub fn clear(&mut self) {
        self.layout = StringLayout::default();
    }
}
