//! Aggregate extent of a laid-out string.

use horizon_glyphrun_core::BBox;

/// Union of per-glyph control boxes, in subpixel units.
///
/// Starts from [`BBox::EMPTY`] and grows componentwise. If nothing grew the
/// box (no glyphs), the result is [`BBox::ZERO`].
pub fn string_bbox<I>(glyph_boxes: I) -> BBox
where
    I: IntoIterator<Item = BBox>,
{
    let mut bbox = BBox::EMPTY;
    for glyph_box in glyph_boxes {
        bbox.expand(&glyph_box);
    }
    bbox.or_zero()
}
