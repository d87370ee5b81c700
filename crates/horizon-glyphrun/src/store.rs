//! Individually loaded glyphs.
//!
//! The [`GlyphStore`] owns glyphs loaded one character at a time, for
//! callers that place glyphs by hand with
//! [`FontSession::draw_glyph_to_bitmap`](crate::FontSession::draw_glyph_to_bitmap)
//! rather than through automatic string layout.

use tracing::{debug, trace};

use horizon_glyphrun_core::logging::targets;
use horizon_glyphrun_core::{GlyphId, GlyphMetrics, GlyphProvider, Outline, ResourceError};

use crate::error::{GlyphRunResult, RangeError, StateError};

/// A loaded glyph as seen by callers.
///
/// This is an independent copy of the metrics taken at load time; it stays
/// valid after the stored outline is rasterized or the store is cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    /// Position in the store. Pass this back to address the glyph.
    pub index: usize,
    /// The character code the glyph was loaded for.
    pub char_code: u32,
    /// The face glyph the character resolved to.
    pub id: GlyphId,
    /// Metrics at the size that was active when the glyph was loaded.
    pub metrics: GlyphMetrics,
}

/// A stored glyph and the outline it owns until rasterization.
#[derive(Debug)]
struct GlyphRecord {
    glyph: Glyph,
    outline: Option<Outline>,
}

/// An ordered collection of glyphs loaded by character code.
#[derive(Debug, Default)]
pub struct GlyphStore {
    records: Vec<GlyphRecord>,
}

impl GlyphStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve and load a character, appending it at the next index.
    pub fn load_char<P: GlyphProvider + ?Sized>(
        &mut self,
        provider: &P,
        char_code: u32,
    ) -> Result<Glyph, ResourceError> {
        let id = provider.resolve_char(char_code);
        let loaded = provider
            .load_outline(id)
            .map_err(|source| ResourceError::CharLoad {
                code: char_code,
                source,
            })?;

        let glyph = Glyph {
            index: self.records.len(),
            char_code,
            id,
            metrics: loaded.metrics,
        };
        trace!(
            target: targets::STORE,
            index = glyph.index,
            char_code,
            glyph = %id,
            "loaded glyph"
        );
        self.records.push(GlyphRecord {
            glyph,
            outline: Some(loaded.outline),
        });
        Ok(glyph)
    }

    /// Number of loaded glyphs.
    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The glyph at `index`.
    pub fn get(&self, index: usize) -> Result<Glyph, RangeError> {
        self.records
            .get(index)
            .map(|record| record.glyph)
            .ok_or(RangeError::GlyphIndex {
                index,
                count: self.records.len(),
            })
    }

    /// Check if the glyph at `index` still owns its outline.
    pub fn has_outline(&self, index: usize) -> bool {
        self.records
            .get(index)
            .is_some_and(|record| record.outline.is_some())
    }

    /// Remove the outline at `index` for rasterization.
    ///
    /// The record keeps its index and metrics; only the outline is gone.
    pub(crate) fn take_outline(&mut self, index: usize) -> GlyphRunResult<Outline> {
        let count = self.records.len();
        let record = self
            .records
            .get_mut(index)
            .ok_or(RangeError::GlyphIndex { index, count })?;
        Ok(record
            .outline
            .take()
            .ok_or(StateError::GlyphRasterized { index })?)
    }

    /// Release every glyph. Index numbering restarts at zero.
    pub fn clear(&mut self) {
        if !self.records.is_empty() {
            debug!(target: targets::STORE, released = self.records.len(), "cleared glyph store");
        }
        self.records.clear();
    }
}
