//! TrueType/OpenType glyph provider.
//!
//! [`TtfProvider`] implements [`GlyphProvider`] on top of `ttf-parser` for
//! character mapping, metrics, kerning and outline extraction, and
//! `tiny-skia` for filling outlines into coverage masks.
//!
//! The provider owns the font bytes. `ttf_parser::Face` borrows its data, so
//! the face is parsed again for each query; parsing only reads the table
//! directory and is cheap compared to outline extraction.

use std::path::Path;

use tiny_skia::{FillRule, Mask, PathBuilder, Transform};
use tracing::debug;

use horizon_glyphrun_core::logging::targets;
use horizon_glyphrun_core::{
    Bitmap, GlyphId, GlyphLoadError, GlyphMetrics, GlyphProvider, LoadedGlyph, Outline,
    PathSegment, RasterizeError, ResourceError, Subpixel, Vector,
};

use crate::config::LibraryConfig;

/// Largest bitmap edge the rasterizer will allocate, in pixels.
const MAX_BITMAP_DIMENSION: u32 = 1 << 14;

/// Largest pixels-per-em a character size may resolve to.
const MAX_PIXELS_PER_EM: f64 = 65535.0;

/// Face-wide values, in font design units unless noted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceMetrics {
    pub units_per_em: u16,
    pub num_glyphs: u16,
    pub ascender: i16,
    pub descender: i16,
    pub line_gap: i16,
    /// Union of all glyph boxes.
    pub bbox: (i16, i16, i16, i16),
    pub has_kerning: bool,
    /// Active pixels per em at the current character size.
    pub pixels_per_em: f64,
}

/// A glyph provider backed by an in-memory TrueType/OpenType font.
#[derive(Clone)]
pub struct TtfProvider {
    data: Vec<u8>,
    face_index: u32,
    units_per_em: u16,
    num_glyphs: u16,
    has_kerning: bool,
    pixels_per_em: f64,
    anti_alias: bool,
}

impl TtfProvider {
    /// Read and validate a font file.
    pub fn from_file(path: impl AsRef<Path>, face_index: u32) -> Result<Self, ResourceError> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|source| ResourceError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let provider = Self::from_bytes(data, face_index)?;
        debug!(
            target: targets::PROVIDER,
            path = %path.display(),
            glyphs = provider.num_glyphs,
            kerning = provider.has_kerning,
            "opened font face"
        );
        Ok(provider)
    }

    /// Validate font bytes held in memory.
    pub fn from_bytes(data: Vec<u8>, face_index: u32) -> Result<Self, ResourceError> {
        let face = ttf_parser::Face::parse(&data, face_index)
            .map_err(|e| ResourceError::Parse(e.to_string()))?;

        let tables = face.tables();
        if tables.glyf.is_none() && tables.cff.is_none() {
            return Err(ResourceError::Unsupported(
                "face has no scalable glyph outlines".into(),
            ));
        }

        let units_per_em = face.units_per_em();
        let num_glyphs = face.number_of_glyphs();
        let has_kerning = tables.kern.is_some_and(|kern| {
            kern.subtables
                .into_iter()
                .any(|subtable| subtable.horizontal && !subtable.variable)
        });

        Ok(Self {
            data,
            face_index,
            units_per_em,
            num_glyphs,
            has_kerning,
            pixels_per_em: 0.0,
            anti_alias: true,
        })
    }

    /// Apply the rasterization options from a library configuration.
    pub fn configure(&mut self, config: &LibraryConfig) {
        self.anti_alias = config.anti_alias;
    }

    /// Active pixels per em; zero until a size has been set.
    pub fn pixels_per_em(&self) -> f64 {
        self.pixels_per_em
    }

    /// Face-wide metrics.
    pub fn face_metrics(&self) -> Option<FaceMetrics> {
        self.with_face(|face| {
            let bbox = face.global_bounding_box();
            FaceMetrics {
                units_per_em: self.units_per_em,
                num_glyphs: self.num_glyphs,
                ascender: face.ascender(),
                descender: face.descender(),
                line_gap: face.line_gap(),
                bbox: (bbox.x_min, bbox.y_min, bbox.x_max, bbox.y_max),
                has_kerning: self.has_kerning,
                pixels_per_em: self.pixels_per_em,
            }
        })
    }

    fn with_face<R>(&self, f: impl FnOnce(&ttf_parser::Face<'_>) -> R) -> Option<R> {
        ttf_parser::Face::parse(&self.data, self.face_index)
            .ok()
            .map(|face| f(&face))
    }

    /// Scale factor from design units to subpixels.
    fn scale(&self) -> f64 {
        self.pixels_per_em * 64.0 / f64::from(self.units_per_em)
    }

    fn scaled(&self, units: f64) -> Subpixel {
        Subpixel::new((units * self.scale()).round() as i32)
    }
}

impl std::fmt::Debug for TtfProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtfProvider")
            .field("bytes", &self.data.len())
            .field("face_index", &self.face_index)
            .field("num_glyphs", &self.num_glyphs)
            .field("pixels_per_em", &self.pixels_per_em)
            .finish()
    }
}

impl GlyphProvider for TtfProvider {
    fn resolve_char(&self, code: u32) -> GlyphId {
        let Some(c) = char::from_u32(code) else {
            return GlyphId::UNDEFINED;
        };
        self.with_face(|face| face.glyph_index(c))
            .flatten()
            .map_or(GlyphId::UNDEFINED, |id| GlyphId(u32::from(id.0)))
    }

    fn has_kerning(&self) -> bool {
        self.has_kerning
    }

    fn kerning(&self, left: GlyphId, right: GlyphId) -> Vector {
        let (Ok(left), Ok(right)) = (u16::try_from(left.0), u16::try_from(right.0)) else {
            return Vector::ZERO;
        };
        let (left, right) = (ttf_parser::GlyphId(left), ttf_parser::GlyphId(right));
        let units = self
            .with_face(|face| {
                let kern = face.tables().kern?;
                kern.subtables
                    .into_iter()
                    .filter(|subtable| subtable.horizontal && !subtable.variable)
                    .find_map(|subtable| subtable.glyphs_kerning(left, right))
            })
            .flatten()
            .unwrap_or(0);
        Vector::new(self.scaled(f64::from(units)), Subpixel::ZERO)
    }

    fn set_char_size(&mut self, point_size: f64, dpi: f64) -> Result<(), ResourceError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        let pixels_per_em = point_size * dpi / 72.0;
        if !valid(point_size) || !valid(dpi) || pixels_per_em > MAX_PIXELS_PER_EM {
            return Err(ResourceError::InvalidSize { point_size, dpi });
        }
        self.pixels_per_em = pixels_per_em;
        debug!(
            target: targets::PROVIDER,
            point_size,
            dpi,
            ppem = self.pixels_per_em,
            "set character size"
        );
        Ok(())
    }

    fn load_outline(&self, glyph: GlyphId) -> Result<LoadedGlyph, GlyphLoadError> {
        let id = u16::try_from(glyph.0)
            .ok()
            .filter(|&id| id < self.num_glyphs)
            .map(ttf_parser::GlyphId)
            .ok_or(GlyphLoadError::NotFound(glyph))?;

        let scale = self.scale();
        self.with_face(|face| {
            let mut builder = SubpixelOutlineBuilder::new(scale);
            // `None` covers both empty glyphs and undecodable ones; an in-range
            // glyph without contours is treated as empty (e.g. space).
            face.outline_glyph(id, &mut builder);
            let outline = builder.finish();

            let hori_advance = self.scaled(f64::from(face.glyph_hor_advance(id).unwrap_or(0)));
            let vert_advance = match face.glyph_ver_advance(id) {
                Some(advance) => self.scaled(f64::from(advance)),
                None => self.scaled(f64::from(face.ascender()) - f64::from(face.descender())),
            };

            let mut metrics =
                GlyphMetrics::from_control_box(outline.control_box(), hori_advance, vert_advance);
            if let Some(top_bearing) = face.glyph_ver_side_bearing(id) {
                metrics.vert_bearing_y = self.scaled(f64::from(top_bearing));
            }

            LoadedGlyph { outline, metrics }
        })
        .ok_or(GlyphLoadError::Malformed(glyph))
    }

    fn rasterize(&self, outline: Outline) -> Result<Bitmap, RasterizeError> {
        let cbox = outline.control_box();
        let left = cbox.x_min.floor_pixels();
        let bottom = cbox.y_min.floor_pixels();
        let right = cbox.x_max.ceil_pixels();
        let top = cbox.y_max.ceil_pixels();

        if outline.is_empty() || right <= left || top <= bottom {
            return Ok(Bitmap::empty(left, top));
        }

        let width = (right - left) as u32;
        let height = (top - bottom) as u32;
        if width > MAX_BITMAP_DIMENSION || height > MAX_BITMAP_DIMENSION {
            return Err(RasterizeError::TooLarge { width, height });
        }

        let Some(path) = device_path(&outline, left, top) else {
            return Ok(Bitmap::empty(left, top));
        };
        let mut mask = Mask::new(width, height).ok_or(RasterizeError::Allocation { width, height })?;
        mask.fill_path(&path, FillRule::Winding, self.anti_alias, Transform::identity());

        Ok(Bitmap {
            buffer: mask.data().to_vec(),
            width,
            height,
            left,
            top,
        })
    }
}

/// Convert a y-up subpixel outline into a y-down pixel path whose origin is
/// the bitmap's top-left corner at `(left, top)`.
fn device_path(outline: &Outline, left: i32, top: i32) -> Option<tiny_skia::Path> {
    let to_device = |p: Vector| (p.x.to_f32() - left as f32, top as f32 - p.y.to_f32());

    let mut builder = PathBuilder::new();
    for segment in outline.segments() {
        match *segment {
            PathSegment::MoveTo(p) => {
                let (x, y) = to_device(p);
                builder.move_to(x, y);
            }
            PathSegment::LineTo(p) => {
                let (x, y) = to_device(p);
                builder.line_to(x, y);
            }
            PathSegment::QuadTo(c, p) => {
                let (cx, cy) = to_device(c);
                let (x, y) = to_device(p);
                builder.quad_to(cx, cy, x, y);
            }
            PathSegment::CubicTo(c1, c2, p) => {
                let (c1x, c1y) = to_device(c1);
                let (c2x, c2y) = to_device(c2);
                let (x, y) = to_device(p);
                builder.cubic_to(c1x, c1y, c2x, c2y, x, y);
            }
            PathSegment::Close => builder.close(),
        }
    }
    builder.finish()
}

/// Receives outline commands in design units and records them in subpixels.
struct SubpixelOutlineBuilder {
    outline: Outline,
    scale: f64,
}

impl SubpixelOutlineBuilder {
    fn new(scale: f64) -> Self {
        Self {
            outline: Outline::new(),
            scale,
        }
    }

    fn point(&self, x: f32, y: f32) -> Vector {
        Vector::from_raw(
            (f64::from(x) * self.scale).round() as i32,
            (f64::from(y) * self.scale).round() as i32,
        )
    }

    fn finish(self) -> Outline {
        self.outline
    }
}

impl ttf_parser::OutlineBuilder for SubpixelOutlineBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        let p = self.point(x, y);
        self.outline.move_to(p);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let p = self.point(x, y);
        self.outline.line_to(p);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (c, p) = (self.point(x1, y1), self.point(x, y));
        self.outline.quad_to(c, p);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (c1, c2, p) = (self.point(x1, y1), self.point(x2, y2), self.point(x, y));
        self.outline.cubic_to(c1, c2, p);
    }

    fn close(&mut self) {
        self.outline.close();
    }
}
