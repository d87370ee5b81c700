//! Integration tests for string layout and measurement.

mod common;

use common::{ADVANCE, BlockProvider, init_tracing};
use horizon_glyphrun::{
    BBox, FontLibrary, FontSession, GlyphRunError, LibraryConfig, RangeError, Subpixel, Vector,
};

fn session_with(provider: BlockProvider) -> (FontLibrary, FontSession<BlockProvider>) {
    init_tracing();
    let library = FontLibrary::init(LibraryConfig::default()).unwrap();
    let session = library.open_with_provider(provider).unwrap();
    (library, session)
}

fn session() -> (FontLibrary, FontSession<BlockProvider>) {
    session_with(BlockProvider::new())
}

#[test]
fn test_empty_text_has_zero_bbox() {
    let (_library, mut session) = session();
    session.set_text("", 0.0);

    assert_eq!(session.layout_glyph_count(), 0);
    assert_eq!(session.string_bbox(), BBox::ZERO);
    assert_eq!(session.width_height(), (Subpixel::ZERO, Subpixel::ZERO));
}

#[test]
fn test_blank_text_has_zero_bbox() {
    let (_library, mut session) = session();
    session.set_text("   ", 0.0);

    assert_eq!(session.layout_glyph_count(), 3);
    assert_eq!(session.string_bbox(), BBox::ZERO);
    assert_eq!(session.layout().pen(), Vector::from_raw(3 * ADVANCE, 0));
}

#[test]
fn test_pen_advances_per_glyph() {
    let (_library, mut session) = session();
    session.set_text("ABC", 0.0);

    assert_eq!(session.layout_glyph_count(), 3);
    for (i, glyph) in session.layout().glyphs().iter().enumerate() {
        assert_eq!(glyph.pen(), Vector::from_raw(i as i32 * ADVANCE, 0));
        assert_eq!(glyph.char_code(), u32::from(b'A') + i as u32);
    }
    assert_eq!(session.string_bbox(), BBox::from_raw(64, 0, 2 * ADVANCE + 576, 640));
}

#[test]
fn test_width_height() {
    let (_library, mut session) = session();
    session.set_text("AB", 0.0);

    assert_eq!(session.width_height(), (Subpixel::new(1152), Subpixel::new(640)));
    // Measuring does not consume anything.
    assert_eq!(session.width_height(), (Subpixel::new(1152), Subpixel::new(640)));
    assert!(!session.layout().any_rasterized());
}

#[test]
fn test_set_text_replaces_previous_layout() {
    let (_library, mut session) = session();
    session.set_text("ABCDEF", 0.0);
    session.set_text("AB", 0.0);

    assert_eq!(session.layout_glyph_count(), 2);
    assert_eq!(session.width_height().0, Subpixel::new(1152));
}

#[test]
fn test_unloadable_char_is_skipped() {
    let (_library, mut session) = session();
    session.set_text("A~B", 0.0);

    assert_eq!(session.layout_glyph_count(), 2);
    let second = session.layout_glyph(1).unwrap();
    assert_eq!(second.char_code(), u32::from(b'B'));
    assert_eq!(second.pen(), Vector::from_raw(ADVANCE, 0));
}

#[test]
fn test_kerning_adjusts_pen() {
    let provider = BlockProvider::new().with_kerning('A', 'V', -128);
    let (_library, mut session) = session_with(provider);
    session.set_text("AVA", 0.0);

    let pens: Vec<_> = session.layout().glyphs().iter().map(|g| g.pen().x.raw()).collect();
    assert_eq!(pens, vec![0, ADVANCE - 128, 2 * ADVANCE - 128]);
}

#[test]
fn test_no_kerning_without_kerning_data() {
    let (_library, mut session) = session();
    session.set_text("AV", 0.0);

    assert_eq!(session.layout_glyph(1).unwrap().pen().x.raw(), ADVANCE);
}

#[test]
fn test_rotation_turns_string_as_one_block() {
    let (_library, mut session) = session();
    session.set_text("AB", 90.0);

    // (x, y) -> (-y, x): the string now runs upward from the origin.
    assert_eq!(session.layout_glyph(0).unwrap().bbox(), BBox::from_raw(-640, 64, 0, 576));
    assert_eq!(session.layout_glyph(1).unwrap().bbox(), BBox::from_raw(-640, 704, 0, 1216));
    assert_eq!(session.string_bbox(), BBox::from_raw(-640, 64, 0, 1216));
    assert_eq!(session.width_height(), (Subpixel::new(640), Subpixel::new(1152)));

    // Pens are recorded before rotation.
    assert_eq!(session.layout_glyph(1).unwrap().pen(), Vector::from_raw(ADVANCE, 0));
    assert_eq!(session.layout().angle(), 90.0);
}

#[test]
fn test_zero_angle_uses_identity() {
    let (_library, mut session) = session();
    session.set_text("A", 0.0);

    assert!(session.layout().matrix().is_identity());
    assert_eq!(session.layout_glyph(0).unwrap().bbox(), BBox::from_raw(64, 0, 576, 640));
}

#[test]
fn test_layout_glyph_out_of_range() {
    let (_library, mut session) = session();
    session.set_text("AB", 0.0);

    assert_eq!(
        session.layout_glyph(2).unwrap_err(),
        RangeError::LayoutIndex { index: 2, count: 2 }
    );
}

#[test]
fn test_set_size_scales_new_layouts() {
    let (_library, mut session) = session();
    session.set_size(24.0, 72.0).unwrap();
    session.set_text("AB", 0.0);

    assert_eq!(session.width_height(), (Subpixel::new(2304), Subpixel::new(1280)));
}

#[test]
fn test_invalid_size_keeps_previous_size() {
    let (_library, mut session) = session();
    let err = session.set_size(0.0, 72.0).unwrap_err();
    assert!(matches!(err, GlyphRunError::Resource(_)));

    session.set_text("A", 0.0);
    assert_eq!(session.provider().ppem(), 12.0);
    assert_eq!(session.layout_glyph(0).unwrap().metrics().hori_advance.raw(), ADVANCE);
}

#[test]
fn test_no_kerning_across_undefined_glyph() {
    let provider = BlockProvider::new().with_kerning('A', 'V', -128);
    let (_library, mut session) = session_with(provider);
    // DEL has no mapping, so it lays out as the undefined glyph.
    session.set_text("A\u{7f}V", 0.0);

    assert_eq!(session.layout_glyph_count(), 3);
    assert!(session.layout_glyph(1).unwrap().id().is_undefined());
    let pens: Vec<_> = session.layout().glyphs().iter().map(|g| g.pen().x.raw()).collect();
    assert_eq!(pens, vec![0, ADVANCE, 2 * ADVANCE]);
}

#[test]
fn test_kerning_spans_skipped_char() {
    let provider = BlockProvider::new().with_kerning('A', 'V', -128);
    let (_library, mut session) = session_with(provider);
    session.set_text("A~V", 0.0);

    assert_eq!(session.layout_glyph_count(), 2);
    assert_eq!(session.layout_glyph(1).unwrap().pen().x.raw(), ADVANCE - 128);
}

#[test]
fn test_long_text_at_huge_size_saturates() {
    let (_library, mut session) = session();
    session.set_size(1.0e6, 72.0).unwrap();
    session.set_text(&"A".repeat(64), 0.0);

    let max = Subpixel::new(i32::MAX);
    assert_eq!(session.layout_glyph_count(), 64);
    assert_eq!(session.layout().glyphs().last().unwrap().pen().x, max);
    assert_eq!(session.layout().pen().x, max);
    assert_eq!(session.string_bbox().x_max, max);
    assert!(session.width_height().0 > Subpixel::ZERO);
}
