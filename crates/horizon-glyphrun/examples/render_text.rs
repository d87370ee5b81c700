//! Render a line of text to a raw grayscale file and a PNG.
//!
//! Run with:
//! cargo run -p horizon-glyphrun --example render_text -- FONT TEXT [ANGLE] [POINT_SIZE] [DPI]
//!
//! Writes `text.raw` (row-major bytes, no header) and `text.png` to the
//! current directory.

use horizon_glyphrun::{FontLibrary, LibraryConfig};

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 2 {
        eprintln!("usage: render_text FONT TEXT [ANGLE] [POINT_SIZE] [DPI]");
        std::process::exit(2);
    }
    let font = &args[0];
    let text = &args[1];
    let parse = |index: usize, default: f64| {
        args.get(index)
            .map(|v| v.parse::<f64>().expect("numeric argument"))
            .unwrap_or(default)
    };
    let angle = parse(2, 0.0);
    let point_size = parse(3, 12.0);
    let dpi = parse(4, 72.0);

    let library = FontLibrary::init(LibraryConfig::default()).expect("Failed to init font library");
    let mut session = library.open_face(font).expect("Failed to open font");
    session
        .set_size(point_size, dpi)
        .expect("Failed to set character size");

    session.set_text(text, angle);
    let (width, height) = session.width_height();
    println!(
        "Laid out {} glyphs, {:.2}x{:.2} px",
        session.layout_glyph_count(),
        width.to_f32(),
        height.to_f32()
    );

    session.draw_glyphs_to_bitmap().expect("Failed to draw text");
    let data = session.serialize();
    println!("Canvas: {}x{} pixels", data.width, data.height);

    session.write_bitmap("text.raw").expect("Failed to write raw bitmap");
    session.save_png("text.png").expect("Failed to write PNG");
    println!("Wrote text.raw and text.png");
}
