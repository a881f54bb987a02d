use crate::{GlyphBitmap, GLYPH_HEIGHT, GLYPH_WIDTH};

const FILLED: &str = "\u{2588}\u{2588}";
const EMPTY: &str = "  ";

/// Draws the glyph with block characters, one line per pixel row, leftmost pixel first.
pub fn preview(glyph: &GlyphBitmap) -> String {
    let mut out = String::new();

    for y in 0..GLYPH_HEIGHT {
        for x in 0..GLYPH_WIDTH {
            out.push_str(if glyph.pixel(x, y) == Some(true) {
                FILLED
            } else {
                EMPTY
            });
        }
        out.push('\n');
    }

    out
}
