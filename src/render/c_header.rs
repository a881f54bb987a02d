//! Serializes a [`GlyphTable`] as a C header declaring `unsigned char font[256][8]`.

use std::io::{self, Write};

use crate::{GlyphBitmap, GlyphTable};

const PREAMBLE: &str = "// THIS FILE IS GENERATED, DO NOT EDIT MANUALLY, CHANGES WILL BE LOST
#ifndef FONT_H
#define FONT_H

// bytes are rows top-to-bottom
// bits are columns right-to-left
unsigned char font[256][8] = {
";

const FOOTER: &str = "};

#endif";

pub fn write_c_header<W: Write>(table: &GlyphTable, mut out: W) -> io::Result<()> {
    out.write_all(PREAMBLE.as_bytes())?;

    for glyph in table {
        write_glyph(glyph, &mut out)?;
    }

    out.write_all(FOOTER.as_bytes())?;
    out.flush()
}

pub fn to_c_header(table: &GlyphTable) -> String {
    let mut out = Vec::with_capacity(PREAMBLE.len() + FOOTER.len() + table.iter().count() * 60);

    // Writing to a Vec never fails
    write_c_header(table, &mut out).expect("in-memory write");

    String::from_utf8(out).expect("header is ASCII")
}

/// `    { 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00 }, ` followed by a newline.
fn write_glyph<W: Write>(glyph: &GlyphBitmap, out: &mut W) -> io::Result<()> {
    out.write_all(b"    { ")?;

    for (i, row) in glyph.rows().iter().enumerate() {
        if i != 0 {
            out.write_all(b", ")?;
        }
        write!(out, "{row:#04x}")?;
    }

    out.write_all(b" }, \n")
}
