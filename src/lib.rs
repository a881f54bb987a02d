//! Converts a 16×16 grid of 8×8 glyphs stored in an indexed PNG into a packed
//! glyph table.
//!
//! ```no_run
//! # use glyph_table::{parser::atlas::Decoded, GlyphTable, render::c_header::to_c_header};
//! let atlas = Decoded::open("font.png")?.validate()?;
//! let table = GlyphTable::extract(&atlas);
//!
//! std::fs::write("font.h", to_c_header(&table))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#[cfg(test)]
#[macro_use]
extern crate test_case;

#[macro_use]
extern crate log;

pub mod glyph;

pub mod parser {
    pub mod atlas;
}

pub mod render {
    pub mod c_header;
    pub mod preview;
}

pub use glyph::{GlyphBitmap, GlyphTable};
pub use parser::atlas::{Atlas, AtlasError};

/// Width of a single glyph cell in pixels, also the number of bits in a row byte.
pub const GLYPH_WIDTH: u32 = 8;
/// Height of a single glyph cell in pixels, also the number of bytes per glyph.
pub const GLYPH_HEIGHT: u32 = 8;

pub const GRID_COLUMNS: u32 = 16;
pub const GRID_ROWS: u32 = 16;

pub const ATLAS_WIDTH: u32 = GRID_COLUMNS * GLYPH_WIDTH;
pub const ATLAS_HEIGHT: u32 = GRID_ROWS * GLYPH_HEIGHT;

pub const GLYPH_COUNT: usize = (GRID_COLUMNS * GRID_ROWS) as usize;

/// Palette colour that marks a filled pixel.
pub const FOREGROUND: [u8; 3] = [255, 255, 255];
