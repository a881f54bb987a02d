//! Extraction of 8×8 glyph bitmaps from a validated [`Atlas`].
//!
//! Each glyph is eight bytes, one per pixel row from top to bottom. Bit `x` of a row byte is set when the pixel `x`
//! columns from the left edge of the cell uses the foreground palette index, so the leftmost pixel is bit 0.

use crate::{Atlas, GLYPH_COUNT, GLYPH_HEIGHT, GLYPH_WIDTH, GRID_COLUMNS};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GlyphBitmap(pub [u8; GLYPH_HEIGHT as usize]);

impl GlyphBitmap {
    /// Samples the cell of `codepoint` in the atlas. With no foreground index every pixel is off.
    pub fn from_cell(atlas: &Atlas, codepoint: u8, foreground: Option<u8>) -> Self {
        let Some(foreground) = foreground else {
            return Self::default();
        };

        let (col, row) = cell_position(codepoint);
        let (x0, y0) = (col * GLYPH_WIDTH, row * GLYPH_HEIGHT);

        let mut rows = [0; GLYPH_HEIGHT as usize];
        for (y, byte) in (0..GLYPH_HEIGHT).zip(rows.iter_mut()) {
            *byte = (0..GLYPH_WIDTH)
                .filter(|&x| atlas.index(x0 + x, y0 + y) == Some(foreground))
                .fold(0, |acc, x| acc | 1 << x);
        }

        Self(rows)
    }

    /// Returns [`Some(true)`] if the pixel is filled, [`Some(false)`] if it's not, [`None`] if out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<bool> {
        if x >= GLYPH_WIDTH || y >= GLYPH_HEIGHT {
            return None;
        }

        Some(self.0[y as usize] >> x & 1 != 0)
    }

    /// Row bytes, top to bottom.
    pub fn rows(&self) -> &[u8; GLYPH_HEIGHT as usize] {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.iter().all(|&row| row == 0)
    }
}

/// Column and row of the grid cell holding `codepoint`.
pub fn cell_position(codepoint: u8) -> (u32, u32) {
    let codepoint = codepoint as u32;
    (codepoint % GRID_COLUMNS, codepoint / GRID_COLUMNS)
}

/// All 256 glyphs of an atlas, indexed by codepoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphTable([GlyphBitmap; GLYPH_COUNT]);

impl GlyphTable {
    /// Extracts every glyph using the first pure white palette entry as the foreground.
    ///
    /// An atlas without a white entry yields a table of blank glyphs, a warning is logged in that case.
    pub fn extract(atlas: &Atlas) -> Self {
        let foreground = atlas.foreground_index();

        if foreground.is_none() {
            warn!("No white palette entry found, every glyph will be blank");
        }

        Self::extract_with(atlas, foreground)
    }

    pub fn extract_with(atlas: &Atlas, foreground: Option<u8>) -> Self {
        let mut glyphs = [GlyphBitmap::default(); GLYPH_COUNT];

        for (codepoint, glyph) in (0..=u8::MAX).zip(glyphs.iter_mut()) {
            *glyph = GlyphBitmap::from_cell(atlas, codepoint, foreground);
        }

        debug!(
            "Extracted {} glyphs, {} blank",
            GLYPH_COUNT,
            glyphs.iter().filter(|g| g.is_blank()).count()
        );

        Self(glyphs)
    }

    pub fn glyph(&self, codepoint: u8) -> &GlyphBitmap {
        &self.0[codepoint as usize]
    }

    /// Glyphs in codepoint order.
    pub fn iter(&self) -> impl Iterator<Item = &GlyphBitmap> {
        self.0.iter()
    }

    /// The packed binary form, eight bytes per glyph in codepoint order.
    pub fn as_bytes(&self) -> Vec<u8> {
        self.0.iter().flat_map(|glyph| glyph.0).collect()
    }
}

impl Default for GlyphTable {
    fn default() -> Self {
        Self([GlyphBitmap::default(); GLYPH_COUNT])
    }
}

impl<'a> IntoIterator for &'a GlyphTable {
    type IntoIter = core::slice::Iter<'a, GlyphBitmap>;
    type Item = &'a GlyphBitmap;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
