use std::path::PathBuf;

use clap::Parser;

/// Converts a 128x128 indexed PNG glyph atlas into a C header with a 256 entry 8x8 font table.
#[derive(Parser)]
#[clap(version)]
pub struct Args {
    /// Indexed PNG atlas, 16x16 glyphs of 8x8 pixels. White palette entries are foreground.
    pub input: PathBuf,

    /// Header to create or overwrite.
    pub output: PathBuf,
}
