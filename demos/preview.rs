//! Prints a single glyph of an atlas as block characters

use std::path::PathBuf;

use clap::Parser as _;
use glyph_table::{parser::atlas::Decoded, render::preview::preview, GlyphTable};

#[derive(clap::Parser)]
struct Args {
    #[clap(long, short = 'f')]
    pub atlas_file: PathBuf,

    #[clap(long = "char", short)]
    pub character: char,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let atlas = Decoded::open(args.atlas_file)?.validate()?;
    let table = GlyphTable::extract(&atlas);

    let codepoint = u8::try_from(args.character)?;
    let glyph = table.glyph(codepoint);

    println!("{:#04x?}", glyph.rows());
    print!("{}", preview(glyph));

    Ok(())
}
