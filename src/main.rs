use std::{fs::File, io::BufWriter};

use anyhow::Context;
use args::Args;
use clap::Parser;
use glyph_table::{parser::atlas::Decoded, render::c_header::write_c_header, GlyphTable};

mod args;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let atlas = Decoded::open(&args.input)
        .and_then(Decoded::validate)
        .with_context(|| format!("Failed to load atlas {}", args.input.display()))?;

    let table = GlyphTable::extract(&atlas);

    // Only touch the output once the whole table exists
    let output = File::create(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;
    write_c_header(&table, BufWriter::new(output))
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!("Generated {}", args.output.display());

    Ok(())
}
