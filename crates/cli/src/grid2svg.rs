//! grid2svg - Draw an extracted table grid over its page
//!
//! Renders the page tokens from a JSON page dump together with the grid
//! lines and cell rectangles of a region2grid result, for visual checking.

#[allow(dead_code)]
mod common;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tablegrid_core::grid::TableExtraction;
use tablegrid_core::render::{Overlay, SvgWriter};
use tablegrid_core::source::PageDump;

use common::{init_logging, open_output};

/// Render a debug overlay of an extracted table as SVG.
#[derive(Parser, Debug)]
#[command(name = "grid2svg")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the JSON page dump the table was extracted from
    dump: PathBuf,

    /// One or more region2grid results for tables on the same page
    #[arg(required = true)]
    extractions: Vec<PathBuf>,

    /// Path to file where the SVG is written, or "-" for stdout
    #[arg(short = 'o', long, default_value = "-")]
    outfile: String,

    /// Scale factor for the output
    #[arg(short = 's', long, default_value = "1.0")]
    scale: f64,

    /// Do not draw page text under the overlay
    #[arg(long = "no-text", action = ArgAction::SetTrue)]
    no_text: bool,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,
}

fn load_extraction(path: &PathBuf) -> Result<TableExtraction> {
    let data =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_slice(&data)
        .with_context(|| format!("{} is not a region2grid result", path.display()))
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    let dump = PageDump::open(&args.dump)
        .with_context(|| format!("failed to load page dump {}", args.dump.display()))?;

    let mut page_idx = None;
    let mut overlays = Vec::with_capacity(args.extractions.len());
    for path in &args.extractions {
        let extraction = load_extraction(path)?;
        if let Some(prev) = page_idx
            && prev != extraction.meta.page
        {
            anyhow::bail!(
                "{} is for page {}, expected page {}",
                path.display(),
                extraction.meta.page + 1,
                prev + 1
            );
        }
        page_idx = Some(extraction.meta.page);
        overlays.push(Overlay::from_grid(&extraction.grid));
    }

    let page_idx = page_idx.unwrap_or(0);
    let page = dump.page(page_idx)?;
    tracing::debug!(page = page_idx, overlays = overlays.len(), "rendering overlay");

    let output = open_output(&args.outfile)?;
    let mut writer = SvgWriter::with_options(output, args.scale, !args.no_text);
    writer.write_page(page, &overlays)?;
    writer.flush()?;
    Ok(())
}
