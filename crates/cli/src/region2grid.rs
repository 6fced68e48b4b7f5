//! region2grid - Reconstruct a table grid from a page region
//!
//! Reads a JSON dump of page tokens and vector paths, infers the rows,
//! columns and cells inside the given bounding box, and writes the result
//! as JSON.

mod common;

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tablegrid_core::grid::{GridSettings, Region, RowKey, TableExtraction, extract};
use tablegrid_core::source::PageDump;

use common::{init_logging, open_output, parse_bbox};

/// Reconstruct a table grid from the tokens and ruling lines of a page region.
#[derive(Parser, Debug)]
#[command(name = "region2grid")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a JSON page dump
    file: PathBuf,

    /// Page number to read (1-indexed)
    #[arg(
        short = 'p',
        long,
        default_value = "1",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    page: u32,

    /// Table region as "x0,y0,x1,y1" in page coordinates (top-left origin)
    #[arg(short = 'b', long)]
    bbox: String,

    /// JSON file with grid settings; flags below override its values
    #[arg(short = 's', long)]
    settings: Option<PathBuf>,

    /// Minimum whitespace run (units) that separates columns
    #[arg(long = "min-col-gap")]
    min_col_gap: Option<f64>,

    /// Minimum vertical gap that separates rows absent a ruling line
    #[arg(long = "min-row-gap")]
    min_row_gap: Option<f64>,

    /// Disable the fixed minimum row gap
    #[arg(long = "no-min-row-gap", action = ArgAction::SetTrue, conflicts_with = "min_row_gap")]
    no_min_row_gap: bool,

    /// Max distance between a gap edge and a ruling line for snapping
    #[arg(long = "line-snap-tol")]
    line_snap_tol: Option<f64>,

    /// Cluster visual lines by token bottom edge instead of center
    #[arg(long = "row-key-bottom", action = ArgAction::SetTrue)]
    row_key_bottom: bool,

    /// Path to file where output is written, or "-" for stdout
    #[arg(short = 'o', long, default_value = "-")]
    outfile: String,

    /// Write compact JSON instead of pretty-printed
    #[arg(long, action = ArgAction::SetTrue)]
    compact: bool,

    /// Number of cells to preview on stderr
    #[arg(long, default_value = "3")]
    preview: usize,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,
}

/// Build settings from the optional settings file plus flag overrides.
fn build_settings(args: &Args) -> Result<GridSettings> {
    let mut settings = match &args.settings {
        Some(path) => {
            let data = std::fs::read(path)
                .with_context(|| format!("failed to read settings {}", path.display()))?;
            serde_json::from_slice::<GridSettings>(&data)
                .with_context(|| format!("invalid settings in {}", path.display()))?
        }
        None => GridSettings::default(),
    };

    if let Some(v) = args.min_col_gap {
        settings.min_col_gap = v;
    }
    if let Some(v) = args.min_row_gap {
        settings.min_row_gap = Some(v);
    }
    if args.no_min_row_gap {
        settings.min_row_gap = None;
    }
    if let Some(v) = args.line_snap_tol {
        settings.line_snap_tolerance = v;
    }
    if args.row_key_bottom {
        settings.row_cluster_key = RowKey::Bottom;
    }
    settings.validate()?;
    Ok(settings)
}

fn report(result: &TableExtraction, preview: usize) {
    let meta = &result.meta;
    eprintln!(
        "page {}: {} rows x {} cols, {} cells",
        meta.page + 1,
        meta.rows_count,
        meta.cols_count,
        result.grid.cells.len()
    );
    if meta.zero_tokens {
        eprintln!("warning: no text found in region");
    }
    if meta.unassigned_tokens > 0 {
        eprintln!(
            "warning: {} tokens had no majority cell",
            meta.unassigned_tokens
        );
    }
    for cell in result.grid.cells.iter().take(preview) {
        eprintln!("  [{}, {}] {:?}", cell.row_idx, cell.col_idx, cell.text);
    }
    let rest = result.grid.cells.len().saturating_sub(preview);
    if rest > 0 {
        eprintln!("  ... and {rest} more cells");
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    let settings = build_settings(&args)?;
    let (x0, y0, x1, y1) = parse_bbox(&args.bbox)?;
    let region = Region::new(x0, y0, x1, y1);

    let dump = PageDump::open(&args.file)
        .with_context(|| format!("failed to load page dump {}", args.file.display()))?;
    let page = (args.page - 1) as usize;
    tracing::debug!(page, ?region, "extracting table");

    let result = extract(&dump, page, &region, &settings)
        .with_context(|| format!("extraction failed for page {}", args.page))?;
    report(&result, args.preview);

    let mut output = open_output(&args.outfile)?;
    if args.compact {
        serde_json::to_writer(&mut output, &result)?;
    } else {
        serde_json::to_writer_pretty(&mut output, &result)?;
    }
    writeln!(output)?;
    output.flush()?;
    Ok(())
}
