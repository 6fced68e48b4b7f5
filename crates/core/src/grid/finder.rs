//! Extraction orchestrator and public API.
//!
//! Line classification feeds the two boundary detectors, which run
//! independently; the mapper then materializes cells from both boundary
//! sets.

use rayon::prelude::*;
use tracing::debug;

use crate::error::Result;
use crate::geometry::{HasBBox, normalize_rect, rects_intersect};
use crate::source::PageSource;

use super::columns::detect_columns;
use super::lines::classify_lines;
use super::mapper::map_tokens;
use super::rows::detect_rows;
use super::types::{ExtractionMeta, Grid, GridSettings, PathBox, Region, TableExtraction, Token};

/// One table to extract: a page index and the table's bounding region.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TableRequest {
    pub page: usize,
    pub region: Region,
}

impl TableRequest {
    pub fn new(page: usize, region: Region) -> Self {
        Self { page, region }
    }
}

/// Keep only tokens whose bounding box intersects `region`.
fn scope_tokens(tokens: &[Token], region: &Region) -> Vec<Token> {
    tokens
        .iter()
        .filter(|t| rects_intersect(normalize_rect(t.bbox()), region.bbox()))
        .cloned()
        .collect()
}

fn run_grid(
    tokens: &[Token],
    paths: &[PathBox],
    region: &Region,
    settings: &GridSettings,
) -> (Grid, usize) {
    let region = Region::new(region.x0, region.y0, region.x1, region.y1);
    let lines = classify_lines(paths, &region, settings);

    let detect_cols = || detect_columns(tokens, &lines.vertical, &region, settings);
    let detect_rows = || detect_rows(tokens, &lines.horizontal, &region, settings);
    let (columns, rows) = if settings.parallel {
        rayon::join(detect_cols, detect_rows)
    } else {
        (detect_cols(), detect_rows())
    };

    let mapping = map_tokens(tokens, &columns, &rows);
    let grid = Grid {
        columns,
        rows,
        cells: mapping.cells,
    };
    (grid, mapping.unassigned)
}

/// Infer a grid from tokens and vector paths. Pure and infallible.
///
/// Tokens and paths outside `region` are ignored. Settings are taken as
/// given; call [`GridSettings::validate`] first for untrusted input.
pub fn extract_grid(
    tokens: &[Token],
    paths: &[PathBox],
    region: &Region,
    settings: &GridSettings,
) -> Grid {
    let tokens = scope_tokens(tokens, region);
    run_grid(&tokens, paths, region, settings).0
}

fn extract_validated<S: PageSource + ?Sized>(
    source: &S,
    page: usize,
    region: &Region,
    settings: &GridSettings,
) -> Result<TableExtraction> {
    region.validate()?;
    let region = Region::new(region.x0, region.y0, region.x1, region.y1);

    let tokens = scope_tokens(&source.tokens(page, &region)?, &region);
    let paths = source.vector_paths(page)?;
    let (grid, unassigned_tokens) = run_grid(&tokens, &paths, &region, settings);

    let meta = ExtractionMeta {
        page,
        region,
        rows_count: grid.rows_count(),
        cols_count: grid.cols_count(),
        zero_tokens: tokens.is_empty(),
        unassigned_tokens,
    };
    debug!(
        page,
        rows = meta.rows_count,
        cols = meta.cols_count,
        cells = grid.cells.len(),
        zero_tokens = meta.zero_tokens,
        "extracted table"
    );
    Ok(TableExtraction { meta, grid })
}

/// Extract the table inside `region` on `page` of a document.
///
/// Settings are validated once here; the document is only consulted for
/// this call's tokens and paths.
pub fn extract<S: PageSource + ?Sized>(
    source: &S,
    page: usize,
    region: &Region,
    settings: &GridSettings,
) -> Result<TableExtraction> {
    settings.validate()?;
    extract_validated(source, page, region, settings)
}

/// Extract several tables concurrently.
///
/// Results keep the order of `requests`. A failing request does not affect
/// the others; invalid settings fail the whole batch.
pub fn extract_batch<S: PageSource + Sync + ?Sized>(
    source: &S,
    requests: &[TableRequest],
    settings: &GridSettings,
) -> Result<Vec<Result<TableExtraction>>> {
    settings.validate()?;
    Ok(requests
        .par_iter()
        .map(|req| extract_validated(source, req.page, &req.region, settings))
        .collect())
}
