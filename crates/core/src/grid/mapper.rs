//! Token-to-cell assignment.
//!
//! Each token lands in the single cell holding the largest share of its
//! area, provided that share is at least half. Equal shares go to the cell
//! met first in row-major scan order, so a token straddling a boundary is
//! never duplicated.

use std::ops::Range;

use itertools::Itertools;
use tracing::{debug, trace};

use crate::geometry::{Rect, contains_point, overlap_area, rect_area};

use super::types::{Cell, Token};

/// Cells produced by the mapper plus the tokens that found no cell.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CellMapping {
    pub cells: Vec<Cell>,
    pub unassigned: usize,
}

fn cell_bbox(columns: &[f64], rows: &[f64], row: usize, col: usize) -> Rect {
    (columns[col], rows[row], columns[col + 1], rows[row + 1])
}

/// Intervals of `bounds` that can overlap `[lo, hi]` with positive length.
fn interval_span(bounds: &[f64], lo: f64, hi: f64) -> Range<usize> {
    let count = bounds.len().saturating_sub(1);
    let start = bounds.partition_point(|&b| b <= lo).saturating_sub(1);
    let end = bounds.partition_point(|&b| b < hi).min(count);
    start..end.max(start)
}

/// Pick the cell for one token, as `(row, col)`.
fn assign(token: &Token, columns: &[f64], rows: &[f64]) -> Option<(usize, usize)> {
    let bbox = token.normalized_bbox();
    let area = rect_area(bbox);
    if !area.is_finite() {
        return None;
    }
    if area == 0.0 {
        return assign_point(bbox, columns, rows);
    }

    let col_span = interval_span(columns, bbox.0, bbox.2);
    let mut best: Option<((usize, usize), f64)> = None;
    for row in interval_span(rows, bbox.1, bbox.3) {
        for col in col_span.clone() {
            let overlap = overlap_area(bbox, cell_bbox(columns, rows, row, col));
            if best.is_none_or(|(_, b)| overlap > b) {
                best = Some(((row, col), overlap));
            }
        }
    }

    best.filter(|&(_, overlap)| overlap > 0.0 && overlap >= area * 0.5)
        .map(|(pos, _)| pos)
}

/// Zero-area tokens go to the first cell containing their center.
fn assign_point(bbox: Rect, columns: &[f64], rows: &[f64]) -> Option<(usize, usize)> {
    let cx = (bbox.0 + bbox.2) / 2.0;
    let cy = (bbox.1 + bbox.3) / 2.0;
    let n_cols = columns.len().saturating_sub(1);
    let n_rows = rows.len().saturating_sub(1);
    (0..n_rows)
        .cartesian_product(0..n_cols)
        .find(|&(row, col)| contains_point(cell_bbox(columns, rows, row, col), cx, cy))
}

/// Assign tokens to the grid and build the populated cells.
///
/// Cells come out row-major, then column-major; empty cells are skipped.
/// Text inside a cell is ordered by each token's left edge.
pub fn map_tokens(tokens: &[Token], columns: &[f64], rows: &[f64]) -> CellMapping {
    let n_cols = columns.len().saturating_sub(1);
    let n_rows = rows.len().saturating_sub(1);
    let mut buckets: Vec<Vec<&Token>> = vec![Vec::new(); n_rows * n_cols];
    let mut unassigned = 0usize;

    for token in tokens {
        match assign(token, columns, rows) {
            Some((row, col)) => buckets[row * n_cols + col].push(token),
            None => {
                trace!(text = %token.text, index = token.sequence_index, "token has no majority cell");
                unassigned += 1;
            }
        }
    }

    let mut cells = Vec::new();
    for (idx, bucket) in buckets.iter_mut().enumerate() {
        if bucket.is_empty() {
            continue;
        }
        let (row, col) = (idx / n_cols, idx % n_cols);
        bucket.sort_by(|a, b| {
            a.x0.min(a.x1)
                .total_cmp(&b.x0.min(b.x1))
                .then(a.sequence_index.cmp(&b.sequence_index))
        });
        cells.push(Cell {
            row_idx: row,
            col_idx: col,
            text: bucket.iter().map(|t| t.text.as_str()).join(" "),
            bbox: cell_bbox(columns, rows, row, col),
        });
    }

    debug!(
        tokens = tokens.len(),
        cells = cells.len(),
        unassigned,
        "mapped tokens to cells"
    );
    CellMapping { cells, unassigned }
}

/// Assign tokens to the grid defined by `columns` × `rows`.
///
/// Re-mapping boundaries from an earlier extraction against the same tokens
/// reproduces that extraction's cells.
pub fn map_cells(tokens: &[Token], columns: &[f64], rows: &[f64]) -> Vec<Cell> {
    map_tokens(tokens, columns, rows).cells
}
