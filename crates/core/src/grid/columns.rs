//! Column boundary detection from whitespace rivers and vertical rulings.
//!
//! The region's horizontal extent is rasterized into 1-unit slots. Slots
//! covered by any token are occupied; maximal runs of free slots closed on
//! the right by an occupied slot are gaps. A gap becomes a column boundary when a vertical
//! ruling line falls inside it (snapping the boundary to that line) or when
//! it is at least `min_col_gap` slots wide (boundary at its midpoint).

use tracing::{debug, trace};

use super::clustering::with_edges;
use super::types::{GridSettings, Region, Token};

/// A run of free occupancy slots, `start..end` relative to the region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Gap {
    pub start: usize,
    pub end: usize,
}

impl Gap {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Number of whole 1-unit slots spanning the region.
fn slot_count(region: &Region) -> usize {
    let width = region.x1 - region.x0;
    if width.is_finite() && width > 0.0 {
        width as usize
    } else {
        0
    }
}

/// Mark every slot covered by at least one token's horizontal span.
pub fn occupancy_mask(tokens: &[Token], region: &Region) -> Vec<bool> {
    let width = slot_count(region);
    let mut mask = vec![false; width];
    for t in tokens {
        let (left, right) = (t.x0.min(t.x1), t.x0.max(t.x1));
        let lo = (left - region.x0).max(0.0) as usize;
        let hi = (right - region.x0).min(width as f64).max(0.0) as usize;
        if lo < hi {
            mask[lo..hi].fill(true);
        }
    }
    mask
}

/// Free runs closed on the right by an occupied slot.
///
/// A run still open at the end of the mask has no token to its right and is
/// not a gap.
pub fn closed_gaps(mask: &[bool]) -> Vec<Gap> {
    let mut gaps = Vec::new();
    let mut start: Option<usize> = None;
    for (i, &occupied) in mask.iter().enumerate() {
        if !occupied {
            if start.is_none() {
                start = Some(i);
            }
        } else if let Some(s) = start.take() {
            gaps.push(Gap { start: s, end: i });
        }
    }
    gaps
}

/// Infer sorted x-boundaries for `region`.
///
/// `v_lines` must be sorted ascending, as produced by the line classifier.
pub fn detect_columns(
    tokens: &[Token],
    v_lines: &[f64],
    region: &Region,
    settings: &GridSettings,
) -> Vec<f64> {
    let mask = occupancy_mask(tokens, region);
    if mask.is_empty() {
        return with_edges(Vec::new(), region.x0, region.x1);
    }

    let tol = settings.line_snap_tolerance;
    let mut dividers = Vec::new();
    for gap in closed_gaps(&mask) {
        let abs_start = region.x0 + gap.start as f64;
        let abs_end = region.x0 + gap.end as f64;
        let snap_line = v_lines
            .iter()
            .copied()
            .find(|&v| abs_start - tol <= v && v <= abs_end + tol);
        let is_wide = gap.len() as f64 >= settings.min_col_gap;

        let divider = match snap_line {
            Some(line) => Some(line),
            None if is_wide => Some((abs_start + abs_end) / 2.0),
            None => None,
        };
        trace!(
            start = abs_start,
            end = abs_end,
            snap = ?snap_line,
            is_wide,
            "column gap"
        );
        if let Some(x) = divider {
            dividers.push(x);
        }
    }

    let columns = with_edges(dividers, region.x0, region.x1);
    debug!(columns = columns.len() - 1, "detected column boundaries");
    columns
}
