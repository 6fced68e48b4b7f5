//! Row boundary detection from visual-line clustering and horizontal rulings.
//!
//! Wrapped text inside one logical row has tight leading. A row break shows
//! either a drawn horizontal line between two visual lines or noticeably
//! looser spacing than the upper line's own height suggests.

use itertools::Itertools;
use tracing::{debug, trace};

use super::clustering::{VisualLine, cluster_visual_lines, with_edges};
use super::types::{GridSettings, Region, Token};

/// Decision inputs for two vertically adjacent visual lines.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineGap {
    /// Lower edge of the upper line.
    pub bottom: f64,
    /// Upper edge of the lower line.
    pub top: f64,
    /// Mean token height of the upper line.
    pub upper_height: f64,
}

impl LineGap {
    pub fn between(upper: &VisualLine<'_>, lower: &VisualLine<'_>) -> Self {
        Self {
            bottom: upper.bottom(),
            top: lower.top(),
            upper_height: upper.mean_height(),
        }
    }

    pub fn size(&self) -> f64 {
        self.top - self.bottom
    }

    pub fn midpoint(&self) -> f64 {
        (self.bottom + self.top) / 2.0
    }

    /// A horizontal ruling line lies strictly inside the gap.
    pub fn has_line(&self, h_lines: &[f64]) -> bool {
        h_lines.iter().any(|&h| self.bottom < h && h < self.top)
    }

    pub fn is_row_break(&self, h_lines: &[f64], settings: &GridSettings) -> bool {
        let size = self.size();
        let loose = size > self.upper_height * settings.row_height_ratio;
        let wide = settings.min_row_gap.is_some_and(|min| size >= min);
        self.has_line(h_lines) || loose || wide
    }
}

/// Infer sorted y-boundaries for `region`.
pub fn detect_rows(
    tokens: &[Token],
    h_lines: &[f64],
    region: &Region,
    settings: &GridSettings,
) -> Vec<f64> {
    if region.y1 <= region.y0 {
        return with_edges(Vec::new(), region.y0, region.y1);
    }

    let lines = cluster_visual_lines(
        tokens,
        settings.row_cluster_key,
        settings.row_cluster_resolution,
    );

    let mut dividers = Vec::new();
    for (upper, lower) in lines.iter().tuple_windows() {
        let gap = LineGap::between(upper, lower);
        let accepted = gap.is_row_break(h_lines, settings);
        trace!(
            upper = upper.key,
            lower = lower.key,
            gap = gap.size(),
            accepted,
            "visual line gap"
        );
        if accepted {
            dividers.push(gap.midpoint());
        }
    }

    let rows = with_edges(dividers, region.y0, region.y1);
    debug!(
        visual_lines = lines.len(),
        rows = rows.len() - 1,
        "detected row boundaries"
    );
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(y0: f64, y1: f64, text: &str) -> Token {
        Token::new(0.0, y0, 40.0, y1, text, 0)
    }

    fn settings(min_row_gap: Option<f64>) -> GridSettings {
        GridSettings {
            min_row_gap,
            ..GridSettings::default()
        }
    }

    fn region() -> Region {
        Region::new(0.0, 0.0, 100.0, 100.0)
    }

    #[test]
    fn tight_leading_stays_one_row() {
        let tokens = [tok(10.0, 20.0, "first"), tok(21.0, 31.0, "second")];
        let rows = detect_rows(&tokens, &[], &region(), &settings(Some(4.0)));
        assert_eq!(rows, vec![0.0, 100.0]);
    }

    #[test]
    fn loose_spacing_breaks_row() {
        // Gap 9 > 0.8 * 10.
        let tokens = [tok(10.0, 20.0, "first"), tok(29.0, 39.0, "second")];
        let rows = detect_rows(&tokens, &[], &region(), &settings(None));
        assert_eq!(rows, vec![0.0, 24.5, 100.0]);
    }

    #[test]
    fn min_row_gap_breaks_row() {
        // Gap 5 is below 0.8 * 10 but meets min_row_gap.
        let tokens = [tok(10.0, 20.0, "first"), tok(25.0, 35.0, "second")];
        assert_eq!(
            detect_rows(&tokens, &[], &region(), &settings(None)),
            vec![0.0, 100.0]
        );
        assert_eq!(
            detect_rows(&tokens, &[], &region(), &settings(Some(5.0))),
            vec![0.0, 22.5, 100.0]
        );
    }

    #[test]
    fn ruling_line_between_lines_breaks_row_at_midpoint() {
        // Gap 20..24 is too small on its own; the line at 21 accepts it.
        let tokens = [tok(10.0, 20.0, "first"), tok(24.0, 34.0, "second")];
        assert_eq!(
            detect_rows(&tokens, &[], &region(), &settings(None)),
            vec![0.0, 100.0]
        );
        let rows = detect_rows(&tokens, &[21.0], &region(), &settings(None));
        assert_eq!(rows, vec![0.0, 22.0, 100.0]);
    }

    #[test]
    fn ruling_line_on_token_edge_is_not_between() {
        let tokens = [tok(10.0, 20.0, "first"), tok(21.0, 31.0, "second")];
        let rows = detect_rows(&tokens, &[20.0, 21.0], &region(), &settings(None));
        assert_eq!(rows, vec![0.0, 100.0]);
    }

    #[test]
    fn single_visual_line_is_single_row() {
        let tokens = [tok(10.0, 20.0, "a"), tok(10.2, 20.1, "b")];
        let rows = detect_rows(&tokens, &[], &region(), &settings(Some(1.0)));
        assert_eq!(rows, vec![0.0, 100.0]);
    }

    #[test]
    fn zero_height_region_degenerates_to_edges() {
        let region = Region::new(0.0, 50.0, 100.0, 50.0);
        let tokens = [tok(10.0, 20.0, "a"), tok(60.0, 70.0, "b")];
        let rows = detect_rows(&tokens, &[], &region, &settings(Some(1.0)));
        assert_eq!(rows, vec![50.0, 50.0]);
    }
}
