//! Ruling line classification.
//!
//! Vector paths reported for the page are reduced to single coordinates:
//! thin tall paths become vertical lines (x), thin wide paths become
//! horizontal lines (y). Everything else is not boundary evidence.

use tracing::debug;

use crate::geometry::{HasBBox, normalize_rect, rects_intersect};

use super::clustering::sort_dedup;
use super::types::{GridSettings, Orientation, PathBox, Region, RulingLines};

/// Classify a single path bounding box, ignoring the region.
pub fn classify_path(path: &PathBox, settings: &GridSettings) -> Option<(Orientation, f64)> {
    let (x0, y0, x1, y1) = normalize_rect(path.bbox());
    let width = x1 - x0;
    let height = y1 - y0;
    if width < settings.line_thickness && height > settings.line_min_length {
        Some((Orientation::Vertical, x0))
    } else if height < settings.line_thickness && width > settings.line_min_length {
        Some((Orientation::Horizontal, y0))
    } else {
        None
    }
}

/// Separate paths intersecting `region` into vertical and horizontal lines.
pub fn classify_lines(paths: &[PathBox], region: &Region, settings: &GridSettings) -> RulingLines {
    let mut lines = RulingLines::default();
    for path in paths {
        if !rects_intersect(normalize_rect(path.bbox()), region.bbox()) {
            continue;
        }
        match classify_path(path, settings) {
            Some((Orientation::Vertical, x)) => lines.vertical.push(x),
            Some((Orientation::Horizontal, y)) => lines.horizontal.push(y),
            None => {}
        }
    }

    sort_dedup(&mut lines.vertical);
    sort_dedup(&mut lines.horizontal);
    debug!(
        paths = paths.len(),
        vertical = lines.vertical.len(),
        horizontal = lines.horizontal.len(),
        "classified ruling lines"
    );
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::types::RulingLine;

    fn region() -> Region {
        Region::new(0.0, 0.0, 100.0, 100.0)
    }

    #[test]
    fn thin_tall_path_is_vertical() {
        let paths = [PathBox::new(30.0, 10.0, 30.5, 90.0)];
        let lines = classify_lines(&paths, &region(), &GridSettings::default());
        assert_eq!(lines.vertical, vec![30.0]);
        assert!(lines.horizontal.is_empty());
    }

    #[test]
    fn thin_wide_path_is_horizontal() {
        let paths = [PathBox::new(0.0, 42.0, 100.0, 42.0)];
        let lines = classify_lines(&paths, &region(), &GridSettings::default());
        assert_eq!(lines.horizontal, vec![42.0]);
        assert!(lines.vertical.is_empty());
    }

    #[test]
    fn squares_short_strokes_and_diagonals_are_dropped() {
        let paths = [
            // near-square mark
            PathBox::new(10.0, 10.0, 11.5, 11.5),
            // short vertical stroke
            PathBox::new(20.0, 10.0, 20.0, 14.0),
            // diagonal: bbox is wide in both directions
            PathBox::new(0.0, 0.0, 50.0, 50.0),
        ];
        let lines = classify_lines(&paths, &region(), &GridSettings::default());
        assert!(lines.is_empty());
    }

    #[test]
    fn paths_outside_region_are_dropped() {
        let paths = [
            PathBox::new(150.0, 0.0, 150.0, 100.0),
            PathBox::new(0.0, -20.0, 100.0, -20.0),
        ];
        let lines = classify_lines(&paths, &region(), &GridSettings::default());
        assert!(lines.is_empty());
    }

    #[test]
    fn duplicates_collapse_and_output_is_sorted() {
        let paths = [
            PathBox::new(60.0, 0.0, 60.0, 100.0),
            PathBox::new(20.0, 0.0, 20.0, 50.0),
            PathBox::new(60.0, 50.0, 60.0, 100.0),
        ];
        let lines = classify_lines(&paths, &region(), &GridSettings::default());
        assert_eq!(lines.vertical, vec![20.0, 60.0]);
    }

    #[test]
    fn iter_yields_vertical_then_horizontal() {
        let paths = [
            PathBox::new(0.0, 42.0, 100.0, 42.0),
            PathBox::new(30.0, 10.0, 30.0, 90.0),
        ];
        let lines = classify_lines(&paths, &region(), &GridSettings::default());
        let all: Vec<RulingLine> = lines.iter().collect();
        assert_eq!(
            all,
            vec![
                RulingLine {
                    orientation: Orientation::Vertical,
                    position: 30.0
                },
                RulingLine {
                    orientation: Orientation::Horizontal,
                    position: 42.0
                },
            ]
        );
    }

    #[test]
    fn empty_input_is_not_an_error() {
        let lines = classify_lines(&[], &region(), &GridSettings::default());
        assert_eq!(lines, RulingLines::default());
    }
}
