//! Grid extraction types and settings.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};
use crate::geometry::{HasBBox, Rect, normalize_rect};

// Default constants
pub(crate) const DEFAULT_MIN_COL_GAP: f64 = 10.0;
pub(crate) const DEFAULT_MIN_ROW_GAP: f64 = 4.0;
pub(crate) const DEFAULT_LINE_SNAP_TOLERANCE: f64 = 2.0;
pub(crate) const DEFAULT_ROW_HEIGHT_RATIO: f64 = 0.8;
pub(crate) const DEFAULT_ROW_CLUSTER_RESOLUTION: f64 = 2.0;
pub(crate) const DEFAULT_LINE_THICKNESS: f64 = 2.0;
pub(crate) const DEFAULT_LINE_MIN_LENGTH: f64 = 5.0;

// Key type for ordered float maps
pub(crate) type KeyF64 = OrderedFloat<f64>;

pub(crate) fn key_f64(v: f64) -> KeyF64 {
    OrderedFloat(v)
}

/// A positioned run of text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    pub text: String,
    /// Position of the token in the collaborator's reading order.
    #[serde(default)]
    pub sequence_index: usize,
}

impl Token {
    pub fn new(
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
        text: impl Into<String>,
        sequence_index: usize,
    ) -> Self {
        Self {
            x0,
            y0,
            x1,
            y1,
            text: text.into(),
            sequence_index,
        }
    }

    /// Bounding box with swapped corners put back in order.
    pub fn normalized_bbox(&self) -> Rect {
        normalize_rect(self.bbox())
    }
}

impl HasBBox for Token {
    fn x0(&self) -> f64 {
        self.x0
    }
    fn y0(&self) -> f64 {
        self.y0
    }
    fn x1(&self) -> f64 {
        self.x1
    }
    fn y1(&self) -> f64 {
        self.y1
    }
}

/// Bounding box of one vector path on the page.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathBox {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl PathBox {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }
}

impl HasBBox for PathBox {
    fn x0(&self) -> f64 {
        self.x0
    }
    fn y0(&self) -> f64 {
        self.y0
    }
    fn x1(&self) -> f64 {
        self.x1
    }
    fn y1(&self) -> f64 {
        self.y1
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A drawn path judged to be a row or column separator.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RulingLine {
    pub orientation: Orientation,
    /// x for vertical lines, y for horizontal lines.
    pub position: f64,
}

/// Classified ruling lines, each axis sorted and duplicate-free.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RulingLines {
    pub vertical: Vec<f64>,
    pub horizontal: Vec<f64>,
}

impl RulingLines {
    pub fn is_empty(&self) -> bool {
        self.vertical.is_empty() && self.horizontal.is_empty()
    }

    /// All lines, vertical first.
    pub fn iter(&self) -> impl Iterator<Item = RulingLine> + '_ {
        let v = self.vertical.iter().map(|&position| RulingLine {
            orientation: Orientation::Vertical,
            position,
        });
        let h = self.horizontal.iter().map(|&position| RulingLine {
            orientation: Orientation::Horizontal,
            position,
        });
        v.chain(h)
    }
}

/// Caller-supplied table extent.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Region {
    /// Build a region, putting swapped corners back in order.
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        let (x0, y0, x1, y1) = normalize_rect((x0, y0, x1, y1));
        Self { x0, y0, x1, y1 }
    }

    pub fn validate(&self) -> Result<()> {
        if [self.x0, self.y0, self.x1, self.y1]
            .iter()
            .all(|v| v.is_finite())
        {
            Ok(())
        } else {
            Err(GridError::InvalidRegion {
                x0: self.x0,
                y0: self.y0,
                x1: self.x1,
                y1: self.y1,
            })
        }
    }
}

impl From<Rect> for Region {
    fn from(r: Rect) -> Self {
        Region::new(r.0, r.1, r.2, r.3)
    }
}

impl HasBBox for Region {
    fn x0(&self) -> f64 {
        self.x0
    }
    fn y0(&self) -> f64 {
        self.y0
    }
    fn x1(&self) -> f64 {
        self.x1
    }
    fn y1(&self) -> f64 {
        self.y1
    }
}

/// One populated grid cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub row_idx: usize,
    pub col_idx: usize,
    pub text: String,
    /// Derived from adjacent boundaries, never from token extents.
    pub bbox: Rect,
}

/// Inferred table structure: boundary sets plus the populated cells.
///
/// Cells are sparse: a grid position with no tokens has no entry.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub columns: Vec<f64>,
    pub rows: Vec<f64>,
    pub cells: Vec<Cell>,
}

impl Grid {
    pub fn cols_count(&self) -> usize {
        self.columns.len().saturating_sub(1)
    }

    pub fn rows_count(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    /// Look up a populated cell by position.
    pub fn cell(&self, row_idx: usize, col_idx: usize) -> Option<&Cell> {
        self.cells
            .iter()
            .find(|c| c.row_idx == row_idx && c.col_idx == col_idx)
    }

    /// Dense row-major view; missing cells are `None`.
    pub fn to_rows(&self) -> Vec<Vec<Option<String>>> {
        let mut out = vec![vec![None; self.cols_count()]; self.rows_count()];
        for cell in &self.cells {
            if let Some(slot) = out
                .get_mut(cell.row_idx)
                .and_then(|row| row.get_mut(cell.col_idx))
            {
                *slot = Some(cell.text.clone());
            }
        }
        out
    }
}

/// Summary of one extraction call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExtractionMeta {
    pub page: usize,
    pub region: Region,
    pub rows_count: usize,
    pub cols_count: usize,
    /// The collaborator supplied no tokens for the region.
    pub zero_tokens: bool,
    /// Tokens with no majority cell.
    pub unassigned_tokens: usize,
}

/// Result of `extract`: the grid plus call metadata.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableExtraction {
    pub meta: ExtractionMeta,
    #[serde(flatten)]
    pub grid: Grid,
}

/// Vertical key used to group tokens into visual lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKey {
    #[default]
    Center,
    Bottom,
}

impl RowKey {
    pub(crate) fn key(self, token: &Token) -> f64 {
        match self {
            RowKey::Center => (token.y0 + token.y1) / 2.0,
            RowKey::Bottom => token.y1,
        }
    }
}

/// Thresholds for grid inference.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridSettings {
    /// Minimum run of unoccupied 1-unit columns that counts as a column break.
    pub min_col_gap: f64,
    /// Minimum vertical gap that counts as a row break absent a ruling line.
    pub min_row_gap: Option<f64>,
    /// Distance a gap edge may be from a vertical ruling line and still snap.
    #[serde(alias = "line_snap_tol")]
    pub line_snap_tolerance: f64,
    /// A gap wider than this fraction of the upper line's mean token height
    /// is a row break.
    pub row_height_ratio: f64,
    /// Quantization step for the visual-line key.
    pub row_cluster_resolution: f64,
    pub row_cluster_key: RowKey,
    /// Paths thinner than this are ruling line candidates.
    pub line_thickness: f64,
    /// Paths must be longer than this to count as ruling lines.
    pub line_min_length: f64,
    /// Run column and row detection on the rayon pool.
    pub parallel: bool,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            min_col_gap: DEFAULT_MIN_COL_GAP,
            min_row_gap: Some(DEFAULT_MIN_ROW_GAP),
            line_snap_tolerance: DEFAULT_LINE_SNAP_TOLERANCE,
            row_height_ratio: DEFAULT_ROW_HEIGHT_RATIO,
            row_cluster_resolution: DEFAULT_ROW_CLUSTER_RESOLUTION,
            row_cluster_key: RowKey::Center,
            line_thickness: DEFAULT_LINE_THICKNESS,
            line_min_length: DEFAULT_LINE_MIN_LENGTH,
            parallel: false,
        }
    }
}

impl GridSettings {
    /// Check every threshold once, at the call boundary.
    pub fn validate(&self) -> Result<()> {
        fn non_negative(name: &'static str, v: f64) -> Result<()> {
            if v.is_finite() && v >= 0.0 {
                Ok(())
            } else {
                Err(GridError::InvalidSetting {
                    name,
                    reason: format!("expected a finite value >= 0, got {v}"),
                })
            }
        }
        fn positive(name: &'static str, v: f64) -> Result<()> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(GridError::InvalidSetting {
                    name,
                    reason: format!("expected a finite value > 0, got {v}"),
                })
            }
        }

        non_negative("min_col_gap", self.min_col_gap)?;
        if let Some(gap) = self.min_row_gap {
            positive("min_row_gap", gap)?;
        }
        non_negative("line_snap_tolerance", self.line_snap_tolerance)?;
        non_negative("row_height_ratio", self.row_height_ratio)?;
        positive("row_cluster_resolution", self.row_cluster_resolution)?;
        positive("line_thickness", self.line_thickness)?;
        non_negative("line_min_length", self.line_min_length)?;
        Ok(())
    }
}
