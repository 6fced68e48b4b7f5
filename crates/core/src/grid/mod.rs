//! Table grid inference.
//!
//! Reconstructs rows, columns and cells for a caller-supplied region from
//! positioned text tokens and vector path bounding boxes, including edge
//! classification, whitespace-based column detection, visual-line row
//! detection and majority-overlap cell mapping.

mod clustering;
mod columns;
mod finder;
mod lines;
mod mapper;
mod rows;
mod types;

// Re-export public types
pub use types::{
    Cell, ExtractionMeta, Grid, GridSettings, Orientation, PathBox, Region, RowKey, RulingLine,
    RulingLines, TableExtraction, Token,
};

// Re-export public API functions
pub use clustering::{VisualLine, cluster_visual_lines, quantize};
pub use columns::{Gap, closed_gaps, detect_columns, occupancy_mask};
pub use finder::{TableRequest, extract, extract_batch, extract_grid};
pub use lines::{classify_lines, classify_path};
pub use mapper::{CellMapping, map_cells, map_tokens};
pub use rows::{LineGap, detect_rows};
