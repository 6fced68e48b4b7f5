//! Error types for tablegrid.
//!
//! Grid inference itself never fails; these errors only surface at the call
//! boundary (settings validation, region validation, document access).

use thiserror::Error;

/// Primary error type for table extraction.
#[derive(Error, Debug)]
pub enum GridError {
    #[error("invalid setting `{name}`: {reason}")]
    InvalidSetting { name: &'static str, reason: String },

    #[error("invalid region ({x0}, {y0}, {x1}, {y1}): coordinates must be finite")]
    InvalidRegion { x0: f64, y0: f64, x1: f64, y1: f64 },

    #[error("page not found: {0}")]
    PageNotFound(usize),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience Result type alias for GridError.
pub type Result<T> = std::result::Result<T, GridError>;
