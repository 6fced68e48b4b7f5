//! tablegrid - table structure reconstruction from positioned text.
//!
//! Given the tokens and vector paths of a page and the bounding region of a
//! table, infers column and row boundaries and maps every token into a grid
//! cell. Document decoding is left to a [`source::PageSource`]
//! implementation; [`render`] draws the result for visual debugging.

pub mod error;
pub mod geometry;
pub mod grid;
pub mod render;
pub mod source;

pub use error::{GridError, Result};
pub use grid::{Grid, GridSettings, Region, TableExtraction, Token, extract, extract_grid};
pub use source::{PageDump, PageSource};
