//! Document access.
//!
//! Extraction pulls its inputs through [`PageSource`] on every call and
//! keeps no handle to the document afterwards. [`PageDump`] is an in-memory
//! source loaded from a JSON dump of page primitives.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};
use crate::geometry::{HasBBox, normalize_rect, rects_intersect};
use crate::grid::{PathBox, Region, Token};

/// Provider of positioned text and vector path primitives for a page.
pub trait PageSource {
    /// Every text run whose bounding box intersects `region`.
    fn tokens(&self, page: usize, region: &Region) -> Result<Vec<Token>>;

    /// Bounding boxes of all vector paths on the page.
    fn vector_paths(&self, page: usize) -> Result<Vec<PathBox>>;
}

/// Primitives of one page.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PageContent {
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub tokens: Vec<Token>,
    #[serde(default)]
    pub paths: Vec<PathBox>,
}

impl PageContent {
    fn renumber(&mut self) {
        for (i, t) in self.tokens.iter_mut().enumerate() {
            t.sequence_index = i;
        }
    }
}

/// In-memory document made of page dumps.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PageDump {
    pub pages: Vec<PageContent>,
}

impl PageDump {
    pub fn new(pages: Vec<PageContent>) -> Self {
        let mut dump = Self { pages };
        dump.renumber();
        dump
    }

    /// Parse a JSON dump. Token order in the file becomes `sequence_index`.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut dump: PageDump = serde_json::from_reader(reader)?;
        dump.renumber();
        Ok(dump)
    }

    pub fn from_json(s: &str) -> Result<Self> {
        Self::from_reader(s.as_bytes())
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn page(&self, page: usize) -> Result<&PageContent> {
        self.pages.get(page).ok_or(GridError::PageNotFound(page))
    }

    fn renumber(&mut self) {
        for page in &mut self.pages {
            page.renumber();
        }
    }
}

impl PageSource for PageDump {
    fn tokens(&self, page: usize, region: &Region) -> Result<Vec<Token>> {
        let content = self.page(page)?;
        Ok(content
            .tokens
            .iter()
            .filter(|t| rects_intersect(normalize_rect(t.bbox()), region.bbox()))
            .cloned()
            .collect())
    }

    fn vector_paths(&self, page: usize) -> Result<Vec<PathBox>> {
        Ok(self.page(page)?.paths.clone())
    }
}
