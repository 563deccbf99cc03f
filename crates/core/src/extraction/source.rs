//! Page-level table sources.
//!
//! A [`TableSource`] hands back the grids of text cells detected on each
//! page. [`LopdfTableSource`] is the default implementation: it places the
//! strings shown by each page's content stream and groups them into
//! column-aligned tables. Pages where that finds nothing fall back to the
//! page's extracted text, split on tab or multi-space gaps.

use std::path::Path;

use lopdf::{Document, ObjectId};
use tracing::debug;

use super::error::ExtractionError;
use super::layout::{layout_tables, text_runs};

/// A detected table: rows of optional text cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    /// Table rows, header first.
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    /// Creates a table from rows of present cells.
    #[must_use]
    pub fn from_rows<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(|cell| Some(cell.into())).collect())
                .collect(),
        }
    }

    /// Returns the header row, if any.
    #[must_use]
    pub fn header(&self) -> Option<&[Option<String>]> {
        self.rows.first().map(Vec::as_slice)
    }
}

/// Something that can report the tables detected on each page of a document.
pub trait TableSource {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Tables detected on the page at `page_index` (zero-based).
    fn page_tables(&self, page_index: usize) -> Result<Vec<RawTable>, ExtractionError>;
}

/// Table source backed by `lopdf` text extraction.
pub struct LopdfTableSource {
    document: Document,
    pages: Vec<(u32, ObjectId)>,
}

impl std::fmt::Debug for LopdfTableSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LopdfTableSource")
            .field("pages", &self.pages.len())
            .finish_non_exhaustive()
    }
}

impl LopdfTableSource {
    /// Loads a PDF from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ExtractionError> {
        let document =
            Document::load(path.as_ref()).map_err(|e| ExtractionError::Load(e.to_string()))?;
        Ok(Self::from_document(document))
    }

    /// Loads a PDF from memory.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ExtractionError> {
        let document = Document::load_mem(bytes).map_err(|e| ExtractionError::Load(e.to_string()))?;
        Ok(Self::from_document(document))
    }

    fn from_document(document: Document) -> Self {
        let pages = document.get_pages().into_iter().collect();
        Self { document, pages }
    }
}

impl TableSource for LopdfTableSource {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_tables(&self, page_index: usize) -> Result<Vec<RawTable>, ExtractionError> {
        let (page, page_id) = *self
            .pages
            .get(page_index)
            .ok_or(ExtractionError::PageOutOfRange(page_index))?;
        let page_error = |e: lopdf::Error| ExtractionError::Page {
            page,
            message: e.to_string(),
        };

        let content = self
            .document
            .get_and_decode_page_content(page_id)
            .map_err(page_error)?;
        let tables = layout_tables(text_runs(&content.operations));
        if !tables.is_empty() {
            return Ok(tables);
        }

        debug!(page, "No positioned tables, falling back to page text");
        let text = self.document.extract_text(&[page]).map_err(page_error)?;
        Ok(detect_tables(&text))
    }
}

/// Groups consecutive multi-column lines of page text into tables.
///
/// A line is multi-column when it splits into two or more cells on tabs
/// or runs of two or more spaces. Any other line ends the current table.
#[must_use]
pub fn detect_tables(text: &str) -> Vec<RawTable> {
    let mut tables = Vec::new();
    let mut current: Vec<Vec<Option<String>>> = Vec::new();

    for line in text.lines() {
        let cells = split_cells(line);
        if cells.len() >= 2 {
            current.push(cells.into_iter().map(Some).collect());
        } else if !current.is_empty() {
            tables.push(RawTable {
                rows: std::mem::take(&mut current),
            });
        }
    }
    if !current.is_empty() {
        tables.push(RawTable { rows: current });
    }

    tables
}

fn split_cells(line: &str) -> Vec<String> {
    line.split('\t')
        .flat_map(|chunk| chunk.split("  "))
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .map(str::to_string)
        .collect()
}
