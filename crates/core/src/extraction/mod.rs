//! Balance-sheet extraction from PDF reports.
//!
//! This module provides:
//! - Table sources that report the grids detected on each page
//! - Positioned-text layout that groups page strings into tables
//! - Figure normalization for printed accounting numbers
//! - Header matching and per-row parsing
//! - A reconciler that writes parsed rows to the record store

mod error;
mod extractor;
mod layout;
mod normalize;
mod reconcile;
mod source;
mod table;

#[cfg(test)]
mod normalize_props;

pub use error::ExtractionError;
pub use extractor::{Extraction, MIN_TABLE_ROWS_EXCLUSIVE, RawTables, TableOutcome, extract};
pub use layout::{TextRun, layout_tables, text_runs};
pub use normalize::{normalize, normalize_cell, parse_year};
pub use reconcile::{IngestError, IngestSummary, ReconcileSummary, Reconciler};
pub use source::{LopdfTableSource, RawTable, TableSource, detect_tables};
pub use table::{ColumnMap, ExtractedRow, MIN_COLUMNS, REQUIRED_FIELDS};
