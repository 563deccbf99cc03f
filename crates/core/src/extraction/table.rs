//! Header matching and row parsing for a single table.

use serde::Serialize;

use super::normalize::{normalize_cell, parse_year};
use crate::records::BalanceFigures;

/// Fields every usable table must have a column for.
pub const REQUIRED_FIELDS: [&str; 5] = ["year", "revenue", "assets", "liabilities", "profit"];

/// Minimum number of cells in a header or data row.
pub const MIN_COLUMNS: usize = 5;

/// One fully parsed data row, not yet assigned to a company.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExtractedRow {
    /// Fiscal year.
    pub year: i32,
    /// Revenue.
    pub revenue: f64,
    /// Total assets.
    pub assets: f64,
    /// Total liabilities.
    pub liabilities: f64,
    /// Profit.
    pub profit: f64,
}

impl ExtractedRow {
    /// Returns the row's figures in store form.
    #[must_use]
    pub const fn figures(&self) -> BalanceFigures {
        BalanceFigures::new(self.revenue, self.assets, self.liabilities, self.profit)
    }
}

/// Column index of each required field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    year: usize,
    revenue: usize,
    assets: usize,
    liabilities: usize,
    profit: usize,
}

impl ColumnMap {
    /// Maps each required field to the first header cell containing its name.
    ///
    /// Headers are trimmed and lower-cased first, so `"Total Revenue"`
    /// matches `revenue`. Fails with the names of the unmatched fields.
    pub fn from_header(header: &[Option<String>]) -> Result<Self, Vec<&'static str>> {
        let labels: Vec<String> = header
            .iter()
            .map(|cell| cell.as_deref().unwrap_or_default().trim().to_lowercase())
            .collect();

        let mut indices = [None; REQUIRED_FIELDS.len()];
        for (slot, field) in indices.iter_mut().zip(REQUIRED_FIELDS) {
            *slot = labels.iter().position(|label| label.contains(field));
        }

        match indices {
            [Some(year), Some(revenue), Some(assets), Some(liabilities), Some(profit)] => Ok(Self {
                year,
                revenue,
                assets,
                liabilities,
                profit,
            }),
            _ => Err(REQUIRED_FIELDS
                .iter()
                .zip(indices)
                .filter(|(_, index)| index.is_none())
                .map(|(field, _)| *field)
                .collect()),
        }
    }

    /// Parses a data row, or `None` if it is too short or any field is unreadable.
    #[must_use]
    pub fn parse_row(&self, row: &[Option<String>]) -> Option<ExtractedRow> {
        if row.len() < MIN_COLUMNS {
            return None;
        }
        let cell = |index: usize| row.get(index).and_then(Option::as_deref);

        Some(ExtractedRow {
            year: parse_year(cell(self.year))?,
            revenue: normalize_cell(cell(self.revenue))?,
            assets: normalize_cell(cell(self.assets))?,
            liabilities: normalize_cell(cell(self.liabilities))?,
            profit: normalize_cell(cell(self.profit))?,
        })
    }
}
