//! Walks a document's tables and collects parseable rows.

use serde::Serialize;
use tracing::{debug, warn};

use super::source::{RawTable, TableSource};
use super::table::{ColumnMap, ExtractedRow, MIN_COLUMNS};

/// Tables with this many rows or fewer are discarded as spurious.
pub const MIN_TABLE_ROWS_EXCLUSIVE: usize = 2;

/// Lazy iterator over the tables of a document that pass the shape filter.
///
/// Pages are read one at a time as the iterator advances. Once exhausted
/// it stays exhausted.
pub struct RawTables<'a, S: TableSource + ?Sized> {
    source: &'a S,
    next_page: usize,
    pending: std::vec::IntoIter<RawTable>,
}

impl<'a, S: TableSource + ?Sized> RawTables<'a, S> {
    /// Starts iterating `source` from its first page.
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            next_page: 0,
            pending: Vec::new().into_iter(),
        }
    }
}

impl<S: TableSource + ?Sized> Iterator for RawTables<'_, S> {
    type Item = RawTable;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(table) = self.pending.by_ref().find(has_table_shape) {
                return Some(table);
            }
            if self.next_page >= self.source.page_count() {
                return None;
            }

            let page_index = self.next_page;
            self.next_page += 1;
            match self.source.page_tables(page_index) {
                Ok(tables) => self.pending = tables.into_iter(),
                Err(e) => warn!(page_index, error = %e, "Skipping unreadable page"),
            }
        }
    }
}

/// More than two rows, and a header of at least five cells.
fn has_table_shape(table: &RawTable) -> bool {
    table.rows.len() > MIN_TABLE_ROWS_EXCLUSIVE
        && table.header().is_some_and(|header| header.len() >= MIN_COLUMNS)
}

/// What happened to one table that passed the shape filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TableOutcome {
    /// Headers matched; rows were parsed individually.
    Parsed {
        /// Rows that parsed completely.
        accepted: usize,
        /// Rows dropped for a short row or an unreadable year or figure.
        rejected: usize,
    },
    /// The table lacked a header for some required field.
    MissingHeaders {
        /// The unmatched field names.
        fields: Vec<&'static str>,
    },
}

/// Rows gathered from a whole document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Extraction {
    /// Parsed rows, in document order.
    pub rows: Vec<ExtractedRow>,
    /// One outcome per table that passed the shape filter.
    pub tables: Vec<TableOutcome>,
}

impl Extraction {
    /// Tables that passed the shape filter.
    #[must_use]
    pub fn tables_found(&self) -> usize {
        self.tables.len()
    }

    /// Tables whose headers matched.
    #[must_use]
    pub fn tables_used(&self) -> usize {
        self.tables
            .iter()
            .filter(|outcome| matches!(outcome, TableOutcome::Parsed { .. }))
            .count()
    }

    /// Data rows dropped while parsing matched tables.
    #[must_use]
    pub fn rows_rejected(&self) -> usize {
        self.tables
            .iter()
            .map(|outcome| match outcome {
                TableOutcome::Parsed { rejected, .. } => *rejected,
                TableOutcome::MissingHeaders { .. } => 0,
            })
            .sum()
    }
}

/// Extracts balance-sheet rows from every table of `source`.
pub fn extract<S: TableSource + ?Sized>(source: &S) -> Extraction {
    let mut extraction = Extraction::default();

    for (table_index, table) in RawTables::new(source).enumerate() {
        let outcome = extract_table(&table, &mut extraction.rows);
        debug!(table_index, ?outcome, "Processed table");
        extraction.tables.push(outcome);
    }

    extraction
}

fn extract_table(table: &RawTable, rows: &mut Vec<ExtractedRow>) -> TableOutcome {
    let Some(header) = table.header() else {
        return TableOutcome::MissingHeaders {
            fields: super::table::REQUIRED_FIELDS.to_vec(),
        };
    };
    let columns = match ColumnMap::from_header(header) {
        Ok(columns) => columns,
        Err(fields) => return TableOutcome::MissingHeaders { fields },
    };

    let mut accepted = 0;
    let mut rejected = 0;
    for (row_index, row) in table.rows.iter().enumerate().skip(1) {
        if let Some(parsed) = columns.parse_row(row) {
            rows.push(parsed);
            accepted += 1;
        } else {
            debug!(row_index, "Skipping unparseable row");
            rejected += 1;
        }
    }

    TableOutcome::Parsed { accepted, rejected }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::ExtractionError;

    /// Pages of pre-detected tables; listed page indices fail.
    struct FakeSource {
        pages: Vec<Vec<RawTable>>,
        broken_pages: Vec<usize>,
    }

    impl FakeSource {
        fn new(pages: Vec<Vec<RawTable>>) -> Self {
            Self {
                pages,
                broken_pages: Vec::new(),
            }
        }
    }

    impl TableSource for FakeSource {
        fn page_count(&self) -> usize {
            self.pages.len()
        }

        fn page_tables(&self, page_index: usize) -> Result<Vec<RawTable>, ExtractionError> {
            if self.broken_pages.contains(&page_index) {
                return Err(ExtractionError::Page {
                    page: u32::try_from(page_index + 1).unwrap(),
                    message: "corrupt content stream".to_string(),
                });
            }
            Ok(self.pages[page_index].clone())
        }
    }

    fn balance_table(data: &[[&str; 5]]) -> RawTable {
        let mut rows = vec![["Year", "Total Revenue", "Assets", "Liabilities", "Net Profit"]];
        rows.extend_from_slice(data);
        RawTable::from_rows(rows)
    }

    #[test]
    fn test_extracts_rows_across_pages() {
        let source = FakeSource::new(vec![
            vec![balance_table(&[
                ["2022", "220,000", "500,000", "200,000", "30,000"],
                ["2023", "260,000", "520,000", "210,000", "35,000"],
            ])],
            vec![],
            vec![balance_table(&[
                ["2021", "(1,000)", "1", "2", "3"],
                ["2020", "4", "5", "6", "7"],
            ])],
        ]);

        let extraction = extract(&source);

        assert_eq!(extraction.rows.len(), 4);
        assert_eq!(extraction.rows[0].year, 2022);
        assert_eq!(extraction.rows[2].year, 2021);
        assert!((extraction.rows[2].revenue + 1000.0).abs() < f64::EPSILON);
        assert_eq!(extraction.tables_found(), 2);
        assert_eq!(extraction.tables_used(), 2);
        assert_eq!(extraction.rows_rejected(), 0);
    }

    #[test]
    fn test_bad_row_dropped_neighbours_kept() {
        let source = FakeSource::new(vec![vec![balance_table(&[
            ["2022", "1", "2", "3", "4"],
            ["Total", "9", "9", "9", "9"],
            ["2023", "5", "6", "7", "8"],
        ])]]);

        let extraction = extract(&source);

        let years: Vec<i32> = extraction.rows.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2022, 2023]);
        assert_eq!(
            extraction.tables,
            vec![TableOutcome::Parsed {
                accepted: 2,
                rejected: 1
            }]
        );
    }

    #[test]
    fn test_two_row_table_discarded() {
        let source = FakeSource::new(vec![vec![balance_table(&[[
            "2022", "1", "2", "3", "4",
        ]])]]);

        let extraction = extract(&source);

        assert!(extraction.rows.is_empty());
        assert_eq!(extraction.tables_found(), 0);
    }

    #[test]
    fn test_narrow_header_discarded() {
        let table = RawTable::from_rows([
            vec!["Year", "Revenue", "Assets", "Liabilities"],
            vec!["2022", "1", "2", "3"],
            vec!["2023", "1", "2", "3"],
        ]);
        let source = FakeSource::new(vec![vec![table]]);

        assert_eq!(RawTables::new(&source).count(), 0);
    }

    #[test]
    fn test_table_without_required_headers_rejected() {
        let table = RawTable::from_rows([
            ["Segment", "Revenue", "Assets", "Liabilities", "Profit"],
            ["Retail", "1", "2", "3", "4"],
            ["Digital", "1", "2", "3", "4"],
        ]);
        let source = FakeSource::new(vec![vec![table]]);

        let extraction = extract(&source);

        assert!(extraction.rows.is_empty());
        assert_eq!(
            extraction.tables,
            vec![TableOutcome::MissingHeaders {
                fields: vec!["year"]
            }]
        );
        assert_eq!(extraction.tables_used(), 0);
    }

    #[test]
    fn test_unreadable_page_skipped() {
        let mut source = FakeSource::new(vec![
            vec![balance_table(&[["2022", "1", "2", "3", "4"], ["2023", "1", "2", "3", "4"]])],
            vec![balance_table(&[["2024", "1", "2", "3", "4"], ["2025", "1", "2", "3", "4"]])],
        ]);
        source.broken_pages.push(0);

        let extraction = extract(&source);

        let years: Vec<i32> = extraction.rows.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2024, 2025]);
    }

    #[test]
    fn test_iterator_is_not_restartable() {
        let source = FakeSource::new(vec![vec![balance_table(&[
            ["2022", "1", "2", "3", "4"],
            ["2023", "1", "2", "3", "4"],
        ])]]);

        let mut tables = RawTables::new(&source);
        assert!(tables.next().is_some());
        assert!(tables.next().is_none());
        assert!(tables.next().is_none());
    }
}
