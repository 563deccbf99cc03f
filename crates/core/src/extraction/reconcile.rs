//! Writes extracted rows to the record store for one company.

use std::future::Future;
use std::sync::Arc;

use serde::Serialize;
use sheetwise_shared::AppError;
use thiserror::Error;
use tracing::{info, warn};

use super::error::ExtractionError;
use super::extractor::Extraction;
use super::table::ExtractedRow;
use crate::access::{AccessError, upload_target};
use crate::auth::Principal;
use crate::records::{RecordStore, StoreError};

/// Errors that stop an ingest run.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The principal may not write to the requested company.
    #[error(transparent)]
    Access(#[from] AccessError),

    /// The target company does not exist.
    #[error("Company {0} not found")]
    CompanyNotFound(i32),

    /// The record store failed while resolving the target.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The document could not be read. Ingest reports an empty summary.
    #[error(transparent)]
    Unreadable(ExtractionError),

    /// The document could not be staged for reading.
    #[error("failed to stage document: {0}")]
    Io(String),
}

impl From<IngestError> for AppError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::Access(e) => e.into(),
            IngestError::CompanyNotFound(id) => Self::NotFound(format!("Company {id} not found")),
            IngestError::Store(e) => e.into(),
            IngestError::Unreadable(e) => e.into(),
            IngestError::Io(msg) => Self::Internal(msg),
        }
    }
}

/// Counts from one reconcile pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileSummary {
    /// Rows upserted.
    pub accepted: usize,
    /// Rows the store refused.
    pub rejected: usize,
}

/// Summary of a whole ingest run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IngestSummary {
    /// Company every row was written to.
    pub company_id: i32,
    /// Tables that passed the shape filter.
    pub tables_found: usize,
    /// Tables whose headers matched.
    pub tables_used: usize,
    /// Rows upserted.
    pub rows_accepted: usize,
    /// Rows dropped during parsing or refused by the store.
    pub rows_rejected: usize,
}

impl IngestSummary {
    /// Combines extraction statistics with the reconcile counts.
    #[must_use]
    pub fn new(company_id: i32, extraction: &Extraction, reconciled: ReconcileSummary) -> Self {
        Self {
            company_id,
            tables_found: extraction.tables_found(),
            tables_used: extraction.tables_used(),
            rows_accepted: reconciled.accepted,
            rows_rejected: extraction.rows_rejected() + reconciled.rejected,
        }
    }

    /// Summary for a document that could not be read at all.
    #[must_use]
    pub const fn unreadable(company_id: i32) -> Self {
        Self {
            company_id,
            tables_found: 0,
            tables_used: 0,
            rows_accepted: 0,
            rows_rejected: 0,
        }
    }
}

/// Upserts extracted rows, one at a time, into a record store.
pub struct Reconciler<S: RecordStore> {
    store: Arc<S>,
}

impl<S: RecordStore> Reconciler<S> {
    /// Creates a reconciler over `store`.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Stamps every row with `company_id` and upserts it.
    ///
    /// A refused row is counted and skipped. Rows written before it stay
    /// written.
    pub async fn reconcile(&self, rows: &[ExtractedRow], company_id: i32) -> ReconcileSummary {
        let mut summary = ReconcileSummary::default();

        for row in rows {
            match self.store.upsert(company_id, row.year, row.figures()).await {
                Ok(()) => summary.accepted += 1,
                Err(e) => {
                    warn!(company_id, year = row.year, error = %e, "Failed to store extracted row");
                    summary.rejected += 1;
                }
            }
        }

        info!(
            company_id,
            accepted = summary.accepted,
            rejected = summary.rejected,
            "Reconciled extracted rows"
        );
        summary
    }

    /// Resolves the target company, reads the document, and stores the
    /// parsed rows.
    ///
    /// `read` runs only once the target is known to exist and is given its
    /// id. A document it reports as [`IngestError::Unreadable`] yields an
    /// empty summary; any other error ends the run.
    pub async fn ingest<F, Fut>(
        &self,
        user: &Principal,
        requested_company: Option<i32>,
        read: F,
    ) -> Result<IngestSummary, IngestError>
    where
        F: FnOnce(i32) -> Fut,
        Fut: Future<Output = Result<Extraction, IngestError>>,
    {
        let company_id = upload_target(user, requested_company)?;
        if self.store.find_company(company_id).await?.is_none() {
            return Err(IngestError::CompanyNotFound(company_id));
        }

        let extraction = match read(company_id).await {
            Ok(extraction) => extraction,
            Err(IngestError::Unreadable(e)) => {
                warn!(company_id, error = %e, "Could not read uploaded document");
                return Ok(IngestSummary::unreadable(company_id));
            }
            Err(e) => return Err(e),
        };
        if extraction.rows.is_empty() {
            info!(company_id, tables = extraction.tables_found(), "No valid balance sheet rows found");
        }

        let reconciled = self.reconcile(&extraction.rows, company_id).await;
        Ok(IngestSummary::new(company_id, &extraction, reconciled))
    }
}
