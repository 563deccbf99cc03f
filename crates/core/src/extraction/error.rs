//! Extraction error types.

use sheetwise_shared::AppError;
use thiserror::Error;

/// Errors raised by table sources.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The document could not be opened or parsed.
    #[error("failed to load PDF: {0}")]
    Load(String),

    /// Text could not be extracted from a page.
    #[error("failed to extract page {page}: {message}")]
    Page {
        /// One-based page number.
        page: u32,
        /// Underlying library message.
        message: String,
    },

    /// A page index past the end of the document was requested.
    #[error("page index {0} is out of range")]
    PageOutOfRange(usize),
}

impl From<ExtractionError> for AppError {
    fn from(err: ExtractionError) -> Self {
        Self::ExternalService(err.to_string())
    }
}
