//! Record store error types.

use sheetwise_shared::AppError;
use thiserror::Error;

/// Errors that can occur in record store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Referenced company does not exist.
    #[error("Company '{0}' not found")]
    CompanyNotFound(String),

    /// Underlying storage failed.
    #[error("Storage error: {0}")]
    Backend(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::CompanyNotFound(_) => Self::NotFound(err.to_string()),
            StoreError::Backend(msg) => Self::Database(msg),
        }
    }
}
