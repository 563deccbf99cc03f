//! Query error types.

use sheetwise_shared::AppError;
use thiserror::Error;

use crate::charts::ChartError;
use crate::records::StoreError;

/// Errors raised by [`super::QueryService`].
#[derive(Debug, Error)]
pub enum QueryError {
    /// The question was blank.
    #[error("question must not be empty")]
    EmptyQuestion,

    /// The company does not exist or is not visible to the caller.
    #[error("Company {0} not found")]
    CompanyNotFound(i32),

    /// Chart preparation failed.
    #[error(transparent)]
    Chart(#[from] ChartError),

    /// The record store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<QueryError> for AppError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::EmptyQuestion => Self::Validation(err.to_string()),
            QueryError::CompanyNotFound(_) => Self::NotFound(err.to_string()),
            QueryError::Chart(e) => e.into(),
            QueryError::Store(e) => e.into(),
        }
    }
}
