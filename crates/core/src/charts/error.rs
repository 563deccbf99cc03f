//! Chart error types.

use sheetwise_shared::AppError;
use thiserror::Error;

/// Errors raised while building or rendering a chart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartError {
    /// The company has no stored records.
    #[error("No balance sheet data for '{0}'")]
    NoData(String),

    /// The renderer failed.
    #[error("Failed to render chart: {0}")]
    Render(String),
}

impl From<ChartError> for AppError {
    fn from(err: ChartError) -> Self {
        match err {
            ChartError::NoData(_) => Self::NotFound(err.to_string()),
            ChartError::Render(msg) => Self::Internal(msg),
        }
    }
}
