//! Language model error types.

use sheetwise_shared::AppError;
use thiserror::Error;

/// Errors raised by a language model collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LlmError {
    /// The client could not be built from its configuration.
    #[error("invalid language model configuration: {0}")]
    Configuration(String),

    /// The request never produced a response (connect failure, timeout).
    #[error("request failed: {0}")]
    Request(String),

    /// The service answered with a non-success status.
    #[error("service returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, as text.
        body: String,
    },

    /// The response body was not the expected JSON.
    #[error("malformed response: {0}")]
    Decode(String),

    /// The response carried no text.
    #[error("no text returned")]
    EmptyReply,
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Configuration(msg) => Self::Internal(msg),
            other => Self::ExternalService(other.to_string()),
        }
    }
}
