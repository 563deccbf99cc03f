//! Question answering over stored balance sheets.
//!
//! Records are rendered into a fixed prompt and handed to a
//! [`LanguageModel`]. Failures never reach the caller: they come back as
//! placeholder text.

mod client;
mod error;
mod prompt;

#[cfg(test)]
pub(crate) mod fake;

pub use client::{ChatCompletionClient, extract_reply};
pub use error::LlmError;
pub use prompt::{build_prompt, serialize_context};

use tracing::warn;

use crate::records::FinancialRecord;

/// Placeholder returned when the model sends back no text.
pub const NO_TEXT_PLACEHOLDER: &str = "[No text returned from model]";

/// A text completion collaborator.
pub trait LanguageModel: Send + Sync {
    /// Completes `prompt`, returning the model's reply.
    fn complete(
        &self,
        prompt: &str,
    ) -> impl std::future::Future<Output = Result<String, LlmError>> + Send;
}

/// Answers `question` from `records`.
///
/// Always returns text. A failed call yields
/// `[Error contacting language model: ...]`.
pub async fn answer<L: LanguageModel>(llm: &L, records: &[FinancialRecord], question: &str) -> String {
    let prompt = build_prompt(&serialize_context(records), question);

    match llm.complete(&prompt).await {
        Ok(reply) if reply.trim().is_empty() => NO_TEXT_PLACEHOLDER.to_string(),
        Ok(reply) => reply,
        Err(LlmError::EmptyReply) => NO_TEXT_PLACEHOLDER.to_string(),
        Err(e) => {
            warn!(error = %e, "Language model call failed");
            format!("[Error contacting language model: {e}]")
        }
    }
}
