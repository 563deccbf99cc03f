//! Canned language model used by unit tests.

use std::sync::Mutex;

use super::{LanguageModel, LlmError};

/// Returns a canned reply and remembers the last prompt.
pub(crate) struct FakeModel {
    reply: Result<String, LlmError>,
    last_prompt: Mutex<Option<String>>,
}

impl FakeModel {
    pub(crate) fn new(reply: Result<String, LlmError>) -> Self {
        Self {
            reply,
            last_prompt: Mutex::new(None),
        }
    }

    pub(crate) fn replying(text: &str) -> Self {
        Self::new(Ok(text.to_string()))
    }

    pub(crate) fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

impl LanguageModel for FakeModel {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        self.reply.clone()
    }
}
