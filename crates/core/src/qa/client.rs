//! OpenAI-compatible chat completion client.

use std::time::Duration;

use serde_json::{Value, json};
use sheetwise_shared::config::LlmConfig;
use tracing::debug;

use super::LanguageModel;
use super::error::LlmError;

/// Language model reached over an OpenAI-compatible `/chat/completions` API.
#[derive(Debug, Clone)]
pub struct ChatCompletionClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl ChatCompletionClient {
    /// Builds a client with the configured endpoint, model, and timeout.
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LlmError::Configuration(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        })
    }

    /// The URL requests are posted to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request_body(&self, prompt: &str) -> Value {
        json!({
            "model": &self.model,
            "messages": [
                {"role": "user", "content": prompt}
            ],
            "max_tokens": self.max_tokens,
        })
    }
}

impl LanguageModel for ChatCompletionClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let mut request = self.http.post(&self.endpoint).json(&self.request_body(prompt));
        if !self.api_key.is_empty() {
            request = request.bearer_auth(&self.api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| LlmError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| LlmError::Decode(e.to_string()))?;
        debug!(model = %self.model, "Received completion");

        extract_reply(&body).ok_or(LlmError::EmptyReply)
    }
}

/// Pulls the reply text out of a completion response.
///
/// Accepts `choices[0].message.content` or a top-level `response` string.
/// Blank text counts as no reply.
#[must_use]
pub fn extract_reply(body: &Value) -> Option<String> {
    body.pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .or_else(|| body.get("response").and_then(Value::as_str))
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> LlmConfig {
        LlmConfig {
            base_url: base_url.to_string(),
            api_key: "hf_test".to_string(),
            model: "deepseek-ai/DeepSeek-V3.2-Exp".to_string(),
            max_tokens: 300,
            timeout_secs: 5,
        }
    }

    #[test]
    fn test_endpoint_joins_base_url() {
        let client = ChatCompletionClient::new(&config("https://router.huggingface.co/v1/")).unwrap();
        assert_eq!(client.endpoint(), "https://router.huggingface.co/v1/chat/completions");
    }

    #[test]
    fn test_request_body_shape() {
        let client = ChatCompletionClient::new(&config("http://localhost")).unwrap();

        let body = client.request_body("What was revenue?");

        assert_eq!(body["model"], "deepseek-ai/DeepSeek-V3.2-Exp");
        assert_eq!(body["max_tokens"], 300);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "What was revenue?");
    }

    #[test]
    fn test_extract_chat_reply() {
        let body = json!({
            "choices": [{"message": {"role": "assistant", "content": "  Revenue grew 18%.\n"}}]
        });
        assert_eq!(extract_reply(&body).as_deref(), Some("Revenue grew 18%."));
    }

    #[test]
    fn test_extract_plain_response() {
        let body = json!({"response": "220,000"});
        assert_eq!(extract_reply(&body).as_deref(), Some("220,000"));
    }

    #[test]
    fn test_extract_nothing() {
        assert_eq!(extract_reply(&json!({"choices": []})), None);
        assert_eq!(extract_reply(&json!({"response": "   "})), None);
        assert_eq!(extract_reply(&json!({"choices": [{"message": {"content": null}}]})), None);
    }
}
