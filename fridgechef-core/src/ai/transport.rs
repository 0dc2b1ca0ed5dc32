//! Transport to the OpenRouter chat-completion endpoint.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::types::{ChatMessage, ModelError, ModelReply};

/// Trait for the inference transport, enabling fakes in tests.
///
/// One outbound request per invocation; no retry, no backoff. Retry policy
/// lives one layer up, in the fallback loop. All failures are captured into
/// [`ModelError`] values rather than propagated as panics or foreign error
/// types.
#[async_trait]
pub trait ModelTransport: Send + Sync {
    /// Send one chat-completion request to the named model.
    async fn invoke(
        &self,
        model: &str,
        messages: &[ChatMessage],
        timeout: Duration,
    ) -> Result<ModelReply, ModelError>;
}

/// Transport over the OpenRouter HTTP API.
#[derive(Debug)]
pub struct OpenRouterTransport {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl OpenRouterTransport {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

/// Completion response body. OpenRouter can return an `error` object with
/// any status, including 200, so both halves are optional.
#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    code: Option<serde_json::Value>,
    #[serde(default)]
    message: String,
}

impl ApiError {
    /// The numeric error code, tolerating string-encoded numbers.
    fn numeric_code(&self) -> Option<i64> {
        match &self.code {
            Some(serde_json::Value::Number(n)) => n.as_i64(),
            Some(serde_json::Value::String(s)) => s.parse().ok(),
            _ => None,
        }
    }
}

#[async_trait]
impl ModelTransport for OpenRouterTransport {
    async fn invoke(
        &self,
        model: &str,
        messages: &[ChatMessage],
        timeout: Duration,
    ) -> Result<ModelReply, ModelError> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = CompletionRequest { model, messages };

        tracing::debug!(model, timeout_secs = timeout.as_secs(), "calling inference endpoint");

        let response = match self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .timeout(timeout)
            .json(&request)
            .send()
            .await
        {
            Ok(response) => response,
            // Network failures and timeouts carry no remote code.
            Err(error) => return Err(ModelError::new(None, error.to_string())),
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(error) => return Err(ModelError::new(None, error.to_string())),
        };

        let parsed: CompletionResponse = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(_) if !status.is_success() => {
                // Malformed error body: fall back to the HTTP status.
                return Err(ModelError::new(Some(i64::from(status.as_u16())), body));
            }
            Err(error) => {
                return Err(ModelError::new(
                    None,
                    format!("malformed completion body: {error}"),
                ));
            }
        };

        if let Some(api_error) = parsed.error {
            let code = api_error.numeric_code().or_else(|| {
                (!status.is_success()).then(|| i64::from(status.as_u16()))
            });
            return Err(ModelError::new(code, api_error.message));
        }

        if !status.is_success() {
            return Err(ModelError::new(Some(i64::from(status.as_u16())), body));
        }

        match parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
        {
            Some(content) => Ok(ModelReply { content }),
            None => Err(ModelError::new(None, "no message content in completion")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::types::ImageData;

    #[test]
    fn request_wire_shape() {
        let image = ImageData::new("QUJD", "image/jpeg");
        let messages = vec![ChatMessage::user_with_image("분석해주세요", &image)];
        let request = CompletionRequest {
            model: "google/gemma-3-27b-it:free",
            messages: &messages,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "google/gemma-3-27b-it:free");
        assert_eq!(value["messages"][0]["content"][1]["type"], "image_url");
    }

    #[test]
    fn completion_body_parses_content() {
        let body = r#"{"choices": [{"message": {"role": "assistant", "content": "[\"계란\"]"}}]}"#;
        let parsed: CompletionResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.error.is_none());
        assert_eq!(
            parsed.choices[0].message.content.as_deref(),
            Some("[\"계란\"]")
        );
    }

    #[test]
    fn error_body_parses_numeric_code() {
        let body = r#"{"error": {"code": 429, "message": "Rate limit exceeded"}}"#;
        let parsed: CompletionResponse = serde_json::from_str(body).unwrap();
        let error = parsed.error.unwrap();
        assert_eq!(error.numeric_code(), Some(429));
        assert_eq!(error.message, "Rate limit exceeded");
    }

    #[test]
    fn error_body_parses_string_code() {
        let body = r#"{"error": {"code": "429", "message": "slow down"}}"#;
        let parsed: CompletionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.error.unwrap().numeric_code(), Some(429));
    }

    #[test]
    fn error_body_without_code_is_codeless() {
        let body = r#"{"error": {"message": "upstream hiccup"}}"#;
        let parsed: CompletionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.error.unwrap().numeric_code(), None);
    }
}
