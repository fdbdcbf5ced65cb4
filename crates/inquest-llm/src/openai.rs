//! OpenAI provider implementation

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use crate::{
    error::{LlmError, Result},
    provider::LlmProvider,
    types::{ChatResponse, Message, MessageRole, ModerationVerdict, TokenUsage},
};

const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// OpenAI API provider
///
/// Implements the chat completion call (JSON output mode) and the
/// moderation endpoint.
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    model: String,
    timeout: Duration,
    api_base: String,
}

impl OpenAiProvider {
    /// Create a new OpenAI provider
    ///
    /// # Arguments
    /// * `api_key` - OpenAI API key
    /// * `model` - Model to use, e.g. "gpt-3.5-turbo", "gpt-4"
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(LlmError::config_error("OpenAI API key cannot be empty"));
        }

        Ok(Self {
            client: Client::new(),
            api_key,
            model: model.into(),
            timeout: Duration::from_secs(60),
            api_base: OPENAI_API_BASE.to_string(),
        })
    }

    /// Set request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the API base URL (used by integration tests)
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Convert our messages to OpenAI format
    fn format_messages(&self, messages: &[Message]) -> Vec<OpenAiMessage> {
        messages
            .iter()
            .map(|msg| OpenAiMessage {
                role: match msg.role {
                    MessageRole::System => "system".to_string(),
                    MessageRole::User => "user".to_string(),
                    MessageRole::Assistant => "assistant".to_string(),
                },
                content: msg.content.clone(),
            })
            .collect()
    }

    /// Issue one POST and deserialize the response, with no retries
    async fn post_json<B: Serialize, T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        tracing::debug!("POST {}{}", self.api_base, path);

        let response = self
            .client
            .post(format!("{}{}", self.api_base, path))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .timeout(self.timeout)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout
                } else {
                    LlmError::HttpError(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(LlmError::api_error(format!(
                "API error ({}): {}",
                status, error_text
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| LlmError::parse_error(e.to_string()))
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn chat_json(&self, messages: Vec<Message>) -> Result<ChatResponse> {
        let request = OpenAiChatRequest {
            model: self.model.clone(),
            messages: self.format_messages(&messages),
            temperature: 0.7,
            response_format: ResponseFormat {
                format_type: "json_object".to_string(),
            },
        };

        let response: OpenAiChatResponse = self.post_json("/chat/completions", &request).await?;

        let choice = response
            .choices
            .first()
            .ok_or_else(|| LlmError::parse_error("No choices in response"))?;

        let content = choice
            .message
            .content
            .clone()
            .ok_or_else(|| LlmError::parse_error("No content in response"))?;

        // Token counts are required for cost telemetry; their absence is a
        // contract violation, not something to default to zero.
        let usage = response
            .usage
            .ok_or_else(|| LlmError::parse_error("No usage in response"))?;

        Ok(ChatResponse {
            content,
            model: response.model,
            usage: TokenUsage::new(usage.prompt_tokens, usage.completion_tokens),
        })
    }

    async fn moderate(&self, input: &str) -> Result<ModerationVerdict> {
        let request = OpenAiModerationRequest {
            input: input.to_string(),
        };

        let response: OpenAiModerationResponse = self.post_json("/moderations", &request).await?;

        let result = response
            .results
            .first()
            .ok_or_else(|| LlmError::parse_error("No results in moderation response"))?;

        let mut categories: Vec<String> = result
            .categories
            .iter()
            .filter(|(_, &violated)| violated)
            .map(|(name, _)| name.clone())
            .collect();
        categories.sort();

        Ok(ModerationVerdict {
            flagged: result.flagged,
            categories,
        })
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn name(&self) -> &str {
        "openai"
    }
}

// OpenAI API types

#[derive(Debug, Serialize)]
struct OpenAiChatRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenAiMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAiChatResponse {
    model: String,
    choices: Vec<OpenAiChoice>,
    usage: Option<OpenAiUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Serialize)]
struct OpenAiModerationRequest {
    input: String,
}

#[derive(Debug, Deserialize)]
struct OpenAiModerationResponse {
    results: Vec<OpenAiModerationResult>,
}

#[derive(Debug, Deserialize)]
struct OpenAiModerationResult {
    flagged: bool,
    #[serde(default)]
    categories: HashMap<String, bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_creation() {
        let provider = OpenAiProvider::new("test-key", "gpt-4");
        assert!(provider.is_ok());

        let provider = provider.unwrap();
        assert_eq!(provider.model(), "gpt-4");
        assert_eq!(provider.name(), "openai");
    }

    #[test]
    fn test_empty_api_key() {
        let provider = OpenAiProvider::new("", "gpt-4");
        assert!(provider.is_err());
    }

    #[test]
    fn test_message_formatting() {
        let provider = OpenAiProvider::new("test-key", "gpt-4").unwrap();
        let messages = vec![Message::system("You are helpful"), Message::user("Hello")];

        let formatted = provider.format_messages(&messages);
        assert_eq!(formatted.len(), 2);
        assert_eq!(formatted[0].role, "system");
        assert_eq!(formatted[1].role, "user");
    }

    #[test]
    fn test_with_timeout() {
        let provider = OpenAiProvider::new("test-key", "gpt-4")
            .unwrap()
            .with_timeout(Duration::from_secs(30));
        assert_eq!(provider.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_chat_request_shape() {
        let provider = OpenAiProvider::new("test-key", "gpt-3.5-turbo").unwrap();
        let request = OpenAiChatRequest {
            model: provider.model().to_string(),
            messages: provider.format_messages(&[Message::user("hi")]),
            temperature: 0.7,
            response_format: ResponseFormat {
                format_type: "json_object".to_string(),
            },
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["response_format"]["type"], "json_object");
        assert_eq!(json["model"], "gpt-3.5-turbo");
    }

    #[test]
    fn test_moderation_response_parsing() {
        let raw = r#"{
            "results": [{
                "flagged": true,
                "categories": {
                    "violence": true,
                    "hate": false,
                    "self-harm": true
                }
            }]
        }"#;

        let parsed: OpenAiModerationResponse = serde_json::from_str(raw).unwrap();
        let result = &parsed.results[0];
        assert!(result.flagged);

        let mut violated: Vec<&String> = result
            .categories
            .iter()
            .filter(|(_, &v)| v)
            .map(|(k, _)| k)
            .collect();
        violated.sort();
        assert_eq!(violated, vec!["self-harm", "violence"]);
    }
}
