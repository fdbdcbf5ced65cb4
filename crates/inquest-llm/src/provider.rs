//! Provider trait definition

use async_trait::async_trait;

use crate::{ChatResponse, Message, ModerationVerdict, Result};

/// Trait for remote model providers
///
/// Implementations cover the two remote capabilities the pipeline uses:
/// one schema-constrained chat completion per invocation, and a content
/// moderation check. Neither call retries internally; a typed failure is
/// returned and retry policy is left to the caller.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send a conversation and wait for the complete response
    ///
    /// Requests machine-structured (JSON) output from the provider.
    /// Exactly one remote call is issued per invocation.
    async fn chat_json(&self, messages: Vec<Message>) -> Result<ChatResponse>;

    /// Run the remote moderation check over raw text
    async fn moderate(&self, input: &str) -> Result<ModerationVerdict>;

    /// Get the model name/identifier
    fn model(&self) -> &str;

    /// Get the provider name
    fn name(&self) -> &str;
}
