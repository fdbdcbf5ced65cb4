//! Common types for remote model interactions

use serde::{Deserialize, Serialize};

/// Role of a message in a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System message (instructions)
    System,
    /// User message
    User,
    /// Assistant message (model response)
    Assistant,
}

/// A message in a conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender
    pub role: MessageRole,
    /// Content of the message
    pub content: String,
}

impl Message {
    /// Create a new message
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }
}

/// Response from a completed chat call
#[derive(Debug, Clone)]
pub struct ChatResponse {
    /// The generated content (expected to be a JSON document)
    pub content: String,
    /// Model that generated the response
    pub model: String,
    /// Token usage reported by the provider
    pub usage: TokenUsage,
}

/// Token usage information
///
/// Only the prompt and completion counts are carried; the pipeline always
/// recomputes the total itself rather than trusting an upstream sum.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Number of tokens in the prompt
    pub prompt_tokens: u32,
    /// Number of tokens in the completion
    pub completion_tokens: u32,
}

impl TokenUsage {
    /// Create a new usage record
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
        }
    }
}

/// Verdict from the remote moderation capability
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModerationVerdict {
    /// Whether the content was flagged
    pub flagged: bool,
    /// Names of the violated categories (empty when not flagged)
    pub categories: Vec<String>,
}

impl ModerationVerdict {
    /// A clean verdict with no violations
    pub fn clean() -> Self {
        Self {
            flagged: false,
            categories: Vec::new(),
        }
    }

    /// A flagged verdict with the given violated categories
    pub fn flagged(categories: Vec<String>) -> Self {
        Self {
            flagged: true,
            categories,
        }
    }
}
