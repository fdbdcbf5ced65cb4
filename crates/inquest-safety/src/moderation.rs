//! Moderation gate
//!
//! Thin wrapper over the provider's moderation capability. A transport
//! failure comes back as `ModerationUnavailable`; the decision of what
//! that means for the verdict belongs to the checker's configured policy.

use std::sync::Arc;

use inquest_llm::{LlmProvider, ModerationVerdict};

use crate::error::{Result, SafetyError};

/// Gate over the remote content-policy classifier
#[derive(Clone)]
pub struct ModerationGate {
    provider: Arc<dyn LlmProvider>,
}

impl ModerationGate {
    /// Create a gate backed by the given provider
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    /// Screen raw text through the remote moderation capability
    pub async fn screen(&self, text: &str) -> Result<ModerationVerdict> {
        self.provider
            .moderate(text)
            .await
            .map_err(SafetyError::ModerationUnavailable)
    }
}
