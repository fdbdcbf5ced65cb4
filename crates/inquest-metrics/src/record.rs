//! The metrics record written once per billed invocation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use inquest_llm::TokenUsage;

/// Characters of the question kept in the record
const PREVIEW_CHARS: usize = 50;

/// One row of cost/performance telemetry
///
/// `total_tokens` is always recomputed from the two counts; an
/// upstream-reported total is never trusted. Field order here fixes the
/// CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecord {
    /// When the record was created (ISO-8601)
    pub timestamp: DateTime<Utc>,
    /// Tokens in the prompt
    pub tokens_prompt: u32,
    /// Tokens in the completion
    pub tokens_completion: u32,
    /// Recomputed sum of the two counts
    pub total_tokens: u32,
    /// Wall-clock latency of the remote call
    pub latency_ms: u64,
    /// Estimated cost in USD
    pub estimated_cost: f64,
    /// Model that served the call
    pub model: String,
    /// First 50 characters of the question
    pub question_preview: String,
}

impl MetricsRecord {
    /// Build a record for one billed call
    pub fn new(
        model: impl Into<String>,
        usage: TokenUsage,
        latency_ms: u64,
        estimated_cost: f64,
        question: &str,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            tokens_prompt: usage.prompt_tokens,
            tokens_completion: usage.completion_tokens,
            total_tokens: usage.prompt_tokens + usage.completion_tokens,
            latency_ms,
            estimated_cost,
            model: model.into(),
            question_preview: preview(question),
        }
    }
}

fn preview(question: &str) -> String {
    if question.chars().count() > PREVIEW_CHARS {
        let truncated: String = question.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", truncated)
    } else {
        question.to_string()
    }
}
