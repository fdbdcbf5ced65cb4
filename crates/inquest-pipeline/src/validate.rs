//! Response validation
//!
//! Parses the raw textual payload returned by the model and checks it
//! against the expected schema. Unknown confidence values are never
//! coerced to a default; that would silently misrepresent model
//! certainty.

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};

/// Closed set of confidence levels the model may report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// The schema-validated answer payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredAnswer {
    /// Kind of question, e.g. "factual", "analytical"
    pub question_type: String,
    /// The answer itself
    pub answer: String,
    /// Model-reported confidence
    pub confidence: Confidence,
    /// Any relevant additional information (may be empty)
    pub additional_context: String,
}

impl StructuredAnswer {
    /// Parse and validate a raw payload
    ///
    /// Requires `question_type` (non-empty), `answer` (non-empty),
    /// `confidence` in {high, medium, low}, and `additional_context`
    /// (a string, possibly empty). Anything else is `MalformedResponse`
    /// carrying the raw payload.
    pub fn parse(raw: &str) -> Result<Self> {
        let answer: StructuredAnswer =
            serde_json::from_str(raw).map_err(|e| PipelineError::MalformedResponse {
                detail: e.to_string(),
                raw: raw.to_string(),
            })?;

        if answer.question_type.trim().is_empty() {
            return Err(PipelineError::MalformedResponse {
                detail: "question_type must be a non-empty string".to_string(),
                raw: raw.to_string(),
            });
        }

        if answer.answer.trim().is_empty() {
            return Err(PipelineError::MalformedResponse {
                detail: "answer must be a non-empty string".to_string(),
                raw: raw.to_string(),
            });
        }

        Ok(answer)
    }
}
