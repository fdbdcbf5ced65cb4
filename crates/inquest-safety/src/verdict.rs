//! Safety verdicts

use serde::{Deserialize, Serialize};

use crate::patterns::PatternMatch;

/// Which signal flagged the input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagSource {
    /// The local heuristic signature table
    Heuristic,
    /// The remote moderation capability
    Moderation,
}

/// The combined safety decision for one invocation
///
/// Created once by the safety checker and never mutated afterward; it is
/// only serialized into the audit log and the rejected outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyVerdict {
    /// Overall decision: safe to forward to inference
    pub is_safe: bool,
    /// Which signals flagged the input (empty when clean)
    pub flagged_by: Vec<FlagSource>,
    /// Heuristic hits, in signature-table order
    pub heuristic_matches: Vec<PatternMatch>,
    /// Violated moderation category names
    pub moderation_categories: Vec<String>,
    /// The moderation dependency could not be consulted
    pub moderation_unavailable: bool,
}

impl SafetyVerdict {
    /// A verdict for input that passed both signals
    pub fn safe() -> Self {
        Self {
            is_safe: true,
            flagged_by: Vec::new(),
            heuristic_matches: Vec::new(),
            moderation_categories: Vec::new(),
            moderation_unavailable: false,
        }
    }

    /// Whether a given signal flagged the input
    pub fn is_flagged_by(&self, source: FlagSource) -> bool {
        self.flagged_by.contains(&source)
    }

    /// Human-readable refusal message for an unsafe verdict
    ///
    /// Chosen by which signal flagged the input; the moderation message
    /// wins when both fired.
    pub fn refusal_message(&self) -> &'static str {
        if self.is_flagged_by(FlagSource::Moderation) {
            return "I cannot process this request as it contains content that violates \
                    the provider's usage policies. Please rephrase your question.";
        }

        if self.is_flagged_by(FlagSource::Heuristic) {
            return "I detected a potential prompt injection attempt. I'm designed to \
                    assist with legitimate questions. Please ask a genuine question.";
        }

        "This prompt cannot be processed due to safety concerns."
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_verdict() {
        let verdict = SafetyVerdict::safe();
        assert!(verdict.is_safe);
        assert!(verdict.flagged_by.is_empty());
        assert!(!verdict.moderation_unavailable);
    }

    #[test]
    fn test_refusal_message_prefers_moderation() {
        let verdict = SafetyVerdict {
            is_safe: false,
            flagged_by: vec![FlagSource::Heuristic, FlagSource::Moderation],
            heuristic_matches: Vec::new(),
            moderation_categories: vec!["violence".to_string()],
            moderation_unavailable: false,
        };
        assert!(verdict.refusal_message().contains("usage policies"));
    }

    #[test]
    fn test_refusal_message_heuristic() {
        let verdict = SafetyVerdict {
            is_safe: false,
            flagged_by: vec![FlagSource::Heuristic],
            heuristic_matches: Vec::new(),
            moderation_categories: Vec::new(),
            moderation_unavailable: false,
        };
        assert!(verdict.refusal_message().contains("prompt injection"));
    }

    #[test]
    fn test_refusal_message_fallback() {
        // Fail-closed with moderation down and no heuristic hits
        let verdict = SafetyVerdict {
            is_safe: false,
            flagged_by: Vec::new(),
            heuristic_matches: Vec::new(),
            moderation_categories: Vec::new(),
            moderation_unavailable: true,
        };
        assert!(verdict.refusal_message().contains("safety concerns"));
    }

    #[test]
    fn test_verdict_serialization() {
        let verdict = SafetyVerdict {
            is_safe: false,
            flagged_by: vec![FlagSource::Heuristic],
            heuristic_matches: Vec::new(),
            moderation_categories: Vec::new(),
            moderation_unavailable: false,
        };

        let json = serde_json::to_string(&verdict).unwrap();
        assert!(json.contains("\"heuristic\""));

        let deserialized: SafetyVerdict = serde_json::from_str(&json).unwrap();
        assert!(!deserialized.is_safe);
        assert_eq!(deserialized.flagged_by, vec![FlagSource::Heuristic]);
    }
}
