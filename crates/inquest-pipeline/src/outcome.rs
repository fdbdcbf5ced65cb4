//! The externally visible result of one invocation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use inquest_metrics::MetricsRecord;
use inquest_safety::SafetyVerdict;

use crate::validate::StructuredAnswer;

/// Terminal result of one `process()` call
///
/// A tagged union over the three outward statuses. Payload presence is
/// tag-dependent: metrics are absent only for `rejected`, and for `error`
/// only when no billed call was made. Never mutated after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum QueryOutcome {
    /// The call completed and the payload validated
    Success {
        /// The schema-validated answer
        response: StructuredAnswer,
        /// Model that served the call
        model: String,
        /// When the outcome was produced
        timestamp: DateTime<Utc>,
        /// Telemetry for the billed call
        metrics: MetricsRecord,
        /// Non-fatal sink faults, surfaced rather than swallowed
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        warnings: Vec<String>,
    },

    /// The safety gate refused the input; no inference call was made
    Rejected {
        /// Human-readable refusal
        reason: String,
        /// The full verdict with evidence
        safety: SafetyVerdict,
        /// When the outcome was produced
        timestamp: DateTime<Utc>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        warnings: Vec<String>,
    },

    /// A fault after the gate: transport, validation, or pricing
    Error {
        /// Human-readable reason
        error: String,
        /// When the outcome was produced
        timestamp: DateTime<Utc>,
        /// Present when the call was billed (validation failures),
        /// absent when no usable token counts exist
        #[serde(default, skip_serializing_if = "Option::is_none")]
        metrics: Option<MetricsRecord>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        warnings: Vec<String>,
    },
}

impl QueryOutcome {
    /// Build a rejected outcome from a verdict
    pub fn rejected(verdict: SafetyVerdict, warnings: Vec<String>) -> Self {
        Self::Rejected {
            reason: verdict.refusal_message().to_string(),
            safety: verdict,
            timestamp: Utc::now(),
            warnings,
        }
    }

    /// Build an error outcome
    pub fn error(error: String, metrics: Option<MetricsRecord>, warnings: Vec<String>) -> Self {
        Self::Error {
            error,
            timestamp: Utc::now(),
            metrics,
            warnings,
        }
    }

    /// The outward status tag
    pub fn status(&self) -> &'static str {
        match self {
            Self::Success { .. } => "success",
            Self::Rejected { .. } => "rejected",
            Self::Error { .. } => "error",
        }
    }

    /// Whether this is a success
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Metrics attached to this outcome, if any
    pub fn metrics(&self) -> Option<&MetricsRecord> {
        match self {
            Self::Success { metrics, .. } => Some(metrics),
            Self::Error { metrics, .. } => metrics.as_ref(),
            Self::Rejected { .. } => None,
        }
    }

    /// Sink warnings attached to this outcome
    pub fn warnings(&self) -> &[String] {
        match self {
            Self::Success { warnings, .. }
            | Self::Rejected { warnings, .. }
            | Self::Error { warnings, .. } => warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_outcome_has_no_metrics() {
        let outcome = QueryOutcome::rejected(SafetyVerdict::safe(), Vec::new());
        assert_eq!(outcome.status(), "rejected");
        assert!(outcome.metrics().is_none());
    }

    #[test]
    fn test_status_tag_serialization() {
        let outcome = QueryOutcome::error("boom".to_string(), None, Vec::new());
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["error"], "boom");
        // Absent metrics are omitted, not null
        assert!(json.get("metrics").is_none());
        assert!(json.get("warnings").is_none());
    }

    #[test]
    fn test_warnings_serialized_when_present() {
        let outcome = QueryOutcome::error(
            "boom".to_string(),
            None,
            vec!["csv sink: disk full".to_string()],
        );
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["warnings"][0], "csv sink: disk full");
    }
}
