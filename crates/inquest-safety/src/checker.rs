//! Safety decision aggregator
//!
//! Combines the heuristic scan and the moderation verdict into a single
//! decision, applies the configured policy when moderation is down, and
//! appends one audit entry per check.

use std::sync::Arc;

use inquest_core::ModerationPolicy;
use inquest_llm::LlmProvider;

use crate::{
    audit::{AuditEntry, AuditLog},
    moderation::ModerationGate,
    patterns,
    verdict::{FlagSource, SafetyVerdict},
};

/// Result of one safety check
///
/// The verdict is always present; warnings carry sink faults that must
/// reach the caller without changing the decision itself.
#[derive(Debug)]
pub struct SafetyCheck {
    /// The combined decision with evidence
    pub verdict: SafetyVerdict,
    /// Non-fatal faults (audit sink failures)
    pub warnings: Vec<String>,
}

/// Screens input through heuristics and moderation, emitting audit records
pub struct SafetyChecker {
    gate: ModerationGate,
    policy: ModerationPolicy,
    audit: AuditLog,
}

impl SafetyChecker {
    /// Create a checker with the given policy and audit sink
    pub fn new(provider: Arc<dyn LlmProvider>, policy: ModerationPolicy, audit: AuditLog) -> Self {
        Self {
            gate: ModerationGate::new(provider),
            policy,
            audit,
        }
    }

    /// Check one input
    ///
    /// Policy: safe only if no heuristic signature matched and moderation
    /// did not flag the input. When moderation is unavailable the
    /// configured policy decides; fail-closed treats the input as unsafe.
    pub async fn check(&self, text: &str) -> SafetyCheck {
        let heuristic_matches = patterns::scan(text);

        let mut flagged_by = Vec::new();
        if !heuristic_matches.is_empty() {
            flagged_by.push(FlagSource::Heuristic);
        }

        let mut moderation_categories = Vec::new();
        let mut moderation_unavailable = false;

        match self.gate.screen(text).await {
            Ok(verdict) => {
                if verdict.flagged {
                    flagged_by.push(FlagSource::Moderation);
                }
                moderation_categories = verdict.categories;
            }
            Err(e) => {
                moderation_unavailable = true;
                tracing::warn!(
                    "Moderation unavailable, applying {:?} policy: {}",
                    self.policy,
                    e
                );
            }
        }

        let fail_closed_trip =
            moderation_unavailable && self.policy == ModerationPolicy::FailClosed;
        let is_safe = flagged_by.is_empty() && !fail_closed_trip;

        let verdict = SafetyVerdict {
            is_safe,
            flagged_by,
            heuristic_matches,
            moderation_categories,
            moderation_unavailable,
        };

        if !verdict.is_safe {
            tracing::warn!(
                "Unsafe input rejected (flagged_by: {:?}, moderation_unavailable: {})",
                verdict.flagged_by,
                verdict.moderation_unavailable
            );
        }

        // The audit record is written before the verdict is returned so it
        // survives whatever the orchestrator does next
        let mut warnings = Vec::new();
        let entry = AuditEntry::new(text, verdict.clone());
        if let Err(e) = self.audit.append(&entry).await {
            let warning = format!("Safety audit write failed: {}", e);
            tracing::error!("{}", warning);
            warnings.push(warning);
        }

        SafetyCheck { verdict, warnings }
    }
}
