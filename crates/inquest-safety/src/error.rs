//! Error types for the safety gate

/// Result type for safety operations
pub type Result<T> = std::result::Result<T, SafetyError>;

/// Errors that can occur in the safety gate
#[derive(Debug, thiserror::Error)]
pub enum SafetyError {
    /// The remote moderation dependency could not be reached or answered
    /// with garbage. The caller resolves this via the configured
    /// fail-open/fail-closed policy; it is never silently treated as a
    /// safe or unsafe verdict here.
    #[error("Moderation unavailable: {0}")]
    ModerationUnavailable(#[source] inquest_llm::LlmError),

    /// Audit log write failed
    #[error("Audit log write failed: {0}")]
    AuditWrite(#[from] std::io::Error),

    /// Audit entry could not be serialized
    #[error("Audit serialization failed: {0}")]
    AuditSerialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moderation_unavailable_display() {
        let err = SafetyError::ModerationUnavailable(inquest_llm::LlmError::Timeout);
        assert!(err.to_string().contains("Moderation unavailable"));
    }
}
