//! Safety Gate
//!
//! Screens raw user input for adversarial intent before any inference call
//! is made. Two independent signals feed one decision:
//!
//! - a fixed table of heuristic prompt-injection signatures (local, pure)
//! - the remote content moderation capability (network, may be unavailable)
//!
//! Every check appends one entry to the audit log, whatever the verdict.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use inquest_core::ModerationPolicy;
//! use inquest_llm::OpenAiProvider;
//! use inquest_safety::{AuditLog, SafetyChecker};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = Arc::new(OpenAiProvider::new("key", "gpt-3.5-turbo")?);
//! let checker = SafetyChecker::new(
//!     provider,
//!     ModerationPolicy::FailClosed,
//!     AuditLog::new("metrics/safety_log.jsonl"),
//! );
//!
//! let check = checker.check("What is the capital of France?").await;
//! assert!(check.verdict.is_safe);
//! # Ok(())
//! # }
//! ```

pub mod audit;
pub mod checker;
pub mod error;
pub mod moderation;
pub mod patterns;
pub mod verdict;

// Re-exports
pub use audit::{AuditEntry, AuditLog};
pub use checker::{SafetyCheck, SafetyChecker};
pub use error::{Result, SafetyError};
pub use moderation::ModerationGate;
pub use patterns::{scan, PatternMatch};
pub use verdict::{FlagSource, SafetyVerdict};
