//! Safety audit log
//!
//! JSON-lines append sink recording every safety decision, regardless of
//! verdict. Appends are serialized behind an async mutex so concurrent
//! invocations never interleave records; cross-invocation ordering is not
//! guaranteed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::error::Result;
use crate::verdict::SafetyVerdict;

/// Maximum number of characters of the input kept in an audit entry.
/// Enough for triage without storing full adversarial payloads verbatim.
const PREVIEW_CHARS: usize = 100;

/// One audit record, written whatever the verdict was
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the decision was made (ISO-8601)
    pub timestamp: DateTime<Utc>,
    /// Bounded preview of the screened input
    pub prompt_preview: String,
    /// The full verdict with evidence
    pub verdict: SafetyVerdict,
}

impl AuditEntry {
    /// Build an entry for the given input and verdict
    pub fn new(prompt: &str, verdict: SafetyVerdict) -> Self {
        Self {
            timestamp: Utc::now(),
            prompt_preview: preview(prompt, PREVIEW_CHARS),
            verdict,
        }
    }
}

/// Truncate to at most `max` characters, marking the cut with an ellipsis
pub fn preview(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let truncated: String = text.chars().take(max).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}

/// Append-only safety audit sink
#[derive(Clone)]
pub struct AuditLog {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl AuditLog {
    /// Create a sink writing to the given path
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// Path this sink writes to
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry as a single JSON line
    pub async fn append(&self, entry: &AuditEntry) -> Result<()> {
        let mut line = serde_json::to_string(entry)?;
        line.push('\n');

        let _guard = self.lock.lock().await;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;

        // One write call per record keeps appends atomic with respect to
        // other invocations holding the same lock
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        tracing::debug!("Audit entry appended to {}", self.path.display());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_short_input_unchanged() {
        assert_eq!(preview("short", 100), "short");
    }

    #[test]
    fn test_preview_truncates_long_input() {
        let long = "x".repeat(150);
        let p = preview(&long, 100);
        assert_eq!(p.chars().count(), 103);
        assert!(p.ends_with("..."));
    }

    #[test]
    fn test_preview_multibyte_safe() {
        let text = "é".repeat(120);
        let p = preview(&text, 100);
        assert!(p.ends_with("..."));
        assert_eq!(p.chars().count(), 103);
    }

    #[tokio::test]
    async fn test_append_writes_one_line_per_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");
        let log = AuditLog::new(&path);

        let entry = AuditEntry::new("test prompt", SafetyVerdict::safe());
        log.append(&entry).await.unwrap();
        log.append(&entry).await.unwrap();

        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        // Each line parses independently
        for line in lines {
            let parsed: AuditEntry = serde_json::from_str(line).unwrap();
            assert!(parsed.verdict.is_safe);
            assert_eq!(parsed.prompt_preview, "test prompt");
        }
    }

    #[tokio::test]
    async fn test_append_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("audit.jsonl");
        let log = AuditLog::new(&path);

        let entry = AuditEntry::new("q", SafetyVerdict::safe());
        log.append(&entry).await.unwrap();

        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_concurrent_appends_do_not_interleave() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");
        let log = AuditLog::new(&path);

        let mut handles = Vec::new();
        for i in 0..20 {
            let log = log.clone();
            handles.push(tokio::spawn(async move {
                let entry = AuditEntry::new(&format!("prompt {}", i), SafetyVerdict::safe());
                log.append(&entry).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 20);
        for line in lines {
            assert!(serde_json::from_str::<AuditEntry>(line).is_ok());
        }
    }
}
