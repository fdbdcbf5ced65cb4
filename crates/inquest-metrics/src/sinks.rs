//! Durable metrics sinks
//!
//! Two independent append-only sinks: a CSV file (header written once,
//! one row per record) and a JSON-lines file (one document per record).
//! Each append happens as a single write under an async mutex so records
//! from concurrent invocations never interleave.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use inquest_llm::TokenUsage;

use crate::{
    error::{MetricsError, Result},
    pricing::PricingTable,
    record::MetricsRecord,
};

/// A failure writing to one sink, reported alongside the other's outcome
#[derive(Debug, Clone)]
pub struct SinkFailure {
    /// Which sink failed ("csv" or "json")
    pub sink: String,
    /// What went wrong
    pub message: String,
}

impl std::fmt::Display for SinkFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} sink: {}", self.sink, self.message)
    }
}

/// Row-oriented metrics log
#[derive(Clone)]
pub struct CsvSink {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl CsvSink {
    /// Create a sink writing to the given path
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// Append one record, writing the header first if the file is empty
    pub async fn append(&self, record: &MetricsRecord) -> Result<()> {
        let _guard = self.lock.lock().await;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let needs_header = match tokio::fs::metadata(&self.path).await {
            Ok(meta) => meta.len() == 0,
            Err(_) => true,
        };

        // Encode in memory so the file sees exactly one write per record
        let mut writer = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(Vec::new());
        writer.serialize(record)?;
        writer.flush()?;
        let bytes = writer
            .into_inner()
            .map_err(|e| MetricsError::Io(e.into_error()))?;

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(&bytes).await?;
        file.flush().await?;

        Ok(())
    }
}

/// Document-oriented metrics log (JSON lines)
#[derive(Clone)]
pub struct JsonSink {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl JsonSink {
    /// Create a sink writing to the given path
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// Append one record as a single JSON line
    pub async fn append(&self, record: &MetricsRecord) -> Result<()> {
        let mut line = serde_json::to_string(record)?;
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
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        Ok(())
    }
}

/// Computes costs and records telemetry to both sinks
#[derive(Clone)]
pub struct MetricsRecorder {
    pricing: PricingTable,
    csv: CsvSink,
    json: JsonSink,
}

impl MetricsRecorder {
    /// Create a recorder with the given pricing table and sink paths
    pub fn new(pricing: PricingTable, csv_path: impl AsRef<Path>, json_path: impl AsRef<Path>) -> Self {
        Self {
            pricing,
            csv: CsvSink::new(csv_path),
            json: JsonSink::new(json_path),
        }
    }

    /// The pricing table in use
    pub fn pricing(&self) -> &PricingTable {
        &self.pricing
    }

    /// Build a record for one billed call
    ///
    /// Fails with `UnknownModelPricing` when the model has no table entry.
    pub fn build_record(
        &self,
        model: &str,
        usage: TokenUsage,
        latency_ms: u64,
        question: &str,
    ) -> Result<MetricsRecord> {
        let estimated_cost = self.pricing.estimate_cost(model, usage)?;
        Ok(MetricsRecord::new(
            model,
            usage,
            latency_ms,
            estimated_cost,
            question,
        ))
    }

    /// Append one record to both sinks
    ///
    /// Both appends are attempted regardless of each other's outcome.
    /// Returns the failures, if any; an empty vec means both succeeded.
    pub async fn append(&self, record: &MetricsRecord) -> Vec<SinkFailure> {
        let mut failures = Vec::new();

        if let Err(e) = self.csv.append(record).await {
            tracing::error!("CSV metrics sink write failed: {}", e);
            failures.push(SinkFailure {
                sink: "csv".to_string(),
                message: e.to_string(),
            });
        }

        if let Err(e) = self.json.append(record).await {
            tracing::error!("JSON metrics sink write failed: {}", e);
            failures.push(SinkFailure {
                sink: "json".to_string(),
                message: e.to_string(),
            });
        }

        failures
    }
}
