//! Error types for metrics recording

/// Result type for metrics operations
pub type Result<T> = std::result::Result<T, MetricsError>;

/// Errors that can occur while computing or recording metrics
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// The model has no pricing table entry. Cost telemetry is never
    /// silently recorded as $0 for an unpriced model.
    #[error("No pricing entry for model: {0}")]
    UnknownModelPricing(String),

    /// Sink I/O failed
    #[error("Sink write failed: {0}")]
    Io(#[from] std::io::Error),

    /// CSV encoding failed
    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),

    /// JSON encoding failed
    #[error("JSON encoding failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
