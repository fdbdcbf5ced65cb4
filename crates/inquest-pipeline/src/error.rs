//! Error types for the pipeline
//!
//! Rejection by the safety gate is an outcome, not an error; it never
//! appears here. These are the faults that map to the outward `error`
//! status or abort pipeline construction.

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors that can occur while building or running the pipeline
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The remote inference call failed at the transport level
    /// (timeout, network error, non-success status)
    #[error("Remote transport failure: {0}")]
    Transport(#[source] inquest_llm::LlmError),

    /// The remote call succeeded but the payload violates the expected
    /// schema. The raw payload is carried for diagnosis.
    #[error("Malformed model response: {detail} (raw payload: {raw})")]
    MalformedResponse {
        /// What was wrong with the payload
        detail: String,
        /// The payload as returned by the provider
        raw: String,
    },

    /// Cost telemetry fault, including unknown model pricing
    #[error(transparent)]
    Metrics(#[from] inquest_metrics::MetricsError),

    /// The pipeline was misconfigured
    #[error("Invalid pipeline configuration: {0}")]
    Config(String),
}

impl PipelineError {
    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }
}
