//! Error types for remote model operations

/// Result type for LLM operations
pub type Result<T> = std::result::Result<T, LlmError>;

/// Errors that can occur while talking to the remote provider
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// API returned an error status
    #[error("API error: {0}")]
    ApiError(String),

    /// Failed to parse API response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Request timed out
    #[error("Request timed out")]
    Timeout,

    /// Generic error from inquest-core
    #[error(transparent)]
    CoreError(#[from] inquest_core::CoreError),
}

impl LlmError {
    /// Create an API error
    pub fn api_error<S: Into<String>>(msg: S) -> Self {
        Self::ApiError(msg.into())
    }

    /// Create a parse error
    pub fn parse_error<S: Into<String>>(msg: S) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create a config error
    pub fn config_error<S: Into<String>>(msg: S) -> Self {
        Self::ConfigError(msg.into())
    }

    /// True for network-level faults (as opposed to contract violations)
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::HttpError(_) | Self::ApiError(_) | Self::Timeout)
    }
}
