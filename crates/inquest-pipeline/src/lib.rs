//! Query Pipeline
//!
//! Sequences one safety-checked, measured, validated inference call:
//!
//! ```text
//! Received -> SafetyChecked -> { Rejected | Invoked }
//!                                          -> { Validated | InvocationFailed }
//!                                                -> { Completed | Errored }
//! ```
//!
//! Every terminal state maps to exactly one outward status (success,
//! rejected, error). A metrics record is written if and only if a remote
//! inference call was actually issued.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use inquest_core::InquestConfig;
//! use inquest_llm::OpenAiProvider;
//! use inquest_pipeline::QueryPipeline;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = InquestConfig::default();
//! let provider = Arc::new(OpenAiProvider::new("key", &config.model)?);
//! let pipeline = QueryPipeline::builder()
//!     .provider(provider)
//!     .config(config)
//!     .build()?;
//!
//! let outcome = pipeline.process("What is the capital of France?").await;
//! println!("{}", serde_json::to_string_pretty(&outcome)?);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod outcome;
pub mod pipeline;
pub mod prompt;
pub mod validate;

// Re-exports
pub use error::{PipelineError, Result};
pub use outcome::QueryOutcome;
pub use pipeline::{QueryPipeline, QueryPipelineBuilder};
pub use prompt::PromptTemplate;
pub use validate::{Confidence, StructuredAnswer};
