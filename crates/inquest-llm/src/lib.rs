//! Remote model provider abstraction
//!
//! A unified interface over the two remote capabilities the pipeline
//! depends on: a single schema-constrained chat completion, and a content
//! moderation check.
//!
//! # Example
//!
//! ```no_run
//! use inquest_llm::{LlmProvider, Message, OpenAiProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = OpenAiProvider::new("your-api-key", "gpt-3.5-turbo")?;
//!
//!     let messages = vec![Message::user("What is the capital of France?")];
//!     let response = provider.chat_json(messages).await?;
//!     println!("{}", response.content);
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod openai;
pub mod provider;
pub mod types;

// Re-exports
pub use error::{LlmError, Result};
pub use openai::OpenAiProvider;
pub use provider::LlmProvider;
pub use types::{ChatResponse, Message, MessageRole, ModerationVerdict, TokenUsage};
