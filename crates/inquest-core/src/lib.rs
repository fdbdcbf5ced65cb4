//! Inquest Core
//!
//! Shared foundation for the inquest query pipeline: error handling,
//! configuration loading, and logging setup.

pub mod config;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use config::{load_config, InquestConfig, ModerationPolicy};
pub use error::{CoreError, Result};
pub use logging::init_logging;
