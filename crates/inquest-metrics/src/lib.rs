//! Cost & Metrics Recorder
//!
//! Computes a token-based cost estimate for each billed inference call and
//! appends one metrics record to two durable sinks: a row-oriented CSV log
//! and a JSON-lines document log. Both appends are always attempted; a
//! failure in one never suppresses the other, and failures are reported,
//! not masked.

pub mod error;
pub mod pricing;
pub mod record;
pub mod sinks;

// Re-exports
pub use error::{MetricsError, Result};
pub use pricing::PricingTable;
pub use record::MetricsRecord;
pub use sinks::{CsvSink, JsonSink, MetricsRecorder, SinkFailure};
