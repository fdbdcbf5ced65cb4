//! Configuration management for the inquest pipeline
//!
//! Configuration is loaded from multiple sources, later sources winning:
//! - Default values
//! - Configuration files (TOML, JSON, YAML)
//! - Environment variables (`INQUEST__` prefix)
//!
//! The pipeline never reads ambient process state at query time; the whole
//! configuration is resolved here and passed in at construction.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Main configuration for the query pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InquestConfig {
    /// Model to send inference requests to
    #[serde(default = "default_model")]
    pub model: String,

    /// Remote call timeout in seconds (applies to inference and moderation)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Safety gate configuration
    #[serde(default)]
    pub safety: SafetyConfig,

    /// Metrics sink configuration
    #[serde(default)]
    pub metrics: MetricsConfig,

    /// Pricing table: model name -> USD per 1K tokens
    #[serde(default = "default_pricing")]
    pub pricing: HashMap<String, PricingEntry>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Use JSON format
    #[serde(default)]
    pub json: bool,
}

/// Safety gate configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyConfig {
    /// Run the safety gate before inference
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Policy when the moderation dependency is unavailable
    #[serde(default)]
    pub moderation_policy: ModerationPolicy,

    /// Path to the append-only audit log
    #[serde(default = "default_audit_log")]
    pub audit_log: PathBuf,
}

/// Policy for resolving an unavailable moderation dependency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModerationPolicy {
    /// Treat the input as unsafe when moderation cannot be reached
    #[default]
    FailClosed,
    /// Fall back to heuristics alone when moderation cannot be reached
    FailOpen,
}

/// Metrics sink configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Path to the row-oriented (CSV) metrics log
    #[serde(default = "default_metrics_csv")]
    pub csv_path: PathBuf,

    /// Path to the document (JSON lines) metrics log
    #[serde(default = "default_metrics_json")]
    pub json_path: PathBuf,
}

/// Per-model pricing, USD per 1,000 tokens
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingEntry {
    /// Price per 1K prompt tokens
    pub prompt: f64,
    /// Price per 1K completion tokens
    pub completion: f64,
}

// Default value functions
fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_audit_log() -> PathBuf {
    PathBuf::from("metrics/safety_log.jsonl")
}

fn default_metrics_csv() -> PathBuf {
    PathBuf::from("metrics/metrics.csv")
}

fn default_metrics_json() -> PathBuf {
    PathBuf::from("metrics/metrics.jsonl")
}

fn default_pricing() -> HashMap<String, PricingEntry> {
    HashMap::from([
        (
            "gpt-3.5-turbo".to_string(),
            PricingEntry {
                prompt: 0.0015,
                completion: 0.002,
            },
        ),
        (
            "gpt-4".to_string(),
            PricingEntry {
                prompt: 0.03,
                completion: 0.06,
            },
        ),
        (
            "gpt-4-turbo".to_string(),
            PricingEntry {
                prompt: 0.01,
                completion: 0.03,
            },
        ),
    ])
}

impl Default for InquestConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            timeout_secs: default_timeout_secs(),
            logging: LoggingConfig::default(),
            safety: SafetyConfig::default(),
            metrics: MetricsConfig::default(),
            pricing: default_pricing(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            moderation_policy: ModerationPolicy::default(),
            audit_log: default_audit_log(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            csv_path: default_metrics_csv(),
            json_path: default_metrics_json(),
        }
    }
}

/// Load configuration from a file
///
/// Supports TOML, JSON, and YAML formats based on file extension.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<InquestConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(CoreError::config(format!(
            "Config file not found: {}",
            path.display()
        )));
    }

    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(config::Environment::with_prefix("INQUEST").separator("__"))
        .build()?;

    let config: InquestConfig = settings.try_deserialize()?;

    tracing::info!("Configuration loaded from {}", path.display());

    Ok(config)
}

/// Load configuration with defaults if the file doesn't exist
///
/// This is useful for optional configuration files.
pub fn load_config_or_default<P: AsRef<Path>>(path: P) -> InquestConfig {
    match load_config(path) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Failed to load config, using defaults: {}", e);
            InquestConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = InquestConfig::default();
        assert_eq!(config.model, "gpt-3.5-turbo");
        assert_eq!(config.timeout_secs, 60);
        assert!(config.safety.enabled);
        assert_eq!(
            config.safety.moderation_policy,
            ModerationPolicy::FailClosed
        );
    }

    #[test]
    fn test_default_pricing_covers_known_models() {
        let config = InquestConfig::default();
        for model in ["gpt-3.5-turbo", "gpt-4", "gpt-4-turbo"] {
            assert!(config.pricing.contains_key(model), "missing {}", model);
        }
    }

    #[test]
    fn test_config_serialization() {
        let config = InquestConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: InquestConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config.model, deserialized.model);
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "model": "gpt-4",
            "timeout_secs": 30,
            "safety": {
                "enabled": true,
                "moderation_policy": "fail_open",
                "audit_log": "audit.jsonl"
            }
        }"#;

        let config: InquestConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.model, "gpt-4");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.safety.moderation_policy, ModerationPolicy::FailOpen);
        // Fields absent from the file fall back to defaults
        assert_eq!(config.metrics.csv_path, PathBuf::from("metrics/metrics.csv"));
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = load_config("nonexistent.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_or_default() {
        let config = load_config_or_default("nonexistent.toml");
        assert_eq!(config.model, "gpt-3.5-turbo");
    }
}
