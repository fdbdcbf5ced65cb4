//! Per-model pricing table

use std::collections::HashMap;

use inquest_core::config::PricingEntry;
use inquest_llm::TokenUsage;

use crate::error::{MetricsError, Result};

/// Pricing resolved by exact model-name match
///
/// There is deliberately no fallback entry: an unknown model is an error,
/// not a guess at someone else's price list.
#[derive(Debug, Clone)]
pub struct PricingTable {
    entries: HashMap<String, PricingEntry>,
}

impl PricingTable {
    /// Build a table from configured entries
    pub fn new(entries: HashMap<String, PricingEntry>) -> Self {
        Self { entries }
    }

    /// Whether the table has an entry for the given model
    pub fn contains(&self, model: &str) -> bool {
        self.entries.contains_key(model)
    }

    /// Estimate the cost of a call in USD, rounded to 6 decimal places
    pub fn estimate_cost(&self, model: &str, usage: TokenUsage) -> Result<f64> {
        let entry = self
            .entries
            .get(model)
            .ok_or_else(|| MetricsError::UnknownModelPricing(model.to_string()))?;

        let prompt_cost = (usage.prompt_tokens as f64 / 1000.0) * entry.prompt;
        let completion_cost = (usage.completion_tokens as f64 / 1000.0) * entry.completion;

        Ok(round_to_micros(prompt_cost + completion_cost))
    }
}

impl Default for PricingTable {
    fn default() -> Self {
        Self::new(inquest_core::InquestConfig::default().pricing)
    }
}

fn round_to_micros(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_model_cost() {
        let table = PricingTable::default();
        // 120 prompt + 10 completion tokens on gpt-3.5-turbo:
        // 0.120 * 0.0015 + 0.010 * 0.002 = 0.0002
        let cost = table
            .estimate_cost("gpt-3.5-turbo", TokenUsage::new(120, 10))
            .unwrap();
        assert!((cost - 0.0002).abs() < 1e-9);
        assert!(cost > 0.0);
    }

    #[test]
    fn test_gpt4_is_pricier() {
        let table = PricingTable::default();
        let usage = TokenUsage::new(1000, 1000);
        let cheap = table.estimate_cost("gpt-3.5-turbo", usage).unwrap();
        let pricey = table.estimate_cost("gpt-4", usage).unwrap();
        assert!(pricey > cheap);
    }

    #[test]
    fn test_unknown_model_is_an_error() {
        let table = PricingTable::default();
        let result = table.estimate_cost("mystery-model", TokenUsage::new(10, 10));
        assert!(matches!(
            result,
            Err(MetricsError::UnknownModelPricing(m)) if m == "mystery-model"
        ));
    }

    #[test]
    fn test_exact_match_only() {
        let table = PricingTable::default();
        // No prefix or fuzzy matching
        assert!(table
            .estimate_cost("gpt-4-0613", TokenUsage::new(10, 10))
            .is_err());
    }

    #[test]
    fn test_cost_rounded_to_six_decimals() {
        let table = PricingTable::default();
        let cost = table
            .estimate_cost("gpt-3.5-turbo", TokenUsage::new(1, 1))
            .unwrap();
        // 0.0000015 + 0.000002 = 0.0000035 -> 0.000004 after rounding
        assert!((cost - 0.000004).abs() < 1e-12);
    }

    #[test]
    fn test_zero_tokens_zero_cost() {
        let table = PricingTable::default();
        let cost = table
            .estimate_cost("gpt-4", TokenUsage::new(0, 0))
            .unwrap();
        assert_eq!(cost, 0.0);
    }
}
