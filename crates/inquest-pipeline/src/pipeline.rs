//! Pipeline orchestrator

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;

use inquest_core::InquestConfig;
use inquest_llm::LlmProvider;
use inquest_metrics::{MetricsRecorder, PricingTable};
use inquest_safety::{AuditLog, SafetyChecker};

use crate::{
    error::{PipelineError, Result},
    outcome::QueryOutcome,
    prompt::PromptTemplate,
    validate::StructuredAnswer,
};

/// The query-processing pipeline
///
/// Holds its whole configuration as values passed at construction;
/// concurrent pipelines with different configurations cannot interfere.
pub struct QueryPipeline {
    provider: Arc<dyn LlmProvider>,
    safety: SafetyChecker,
    recorder: MetricsRecorder,
    template: PromptTemplate,
    check_safety: bool,
}

impl QueryPipeline {
    /// Create a pipeline builder
    pub fn builder() -> QueryPipelineBuilder {
        QueryPipelineBuilder::new()
    }

    /// Process one question
    ///
    /// Runs the safety gate, issues at most one inference call, validates
    /// the payload, and records telemetry. Never panics and never raises;
    /// every internal failure maps to one of the three outward statuses.
    pub async fn process(&self, question: &str) -> QueryOutcome {
        let mut warnings = Vec::new();

        // Received -> SafetyChecked
        if self.check_safety {
            let check = self.safety.check(question).await;
            warnings.extend(check.warnings);

            // SafetyChecked -> Rejected: no inference call, no metrics
            if !check.verdict.is_safe {
                return QueryOutcome::rejected(check.verdict, warnings);
            }
        }

        // SafetyChecked -> Invoked: exactly one remote call, timed around
        // the call only
        let messages = self.template.messages(question);
        let started = Instant::now();
        let response = match self.provider.chat_json(messages).await {
            Ok(response) => response,
            Err(e) => {
                // Invoked -> InvocationFailed: no usable token counts, so
                // no metrics record
                let error = PipelineError::Transport(e);
                tracing::error!("{}", error);
                return QueryOutcome::error(error.to_string(), None, warnings);
            }
        };
        let latency_ms = started.elapsed().as_millis() as u64;

        tracing::debug!(
            "Inference call completed in {} ms ({} prompt / {} completion tokens)",
            latency_ms,
            response.usage.prompt_tokens,
            response.usage.completion_tokens
        );

        // The call was billed whatever validation says; build the record
        // from the returned counts
        let record = self.recorder.build_record(
            self.provider.model(),
            response.usage,
            latency_ms,
            question,
        );

        // Invoked -> Validated
        let validated = StructuredAnswer::parse(&response.content);

        match (validated, record) {
            // Validated -> Completed
            (Ok(answer), Ok(record)) => {
                for failure in self.recorder.append(&record).await {
                    warnings.push(failure.to_string());
                }
                QueryOutcome::Success {
                    response: answer,
                    model: record.model.clone(),
                    timestamp: Utc::now(),
                    metrics: record,
                    warnings,
                }
            }
            // Validated -> Errored: billed, so the record is still written
            (Err(e), Ok(record)) => {
                tracing::error!("{}", e);
                for failure in self.recorder.append(&record).await {
                    warnings.push(failure.to_string());
                }
                QueryOutcome::error(e.to_string(), Some(record), warnings)
            }
            // No pricing entry: cost telemetry cannot be fabricated
            (_, Err(e)) => {
                tracing::error!("{}", e);
                QueryOutcome::error(e.to_string(), None, warnings)
            }
        }
    }
}

/// Builder for [`QueryPipeline`]
pub struct QueryPipelineBuilder {
    provider: Option<Arc<dyn LlmProvider>>,
    config: InquestConfig,
    template: Option<PromptTemplate>,
}

impl QueryPipelineBuilder {
    /// Create a builder with default configuration
    pub fn new() -> Self {
        Self {
            provider: None,
            config: InquestConfig::default(),
            template: None,
        }
    }

    /// Set the remote provider
    pub fn provider(mut self, provider: Arc<dyn LlmProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set the full configuration
    pub fn config(mut self, config: InquestConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the prompt template
    pub fn template(mut self, template: PromptTemplate) -> Self {
        self.template = Some(template);
        self
    }

    /// Disable the safety gate (the gate is on by default)
    pub fn skip_safety_check(mut self) -> Self {
        self.config.safety.enabled = false;
        self
    }

    /// Build the pipeline
    ///
    /// Fails when no provider is set, or when the configured model has no
    /// pricing entry; a missing price is caught here rather than after the
    /// first billed call.
    pub fn build(self) -> Result<QueryPipeline> {
        let provider = self
            .provider
            .ok_or_else(|| PipelineError::config("no provider set"))?;

        let pricing = PricingTable::new(self.config.pricing.clone());
        if !pricing.contains(provider.model()) {
            return Err(inquest_metrics::MetricsError::UnknownModelPricing(
                provider.model().to_string(),
            )
            .into());
        }

        let safety = SafetyChecker::new(
            Arc::clone(&provider),
            self.config.safety.moderation_policy,
            AuditLog::new(&self.config.safety.audit_log),
        );

        let recorder = MetricsRecorder::new(
            pricing,
            &self.config.metrics.csv_path,
            &self.config.metrics.json_path,
        );

        Ok(QueryPipeline {
            provider,
            safety,
            recorder,
            template: self.template.unwrap_or_default(),
            check_safety: self.config.safety.enabled,
        })
    }
}

impl Default for QueryPipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
