//! Inquest CLI
//!
//! Thin entry point over the query pipeline: parses arguments, loads
//! configuration and the API key, runs one invocation, and prints the
//! outcome as JSON.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use inquest_core::{config::load_config_or_default, logging::init_logging};
use inquest_llm::OpenAiProvider;
use inquest_pipeline::{PromptTemplate, QueryPipeline};

#[derive(Parser, Debug)]
#[command(name = "inquest", version, about = "Safety-gated structured query tool")]
struct Args {
    /// The question to process
    #[arg(required = true, num_args = 1..)]
    question: Vec<String>,

    /// Path to the configuration file
    #[arg(long, default_value = "inquest.toml")]
    config: String,

    /// Path to a prompt template file (built-in default if absent)
    #[arg(long)]
    template: Option<String>,

    /// Skip the safety gate
    #[arg(long)]
    no_safety_check: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = load_config_or_default(&args.config);
    if args.no_safety_check {
        config.safety.enabled = false;
    }

    init_logging(&config.logging);

    let api_key = std::env::var("OPENAI_API_KEY")
        .context("OPENAI_API_KEY environment variable not set")?;

    let provider = OpenAiProvider::new(api_key, &config.model)?
        .with_timeout(Duration::from_secs(config.timeout_secs));

    let template = match &args.template {
        Some(path) => PromptTemplate::load_or_default(path),
        None => PromptTemplate::default(),
    };

    let pipeline = QueryPipeline::builder()
        .provider(Arc::new(provider))
        .config(config)
        .template(template)
        .build()?;

    let question = args.question.join(" ");
    tracing::info!("Processing question: {}", question);

    let outcome = pipeline.process(&question).await;

    println!("{}", serde_json::to_string_pretty(&outcome)?);

    Ok(())
}
