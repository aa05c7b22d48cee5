use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use tracing_subscriber::EnvFilter;

use cora_cli::{
    display_banner, handle_input_with_history, print_help, render_answer, render_candidates,
    render_catalog,
};
use cora_core::{Error, ResolverOptions};
use cora_fetch::PageFetcher;
use cora_index::CourseIndex;
use cora_openai::OpenAiClient;
use cora_resolver::{Advisor, QueryResolver};

type CourseAdvisor = Advisor<OpenAiClient, PageFetcher, OpenAiClient>;

#[derive(Parser)]
#[command(name = "cora")]
#[command(about = "AI-powered advisor for a catalogue of educational programmes", long_about = None)]
struct Cli {
    /// Binary vector index artifact
    #[arg(long, default_value = "data/course_index.bin")]
    index: PathBuf,

    /// Ordinal-aligned course metadata
    #[arg(long, default_value = "data/course_metadata.json")]
    metadata: PathBuf,

    /// Maximum candidates per answer
    #[arg(long, default_value_t = 3)]
    top_k: usize,

    /// Minimum similarity score for a match
    #[arg(long, default_value_t = 0.5)]
    threshold: f32,

    /// Ask one question and exit instead of starting the interactive loop
    #[arg(short, long)]
    question: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Boot is fail-fast: without a valid index there is no service.
    let index = Arc::new(
        CourseIndex::load(&cli.index, &cli.metadata).context("loading course index")?,
    );

    let openai = Arc::new(OpenAiClient::from_env()?);
    let fetcher = Arc::new(PageFetcher::from_catalog(index.records())?);

    let options = ResolverOptions {
        top_k: cli.top_k,
        score_threshold: cli.threshold,
        query_expansions: vec![(
            "project manager".to_string(),
            "construction management BIM management".to_string(),
        )],
        ..Default::default()
    };

    let resolver = QueryResolver::new(index.clone(), openai.clone(), fetcher, options)?;
    let advisor = Advisor::new(resolver, openai);

    // One-shot mode
    if let Some(question) = cli.question {
        ask(&advisor, &question).await?;
        return Ok(());
    }

    // Interactive mode
    display_banner();

    let mut history = Vec::new();

    loop {
        let Some(input) = handle_input_with_history(&mut history)? else {
            break;
        };

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let input_lower = input.to_lowercase();

        if input_lower == "exit" || input_lower == "quit" {
            println!("{}", "Goodbye!".green());
            break;
        }

        if input_lower == "help" {
            print_help();
            continue;
        }

        if input_lower == "courses" {
            render_catalog(index.records());
            continue;
        }

        println!("{} Searching the catalogue...", "🔎".blue());
        ask(&advisor, input).await?;
    }

    Ok(())
}

/// Ask one question and render the outcome. Retryable failures become
/// messages instead of exits so the interactive loop keeps running.
async fn ask(advisor: &CourseAdvisor, question: &str) -> Result<()> {
    match advisor.answer(question).await {
        Ok(reply) => {
            render_answer(&reply.answer);
            render_candidates(&reply.bundle);
        }
        Err(Error::EmbeddingUnavailable(reason)) => {
            tracing::warn!(%reason, "embedding provider unavailable");
            println!(
                "{}",
                "I couldn't reach the search backend just now — please try again in a moment."
                    .yellow()
            );
        }
        Err(Error::Synthesis(reason)) => {
            tracing::warn!(%reason, "answer synthesis failed");
            println!(
                "{}",
                "Something went wrong while writing the answer — please try again.".yellow()
            );
        }
        Err(other) => return Err(other.into()),
    }
    Ok(())
}
