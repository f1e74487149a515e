use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tracing::info;

use janus::logging;
use janus::{Article, Pipeline, PipelineConfig, TARGET_PIPELINE};

/// Geopolitical event analysis over a pre-embedded article batch.
///
/// Reads a JSON array of articles (with embeddings and sentiment scores
/// already attached), clusters them into events, analyzes rhetoric drift per
/// event, predicts trajectories, and writes the full report as JSON to
/// stdout.
///
/// Usage:
///    cargo run -- --input articles.json --pretty
#[derive(Parser)]
#[clap(name = "janus", about = "Cluster news articles into geopolitical events and predict their trajectories")]
struct Cli {
    /// Path to a JSON array of articles
    #[clap(short, long)]
    input: PathBuf,

    /// Minimum cosine similarity for two articles to share an event
    #[clap(long, default_value = "0.7")]
    similarity_threshold: f32,

    /// Minimum number of embedded articles required to form a cluster
    #[clap(long, default_value = "2")]
    min_cluster_size: usize,

    /// Analysis window recorded on each rhetoric analysis, in days
    #[clap(long, default_value = "30")]
    time_period_days: i64,

    /// Pretty-print the report JSON
    #[clap(short, long)]
    pretty: bool,
}

fn main() -> Result<()> {
    logging::configure_logging();

    let cli = Cli::parse();

    let raw = fs::read_to_string(&cli.input)
        .with_context(|| format!("Failed to read {}", cli.input.display()))?;
    let articles: Vec<Article> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse articles from {}", cli.input.display()))?;
    info!(
        target: TARGET_PIPELINE,
        "Loaded {} articles from {}",
        articles.len(),
        cli.input.display()
    );

    let config = PipelineConfig {
        similarity_threshold: cli.similarity_threshold,
        min_cluster_size: cli.min_cluster_size,
        time_period_days: cli.time_period_days,
        ..PipelineConfig::default()
    };

    let pipeline = Pipeline::new(config);
    let report = pipeline.run(&articles);

    let json = if cli.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{json}");

    Ok(())
}
