//! sage-worker: run one fusion query from the command line.
//!
//! Usage:
//!   sage-worker --query "How does the spice connect the houses?" [OPTIONS]
//!
//! Options:
//!   --config <PATH>        TOML configuration (or SAGE_CONFIG)
//!   --intent <INTENT>      Skip classification: summary, definition, relationship, comparison, general
//!   --filter <KEY=VALUE>   Metadata filter, repeatable
//!   --sub-query <TEXT>     Additional query text, repeatable
//!   --json                 Print the full fusion report as JSON

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use sage_core::config::SageConfig;
use sage_core::intent::Intent;
use sage_core::models::{FusionReport, QueryContext};
use sage_worker::cli::{apply_env_overrides, parse_filter, MAX_WORKERS_ENV};
use sage_worker::SageRuntime;
use serde_json::Value;

#[derive(Parser, Debug)]
#[command(name = "sage-worker")]
#[command(about = "Intent-routed fusion retrieval over the configured engines")]
struct Args {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(long, env = "SAGE_CONFIG")]
    config: Option<PathBuf>,

    /// The query text.
    #[arg(long)]
    query: String,

    /// Preset intent; bypasses the classifier.
    #[arg(long, value_parser = parse_intent)]
    intent: Option<Intent>,

    /// Metadata filter as key=value. Repeatable.
    #[arg(long = "filter", value_parser = parse_filter)]
    filters: Vec<(String, Value)>,

    /// Decomposed sub-query. Repeatable.
    #[arg(long = "sub-query")]
    sub_queries: Vec<String>,

    /// Emit the fusion report as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

fn parse_intent(raw: &str) -> Result<Intent, String> {
    raw.parse()
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SageConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SageConfig::default(),
    };
    let max_workers = std::env::var(MAX_WORKERS_ENV).ok();
    apply_env_overrides(&mut config, max_workers.as_deref())?;

    sage_observability::tracing_setup::init(&config.observability);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.worker.max_workers)
        .enable_all()
        .build()
        .context("building async runtime")?;

    let sage = SageRuntime::new(config)?;

    let mut context = QueryContext::new(args.query).with_sub_queries(args.sub_queries);
    context.intent = args.intent;
    for (key, value) in args.filters {
        context = context.with_filter(key, value);
    }

    let report = runtime.block_on(sage.query(&mut context))?;
    // Timed-out engine calls may still be sleeping on the blocking pool.
    runtime.shutdown_background();

    if args.json {
        let out = serde_json::to_string_pretty(&report)?;
        println!("{out}");
    } else {
        print_table(&report);
    }
    Ok(())
}

fn print_table(report: &FusionReport) {
    println!(
        "intent: {}  results: {}  elapsed: {:?}",
        report.intent,
        report.nodes.len(),
        report.elapsed
    );
    for outcome in report.failed_engines() {
        if let Some(failure) = outcome.failure() {
            println!("  engine '{}' {}", outcome.engine_id, failure.kind());
        }
    }
    println!("{:>4}  {:>8}  {:<10}  {:<20}  content", "rank", "score", "source", "chunk");
    for (rank, node) in report.nodes.iter().enumerate() {
        let preview: String = node.chunk.content.chars().take(60).collect();
        println!(
            "{:>4}  {:>8.4}  {:<10}  {:<20}  {}",
            rank + 1,
            node.score,
            node.engine_source,
            node.chunk_id(),
            preview
        );
    }
}
