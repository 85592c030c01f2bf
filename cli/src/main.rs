// SPDX-License-Identifier: MIT OR Apache-2.0

//! prepare-dataset - convert and merge a chess-position dataset
//!
//! With no arguments this reads `dataset/{check,checkmate,nothing}/*.txt`
//! relative to the working directory and writes the converted files plus
//! `merged_dataset.csv` into `dataset_converted/`. Progress lines go to
//! stdout, diagnostics to stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fenprep_core::{DatasetNormalizer, DatasetStats, Label, NormalizerConfig};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(
    name = "prepare-dataset",
    about = "Convert raw chess-position files into a merged semicolon-delimited dataset",
    version
)]
struct Args {
    /// JSON file with normalizer settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding one subdirectory per category
    #[arg(long)]
    dataset_dir: Option<PathBuf>,

    /// Directory receiving converted files and the merged dataset
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Enable debug logging (reports dropped lines)
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the class balance of a prepared dataset file
    Stats {
        /// Dataset file, canonical or raw
        path: PathBuf,
    },
}

fn init_logging(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .context("Failed to build log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    Ok(())
}

fn load_config(args: &Args) -> Result<NormalizerConfig> {
    let mut config = match &args.config {
        Some(path) => NormalizerConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => NormalizerConfig::default(),
    };

    if let Some(dir) = &args.dataset_dir {
        config = config.with_dataset_dir(dir);
    }
    if let Some(dir) = &args.output_dir {
        config = config.with_output_dir(dir);
    }

    Ok(config)
}

fn run_normalizer(config: NormalizerConfig) -> Result<()> {
    tracing::debug!("Normalizer config: {:?}", config);

    let summary = DatasetNormalizer::new(config)
        .run()
        .context("Dataset conversion failed")?;

    tracing::info!(
        "Converted {} files ({} records kept, {} lines dropped)",
        summary.conversions.len(),
        summary.total_records(),
        summary.total_dropped()
    );

    Ok(())
}

fn print_stats(path: &Path) -> Result<()> {
    let stats = DatasetStats::from_file(path)
        .with_context(|| format!("Failed to read dataset {}", path.display()))?;
    let fractions = stats.class_fractions();

    println!("Dataset: {}", path.display());
    let classes = [
        (Label::Nothing, Label::WhiteWins),
        (Label::Check, Label::BlackWins),
        (Label::Checkmate, Label::Draw),
    ];
    for (idx, (label, outcome)) in classes.iter().enumerate() {
        println!(
            "  {:<10} / {:<6} {:>8} ({:.1}%)",
            label.to_string(),
            outcome.to_string(),
            stats.per_class[idx],
            fractions[idx] * 100.0
        );
    }
    println!("Total positions: {}", stats.total);
    println!("Skipped lines: {}", stats.skipped);

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.verbose)?;

    match &args.command {
        Some(Command::Stats { path }) => print_stats(path),
        None => run_normalizer(load_config(&args)?),
    }
}
