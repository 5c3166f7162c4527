//! Corpus Processor - Extracts load-bearing anecdotes from conversation archives
//!
//! Output is structured JSON with manifold coordinates (XYZ+t). Progress is
//! logged to stderr so stdout stays machine-readable.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use corpus_processor::{ingest, CorpusStats, Extractor, ProcessorConfig};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "corpus-processor")]
#[command(author = "A3S Lab Team")]
#[command(version)]
#[command(about = "Extracts load-bearing anecdotes from conversation archives")]
struct Cli {
    /// Pattern table configuration file (TOML)
    #[arg(short, long, env = "CORPUS_PROCESSOR_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract anecdotes from a file or directory (JSON, JSONL, TXT, MD)
    Process {
        /// File or directory to process
        input: PathBuf,

        /// Write to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show statistics only
        #[arg(long)]
        stats: bool,
    },

    /// Show configuration
    Config {
        /// Show default configuration
        #[arg(long)]
        default: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("corpus_processor={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    // Load configuration
    let config = match &cli.config {
        Some(path) => ProcessorConfig::from_file(path)?,
        None => ProcessorConfig::default(),
    };

    match command {
        Commands::Process {
            input,
            output,
            stats,
        } => {
            run_process(&config, &input, output.as_deref(), stats)?;
        }
        Commands::Config { default } => {
            show_config(if default { None } else { Some(&config) })?;
        }
    }

    Ok(())
}

fn run_process(
    config: &ProcessorConfig,
    input: &Path,
    output: Option<&Path>,
    stats_only: bool,
) -> Result<()> {
    if !input.exists() {
        tracing::error!("Error: {} does not exist", input.display());
        std::process::exit(1);
    }

    let extractor = Extractor::new(config)?;

    tracing::info!("Processing: {}", input.display());
    let conversations = ingest::normalize(input)?;
    tracing::info!("Found {} conversations", conversations.len());

    let anecdotes = extractor.extract(&conversations);
    tracing::info!("Extracted {} anecdotes", anecdotes.len());

    if stats_only {
        print!("{}", CorpusStats::from_anecdotes(&anecdotes));
        return Ok(());
    }

    let rendered = serde_json::to_string_pretty(&anecdotes)?;
    match output {
        Some(path) => {
            std::fs::write(path, rendered)?;
            tracing::info!("Written to: {}", path.display());
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

fn show_config(config: Option<&ProcessorConfig>) -> Result<()> {
    let rendered = match config {
        Some(config) => config.to_toml()?,
        None => ProcessorConfig::default().to_toml()?,
    };
    println!("{}", rendered);
    Ok(())
}
