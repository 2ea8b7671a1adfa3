//! CLI application for scanned invoice processing.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, config, extract, process, Overrides};

/// Scanned invoice extraction - turn invoice PDFs into CSV records
#[derive(Parser)]
#[command(name = "scanvoice")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Scratch directory for intermediate artifacts
    #[arg(long, global = true)]
    scratch_dir: Option<PathBuf>,

    /// Directory receiving CSV output
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a single invoice PDF
    Process(process::ProcessArgs),

    /// Process every PDF in a directory
    Batch(batch::BatchArgs),

    /// Extract fields from an already recognized text file
    Extract(extract::ExtractArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let overrides = Overrides {
        config: cli.config,
        scratch_dir: cli.scratch_dir,
        output_dir: cli.output_dir,
    };

    match cli.command {
        Commands::Process(args) => process::run(args, &overrides),
        Commands::Batch(args) => batch::run(args, &overrides),
        Commands::Extract(args) => extract::run(args, &overrides),
        Commands::Config(args) => config::run(args, overrides.config.as_deref()),
    }
}
