//! Process command - extract data from a single invoice PDF.

use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use scanvoice_core::DocumentPipeline;

use super::{load_config, print_fields, print_warnings, Overrides};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    /// Output CSV name (default: <stem>_extracted.csv in the output directory)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn run(args: ProcessArgs, overrides: &Overrides) -> anyhow::Result<()> {
    let config = load_config(overrides)?;
    let pipeline = DocumentPipeline::from_config(&config)?;

    info!("Processing file: {}", args.input.display());
    println!(
        "{} Processing {}",
        style("ℹ").blue(),
        args.input.display()
    );

    let output = pipeline.process(&args.input, args.output.as_deref()).map_err(|failure| {
        eprintln!(
            "{} Failed while {}: {}",
            style("✗").red(),
            failure.stage,
            failure.error
        );
        anyhow::Error::new(failure)
    })?;

    print_warnings(&output.warnings);

    println!(
        "{} Successfully processed {} page(s) in {}ms. CSV saved to {}",
        style("✓").green(),
        output.page_count,
        output.processing_time_ms,
        output.csv_path.display()
    );

    print_fields(&output.record);

    Ok(())
}
