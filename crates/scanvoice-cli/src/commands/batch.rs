//! Batch processing command for a directory of invoice PDFs.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use scanvoice_core::{BatchEvent, BatchOrchestrator, BatchResult, DocumentPipeline};

use super::{display_path, load_config, Overrides};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Directory containing PDF files (default: paths.input_dir from config)
    input_dir: Option<PathBuf>,

    /// Also write summary.csv to the output directory
    #[arg(long)]
    summary: bool,
}

/// Always exits zero. Per-document failures land in the summary; a batch
/// that cannot start (bad config, unavailable engine) is reported on stderr.
pub fn run(args: BatchArgs, overrides: &Overrides) -> anyhow::Result<()> {
    if let Err(e) = run_batch(args, overrides) {
        eprintln!("{} Batch could not start: {:#}", style("✗").red(), e);
    }
    Ok(())
}

fn run_batch(args: BatchArgs, overrides: &Overrides) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(overrides)?;
    let input_dir = args.input_dir.unwrap_or_else(|| config.paths.input_dir.clone());

    if !input_dir.is_dir() {
        println!(
            "{} Input directory not found: {}",
            style("ℹ").blue(),
            input_dir.display()
        );
        return Ok(());
    }

    let documents = BatchOrchestrator::discover(&input_dir)?;
    if documents.is_empty() {
        println!(
            "{} No PDF files found in {}",
            style("ℹ").blue(),
            input_dir.display()
        );
        return Ok(());
    }

    println!(
        "{} Found {} PDF files to process",
        style("ℹ").blue(),
        documents.len()
    );

    let orchestrator = BatchOrchestrator::new(DocumentPipeline::from_config(&config)?);

    let pb = ProgressBar::new(documents.len() as u64);
    if let Ok(progress_style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        pb.set_style(progress_style.progress_chars("=>-"));
    }

    let result = orchestrator.process_all(&documents, |event| match event {
        BatchEvent::Started { document, .. } => {
            pb.set_message(file_name(document));
        }
        BatchEvent::Finished { .. } => pb.inc(1),
    });

    pb.finish_and_clear();

    print_summary(&result, start);

    if args.summary {
        let summary_path = config.paths.output_dir.join("summary.csv");
        match write_summary(&summary_path, &result) {
            Ok(()) => println!(
                "{} Summary written to {}",
                style("✓").green(),
                summary_path.display()
            ),
            Err(e) => warn!("Failed to write summary {}: {}", summary_path.display(), e),
        }
    }

    Ok(())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn print_summary(result: &BatchResult, start: Instant) {
    println!();
    println!(
        "{} Batch processing complete in {:.1}s",
        style("✓").green(),
        start.elapsed().as_secs_f64()
    );
    println!("  Discovered: {}", result.discovered);
    println!("  {} {}", style("Successful:").green(), result.success_count());
    println!("  {} {}", style("Failed:").red(), result.failure_count());

    for output in &result.succeeded {
        for warning in &output.warnings {
            println!(
                "  {} {}: {}",
                style("⚠").yellow(),
                file_name(&output.document),
                warning
            );
        }
    }

    if !result.failed.is_empty() {
        println!();
        println!("{}", style("Failed documents:").red());
        for failure in &result.failed {
            println!(
                "  {} {} [{}] {}",
                style("✗").red(),
                display_path(&failure.document),
                failure.stage,
                failure.error
            );
        }
    }
}

fn write_summary(path: &Path, result: &BatchResult) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut wtr = csv::Writer::from_path(path)?;
    for row in result.summary_rows() {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}
