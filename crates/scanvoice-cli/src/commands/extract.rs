//! Extract command - run field extraction on an existing text file.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;

use scanvoice_core::invoice::{extract_and_validate, FieldExtractor, FieldValidator};
use scanvoice_core::output::write_record_file;

use super::{load_config, print_fields, print_warnings, Overrides};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Recognized invoice text
    #[arg(required = true)]
    text_file: PathBuf,

    /// Output file (csv format only)
    #[arg(short, long, default_value = "extracted_invoice_data.csv")]
    output: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// CSV file with the fixed header
    Csv,
    /// JSON object on stdout
    Json,
    /// Numbered field list on stdout
    Text,
}

pub fn run(args: ExtractArgs, overrides: &Overrides) -> anyhow::Result<()> {
    let config = load_config(overrides)?;

    let text = fs::read_to_string(&args.text_file).map_err(|e| {
        anyhow::anyhow!("Failed to read {}: {}", args.text_file.display(), e)
    })?;

    let result = extract_and_validate(
        &FieldExtractor::from_config(&config.extraction),
        &FieldValidator::from_config(&config.extraction),
        &text,
    );

    print_warnings(&result.warnings);

    match args.format {
        OutputFormat::Csv => {
            write_record_file(&args.output, &result.record)?;
            println!(
                "{} Data extracted and saved to {}",
                style("✓").green(),
                args.output.display()
            );
            print_fields(&result.record);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result.record)?);
        }
        OutputFormat::Text => print_fields(&result.record),
    }

    Ok(())
}
