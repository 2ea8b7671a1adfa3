//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod extract;
pub mod process;

use std::path::{Path, PathBuf};

use console::style;
use tracing::debug;

use scanvoice_core::{FieldRecord, ScanvoiceConfig};

/// Global options that override configuration.
pub struct Overrides {
    pub config: Option<PathBuf>,
    pub scratch_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

/// Load configuration from `--config`, else the user config file if present,
/// else defaults; then apply directory overrides.
pub fn load_config(overrides: &Overrides) -> anyhow::Result<ScanvoiceConfig> {
    let mut config = match &overrides.config {
        Some(path) => ScanvoiceConfig::from_file(path)
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {}", path.display(), e))?,
        None => {
            let path = config::default_config_path();
            if path.exists() {
                debug!("Using config file {}", path.display());
                ScanvoiceConfig::from_file(&path)?
            } else {
                ScanvoiceConfig::default()
            }
        }
    };

    if let Some(dir) = &overrides.scratch_dir {
        config.paths.scratch_dir = dir.clone();
    }
    if let Some(dir) = &overrides.output_dir {
        config.paths.output_dir = dir.clone();
    }

    Ok(config)
}

/// Print the numbered field list.
pub fn print_fields(record: &FieldRecord) {
    println!();
    println!("Extracted Fields:");
    for (i, (field, value)) in record.iter().enumerate() {
        println!("{:2}. {}: {}", i + 1, field, value);
    }
}

/// Print validation warnings to stderr.
pub fn print_warnings(warnings: &[String]) {
    for warning in warnings {
        eprintln!("{} {}", style("⚠").yellow(), warning);
    }
}

/// Path relative to the current directory when possible, for display.
pub fn display_path(path: &Path) -> String {
    std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(Path::to_path_buf))
        .unwrap_or_else(|| path.to_path_buf())
        .display()
        .to_string()
}
