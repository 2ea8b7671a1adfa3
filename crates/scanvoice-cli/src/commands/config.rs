//! `scanvoice config`: inspect and edit the JSON settings file.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;

use scanvoice_core::ScanvoiceConfig;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    action: ConfigAction,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective settings as JSON
    Show,

    /// Write a settings file filled with defaults
    Init {
        /// Write here instead of the active settings path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print one setting, e.g. `ocr.language`
    Get { key: String },

    /// Change one setting; the value is parsed as JSON, else taken as text
    Set { key: String, value: String },

    /// Print where settings are read from
    Path,
}

/// `<config_dir>/scanvoice/config.json`
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("scanvoice")
        .join("config.json")
}

pub fn run(args: ConfigArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let file = ConfigFile {
        path: config_path.map_or_else(default_config_path, Path::to_path_buf),
    };

    match args.action {
        ConfigAction::Show => {
            println!("{}", serde_json::to_string_pretty(&file.load()?)?);
        }
        ConfigAction::Init { output, force } => {
            let target = ConfigFile {
                path: output.unwrap_or(file.path),
            };
            if target.path.exists() && !force {
                anyhow::bail!(
                    "{} already exists (pass --force to replace it)",
                    target.path.display()
                );
            }
            target.store(&ScanvoiceConfig::default())?;
            println!("{} Wrote defaults to {}", style("✓").green(), target.path.display());
        }
        ConfigAction::Get { key } => {
            let json = serde_json::to_value(file.load()?)?;
            let value =
                lookup(&json, &key).ok_or_else(|| anyhow::anyhow!("Unknown setting: {}", key))?;
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        ConfigAction::Set { key, value } => {
            let value = parse_value(&value);
            file.update(&key, value.clone())?;
            println!("{} {} = {}", style("✓").green(), key, value);
        }
        ConfigAction::Path => {
            let state = if file.path.exists() {
                style("present").green()
            } else {
                style("absent, defaults in use").yellow()
            };
            println!("{} ({})", file.path.display(), state);
        }
    }

    Ok(())
}

/// The settings file at one path; absent means defaults.
struct ConfigFile {
    path: PathBuf,
}

impl ConfigFile {
    fn load(&self) -> anyhow::Result<ScanvoiceConfig> {
        if !self.path.exists() {
            return Ok(ScanvoiceConfig::default());
        }
        ScanvoiceConfig::from_file(&self.path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", self.path.display(), e))
    }

    fn store(&self, config: &ScanvoiceConfig) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        config.save(&self.path)?;
        Ok(())
    }

    /// Replace one setting, rejecting values the settings schema cannot hold.
    fn update(&self, key: &str, value: Value) -> anyhow::Result<()> {
        let mut json = serde_json::to_value(self.load()?)?;
        *lookup_mut(&mut json, key).ok_or_else(|| anyhow::anyhow!("Unknown setting: {}", key))? =
            value;

        let config: ScanvoiceConfig = serde_json::from_value(json)
            .map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", key, e))?;
        self.store(&config)
    }
}

fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn lookup<'a>(json: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(json, |node, part| node.get(part))
}

fn lookup_mut<'a>(json: &'a mut Value, key: &str) -> Option<&'a mut Value> {
    key.split('.').try_fold(json, |node, part| node.get_mut(part))
}
