//! Config command implementation.
//!
//! View and initialise daybook configuration.

use std::io::{self, Write};
use std::path::PathBuf;

use crate::cli::{Cli, ConfigAction, ConfigArgs, OutputFormat};
use crate::config::{default_config_path, Config};
use crate::error::{JournalError, Result};

use super::data_dir;

/// Run the config command.
pub fn run(cli: &Cli, config: &Config, args: &ConfigArgs) -> Result<()> {
    match &args.action {
        ConfigAction::Show => show_config(cli, config),
        ConfigAction::Path => show_config_path(cli),
        ConfigAction::Init { force } => init_config(cli, *force),
    }
}

/// Config file used by this invocation.
fn config_path(cli: &Cli) -> Result<PathBuf> {
    match &cli.config {
        Some(path) => Ok(path.clone()),
        None => default_config_path(),
    }
}

/// Show the effective configuration.
fn show_config(cli: &Cli, config: &Config) -> Result<()> {
    let mut out = io::stdout().lock();
    match cli.effective_output() {
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(config)?)?;
        }
        OutputFormat::Text => {
            let toml = toml::to_string_pretty(config).map_err(|e| JournalError::ConfigError {
                message: format!("Failed to render configuration: {e}"),
            })?;
            writeln!(out, "# data directory: {}", data_dir(cli, config)?.display())?;
            write!(out, "{toml}")?;
        }
    }
    Ok(())
}

/// Show configuration file path.
fn show_config_path(cli: &Cli) -> Result<()> {
    let path = config_path(cli)?;
    let mut out = io::stdout().lock();
    match cli.effective_output() {
        OutputFormat::Json => writeln!(
            out,
            "{}",
            serde_json::json!({ "path": path, "exists": path.exists() })
        )?,
        OutputFormat::Text => writeln!(out, "{}", path.display())?,
    }
    Ok(())
}

/// Write a default configuration file.
fn init_config(cli: &Cli, force: bool) -> Result<()> {
    let path = config_path(cli)?;
    if path.exists() && !force {
        return Err(JournalError::ConfigError {
            message: format!(
                "Configuration file already exists: {} (use --force to replace it)",
                path.display()
            ),
        });
    }

    Config::default().save_to(&path)?;
    if !cli.quiet {
        println!("Created configuration file: {}", path.display());
    }
    Ok(())
}
