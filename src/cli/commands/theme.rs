//! Theme command implementation.
//!
//! Prints or changes the dark/light preference shared with the TUI.

use std::io::{self, Write};

use crate::cli::{Cli, OutputFormat, ThemeArgs, ThemeChoice};
use crate::config::Config;
use crate::error::{JournalError, Result};

use super::{data_dir, load_theme};

/// Run the theme command.
pub fn run(cli: &Cli, config: &Config, args: &ThemeArgs) -> Result<()> {
    let mut theme = load_theme(cli, config)?;

    match args.choice {
        Some(ThemeChoice::Dark) => theme.set(true),
        Some(ThemeChoice::Light) => theme.set(false),
        Some(ThemeChoice::Toggle) => {
            theme.toggle();
        }
        None => {}
    }

    if !theme.is_persistent() {
        return Err(JournalError::StorageUnavailable {
            path: data_dir(cli, config)?,
        });
    }

    let name = if theme.get() { "dark" } else { "light" };
    let mut out = io::stdout().lock();
    match cli.effective_output() {
        OutputFormat::Json => writeln!(out, "{}", serde_json::json!({ "theme": name }))?,
        OutputFormat::Text => writeln!(out, "{name}")?,
    }
    Ok(())
}
