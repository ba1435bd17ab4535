//! Show command implementation.

use std::io::{self, Write};

use crate::cli::{Cli, OutputFormat, ShowArgs};
use crate::config::Config;
use crate::error::{JournalError, Result};

use super::load_journal;

/// Run the show command.
pub fn run(cli: &Cli, config: &Config, args: &ShowArgs) -> Result<()> {
    let journal = load_journal(cli, config)?;
    let entry = journal
        .get(args.id)
        .ok_or(JournalError::EntryNotFound { id: args.id })?;

    let mut out = io::stdout().lock();
    match cli.effective_output() {
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(entry)?)?;
        }
        OutputFormat::Text => {
            writeln!(out, "{}", entry.date)?;
            if let Some(prompt) = &entry.prompt {
                writeln!(out, "Prompt: {prompt}")?;
            }
            writeln!(out)?;
            writeln!(out, "{}", entry.content)?;
        }
    }

    Ok(())
}
