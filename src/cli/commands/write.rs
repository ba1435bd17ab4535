//! Write command implementation.
//!
//! Saves one entry non-interactively, from an argument or from stdin.

use std::io::{self, Read, Write};

use crate::cli::{Cli, OutputFormat, WriteArgs};
use crate::config::Config;
use crate::error::{JournalError, Result};

use super::{data_dir, load_journal};

/// Run the write command.
pub fn run(cli: &Cli, config: &Config, args: &WriteArgs) -> Result<()> {
    let text = match &args.text {
        Some(text) => text.clone(),
        None => read_stdin()?,
    };

    let mut journal = load_journal(cli, config)?;
    if args.prompt {
        journal.generate_prompt();
    }
    journal.set_draft(text);

    let Some(entry) = journal.save().cloned() else {
        if !cli.quiet {
            eprintln!("Nothing to save: the entry is empty");
        }
        return Ok(());
    };

    if !journal.is_persistent() {
        return Err(JournalError::StorageUnavailable {
            path: data_dir(cli, config)?,
        });
    }

    let mut out = io::stdout().lock();
    match cli.effective_output() {
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&entry)?)?;
        }
        OutputFormat::Text if cli.quiet => {}
        OutputFormat::Text => {
            writeln!(out, "Saved entry {} ({})", entry.id, entry.date)?;
            if let Some(prompt) = &entry.prompt {
                writeln!(out, "Prompt: {prompt}")?;
            }
        }
    }

    Ok(())
}

/// Read the entry body from stdin, dropping the final line break.
fn read_stdin() -> Result<String> {
    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .map_err(|e| JournalError::io("Failed to read entry from stdin", e))?;
    Ok(strip_final_newline(text))
}

fn strip_final_newline(mut text: String) -> String {
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    text
}
