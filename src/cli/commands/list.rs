//! List command implementation.
//!
//! Lists saved entries in the order they were written.

use std::io::{self, Write};

use serde::Serialize;

use crate::cli::{Cli, ListArgs, OutputFormat};
use crate::config::Config;
use crate::error::Result;
use crate::model::{EntryId, JournalEntry};
use crate::util::preview;

use super::load_journal;

/// One row of `list --json`.
#[derive(Debug, Serialize)]
struct EntrySummary<'a> {
    id: EntryId,
    date: &'a str,
    preview: String,
    has_prompt: bool,
}

impl<'a> EntrySummary<'a> {
    fn new(entry: &'a JournalEntry, preview_chars: usize) -> Self {
        Self {
            id: entry.id,
            date: &entry.date,
            preview: preview(&entry.content, preview_chars),
            has_prompt: entry.prompt.is_some(),
        }
    }
}

/// Run the list command.
pub fn run(cli: &Cli, config: &Config, args: &ListArgs) -> Result<()> {
    let journal = load_journal(cli, config)?;
    let entries = journal.entries();
    let skip = args
        .limit
        .map_or(0, |limit| entries.len().saturating_sub(limit));
    let shown = &entries[skip..];
    let preview_chars = config.display.preview_chars;

    let mut out = io::stdout().lock();
    match cli.effective_output() {
        OutputFormat::Json => {
            let rows: Vec<_> = shown
                .iter()
                .map(|e| EntrySummary::new(e, preview_chars))
                .collect();
            writeln!(out, "{}", serde_json::to_string_pretty(&rows)?)?;
        }
        OutputFormat::Text => {
            if shown.is_empty() {
                if !cli.quiet {
                    writeln!(out, "No entries yet. Start one with `daybook write`.")?;
                }
                return Ok(());
            }
            for entry in shown {
                let marker = if entry.prompt.is_some() { "*" } else { " " };
                writeln!(
                    out,
                    "{:>13} {marker} {:<24} {}",
                    entry.id,
                    entry.date,
                    preview(&entry.content, preview_chars)
                )?;
            }
        }
    }

    Ok(())
}
