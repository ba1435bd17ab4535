//! Core data structures for journal entries.

use std::fmt;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Identifier of a journal entry.
pub type EntryId = u64;

/// Default chrono format for entry dates (e.g. `3/14/2026, 9:05:12 PM`).
pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Whether chrono can render dates with `format`.
pub fn is_valid_date_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

/// One saved journal record.
///
/// Field order matches the persisted layout so that re-serializing a loaded
/// log reproduces the stored bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Unique id, derived from the creation time in Unix milliseconds.
    pub id: EntryId,
    /// Human-readable creation timestamp.
    pub date: String,
    /// The entry text.
    pub content: String,
    /// Writing prompt shown while the entry was written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

impl JournalEntry {
    /// Build an entry created at `created`.
    ///
    /// An unusable `date_format` falls back to [`DEFAULT_DATE_FORMAT`].
    pub fn new(
        id: EntryId,
        created: DateTime<Local>,
        date_format: &str,
        content: impl Into<String>,
        prompt: Option<String>,
    ) -> Self {
        let date_format = if is_valid_date_format(date_format) {
            date_format
        } else {
            DEFAULT_DATE_FORMAT
        };
        Self {
            id,
            date: created.format(date_format).to_string(),
            content: content.into(),
            prompt: prompt.filter(|p| !p.trim().is_empty()),
        }
    }

    /// Whether the entry satisfies the persisted-entry invariant.
    pub fn has_content(&self) -> bool {
        !self.content.trim().is_empty()
    }
}

/// Editor/viewer mode of the journal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Composing a new entry.
    #[default]
    Editing,
    /// Reading the entry with this id.
    Viewing(EntryId),
}

impl Mode {
    /// Whether the editor is showing.
    pub const fn is_editing(self) -> bool {
        matches!(self, Self::Editing)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Editing => write!(f, "editing"),
            Self::Viewing(_) => write!(f, "viewing"),
        }
    }
}
