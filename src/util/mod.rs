//! Utility functions shared across the crate.
//!
//! - Atomic file writes for the storage layer and config files
//! - Character-safe text previews for entry lists

use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{JournalError, Result};

/// Atomically write content to a file.
///
/// The content is written to a temporary file in the same directory, flushed,
/// and then renamed over the target. If any step fails the original file (if
/// it exists) remains unchanged. Missing parent directories are created.
///
/// # Example
///
/// ```rust,no_run
/// use daybook::util::atomic_write;
///
/// atomic_write("theme.json", b"true").unwrap();
/// ```
pub fn atomic_write(path: impl AsRef<Path>, content: &[u8]) -> Result<()> {
    let path = path.as_ref();

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        Some(_) => Path::new("."),
        None => {
            return Err(JournalError::IoError {
                context: format!("Cannot determine parent directory for: {}", path.display()),
                source: io::Error::new(io::ErrorKind::InvalidInput, "No parent directory"),
            })
        }
    };

    if !parent.exists() {
        std::fs::create_dir_all(parent).map_err(|e| {
            JournalError::io(format!("Failed to create directory: {}", parent.display()), e)
        })?;
    }

    // Same directory keeps the rename on one filesystem
    let mut temp_file = NamedTempFile::new_in(parent).map_err(|e| {
        JournalError::io(
            format!("Failed to create temporary file in: {}", parent.display()),
            e,
        )
    })?;

    temp_file.write_all(content).map_err(|e| {
        JournalError::io(
            format!("Failed to write to temporary file for: {}", path.display()),
            e,
        )
    })?;

    temp_file.flush().map_err(|e| {
        JournalError::io(
            format!("Failed to flush temporary file for: {}", path.display()),
            e,
        )
    })?;

    temp_file.persist(path).map_err(|e| {
        JournalError::io(
            format!("Failed to atomically write file: {}", path.display()),
            e.error,
        )
    })?;

    Ok(())
}

/// Build a one-line preview of `text` of at most `max_chars` characters.
///
/// Newlines collapse to spaces. The result always ends in `...`, matching how
/// entry lists show a teaser rather than the whole body.
pub fn preview(text: &str, max_chars: usize) -> String {
    let mut out: String = text
        .chars()
        .take(max_chars)
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    out.push_str("...");
    out
}
