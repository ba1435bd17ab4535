//! TUI launcher command.
//!
//! Opens the interactive journal. If the data directory cannot be used the
//! journal still opens, backed by memory for this session only.

use tracing::warn;

use crate::cli::Cli;
use crate::config::Config;
use crate::error::Result;
use crate::storage::{FileStore, MemoryStore};
use crate::store::{JournalStore, ThemeStore};

use super::{data_dir, journal_options};

/// Run the TUI command.
pub fn run(cli: &Cli, config: &Config) -> Result<()> {
    let (journal, theme) = match data_dir(cli, config).and_then(FileStore::open) {
        Ok(store) => (
            JournalStore::load_with(Box::new(store.clone()), journal_options(config)),
            ThemeStore::load(Box::new(store)),
        ),
        Err(e) => {
            warn!(error = %e, "storage unavailable, journal will not be saved");
            (
                JournalStore::load_with(Box::new(MemoryStore::new()), journal_options(config))
                    .session_only(),
                ThemeStore::load(Box::new(MemoryStore::new())).session_only(),
            )
        }
    };

    crate::tui::launch(journal, theme, config)
}
