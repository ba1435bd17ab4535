//! CLI command implementations.
//!
//! Each command is implemented in its own module with a `run` function
//! that handles the command logic.

pub mod config;
pub mod list;
pub mod prompt;
pub mod show;
pub mod theme;
pub mod tui;
pub mod write;

use std::path::PathBuf;

use crate::cli::Cli;
use crate::config::Config;
use crate::error::Result;
use crate::storage::FileStore;
use crate::store::{JournalOptions, JournalStore, SystemClock, ThemeStore};

/// Data directory from CLI args, then config, then the platform default.
pub fn data_dir(cli: &Cli, config: &Config) -> Result<PathBuf> {
    match &cli.data_dir {
        Some(dir) => Ok(dir.clone()),
        None => config.data_dir(),
    }
}

/// Open the file store for this invocation.
pub fn open_storage(cli: &Cli, config: &Config) -> Result<FileStore> {
    FileStore::open(data_dir(cli, config)?)
}

/// Journal options derived from configuration.
pub fn journal_options(config: &Config) -> JournalOptions {
    JournalOptions {
        prompts: config.prompt_list(),
        date_format: config.display.date_format.clone(),
        clock: Box::new(SystemClock),
    }
}

/// Load the journal from the configured storage.
pub fn load_journal(cli: &Cli, config: &Config) -> Result<JournalStore> {
    let storage = open_storage(cli, config)?;
    Ok(JournalStore::load_with(Box::new(storage), journal_options(config)))
}

/// Load the theme preference from the configured storage.
pub fn load_theme(cli: &Cli, config: &Config) -> Result<ThemeStore> {
    let storage = open_storage(cli, config)?;
    Ok(ThemeStore::load(Box::new(storage)))
}
