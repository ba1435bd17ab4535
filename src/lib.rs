//! daybook: a personal journal for the terminal.
//!
//! Write free-text entries, optionally seeded with a random writing prompt,
//! and read back what you wrote from a list. Everything is stored locally in
//! a small key-value store; there is no server and no account.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use daybook::storage::FileStore;
//! use daybook::store::JournalStore;
//!
//! fn main() -> daybook::Result<()> {
//!     let storage = FileStore::open_default()?;
//!     let mut journal = JournalStore::load(Box::new(storage));
//!
//!     journal.generate_prompt();
//!     journal.set_draft("Walked to the harbour before work.");
//!     if let Some(entry) = journal.save() {
//!         println!("saved {} at {}", entry.id, entry.date);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`storage`]: string-keyed persistence (files on disk, or memory)
//! - [`store`]: the theme and journal stores built on top of storage
//! - [`model`]: entries and the editing/viewing mode
//! - [`prompts`]: the writing prompt list
//! - [`tui`]: terminal user interface
//! - [`cli`]: command-line interface
//! - [`config`]: configuration management
//! - [`error`]: error types and handling

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod prompts;
pub mod storage;
pub mod store;
pub mod tui;
pub mod util;

// Re-export commonly used types at the crate root
pub use error::{JournalError, Result};
pub use model::{EntryId, JournalEntry, Mode};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{JournalError, Result};
    pub use crate::model::{EntryId, JournalEntry, Mode};
    pub use crate::prompts::PromptList;
    pub use crate::storage::{FileStore, KeyValueStore, MemoryStore};
    pub use crate::store::{JournalStore, ThemeStore};
}
