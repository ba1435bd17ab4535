//! Terminal User Interface for daybook.
//!
//! A two-panel interface:
//! - Left: the entry list (hidden on narrow terminals until opened)
//! - Right: the editor for a new entry, or the viewer for a saved one
//!
//! Built with ratatui for cross-platform terminal support.

mod app;
mod components;
mod events;
mod state;
mod theme;

pub use app::draw_ui;
pub use events::{Action, KeyBindings, KeyContext};
pub use state::{AppState, Focus};
pub use theme::Theme;

use std::time::Duration;

use crate::config::Config;
use crate::error::Result;
use crate::store::{JournalStore, ThemeStore};

/// Launch the TUI application.
pub fn launch(journal: JournalStore, theme: ThemeStore, config: &Config) -> Result<()> {
    let mut state = AppState::new(journal, theme, config.display.preview_chars);
    app::run(
        &mut state,
        Duration::from_millis(config.display.tick_rate_ms),
    )
}
