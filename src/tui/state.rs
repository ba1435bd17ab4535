//! TUI application state.

use crate::model::{JournalEntry, Mode};
use crate::store::{JournalStore, ThemeStore};

use super::events::{Action, KeyContext};
use super::theme::Theme;

/// Terminals narrower than this hide the entry list unless it is opened.
pub const NARROW_WIDTH: u16 = 80;

/// Which panel receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// The entry list.
    Sidebar,
    /// The editor or viewer.
    #[default]
    Main,
}

/// Application state.
pub struct AppState {
    /// Entries and editor state.
    pub journal: JournalStore,
    /// Dark/light preference.
    pub theme_store: ThemeStore,
    /// Panel receiving keys.
    pub focus: Focus,
    /// Highlighted row in the entry list.
    pub list_cursor: usize,
    /// Scroll offset of the viewer.
    pub scroll: u16,
    /// Show help overlay.
    pub show_help: bool,
    /// One-shot message for the status bar.
    pub status_message: Option<String>,
    /// Characters of content shown per list row.
    pub preview_chars: usize,
    /// Set when the user asked to leave.
    pub should_quit: bool,
}

impl AppState {
    /// Compose the two stores into a fresh UI state.
    pub fn new(journal: JournalStore, theme_store: ThemeStore, preview_chars: usize) -> Self {
        let list_cursor = journal.entries().len().saturating_sub(1);
        Self {
            journal,
            theme_store,
            focus: Focus::Main,
            list_cursor,
            scroll: 0,
            show_help: false,
            status_message: None,
            preview_chars,
            should_quit: false,
        }
    }

    /// Palette for the current preference.
    pub fn theme(&self) -> Theme {
        Theme::for_preference(self.theme_store.get())
    }

    /// Whether both stores are still writing to disk.
    pub fn is_persistent(&self) -> bool {
        self.journal.is_persistent() && self.theme_store.is_persistent()
    }

    /// Whether the entry list is drawn at this terminal width.
    pub fn sidebar_visible(&self, width: u16) -> bool {
        width >= NARROW_WIDTH || self.journal.sidebar_open()
    }

    /// Entry under the list cursor.
    pub fn highlighted(&self) -> Option<&JournalEntry> {
        self.journal.entries().get(self.list_cursor)
    }

    /// How keys should be interpreted right now.
    pub fn key_context(&self) -> KeyContext {
        match (self.focus, self.journal.mode()) {
            (Focus::Sidebar, _) => KeyContext::Sidebar,
            (Focus::Main, Mode::Editing) => KeyContext::Editor,
            (Focus::Main, Mode::Viewing(_)) => KeyContext::Viewer,
        }
    }

    /// Apply one user action.
    pub fn apply(&mut self, action: Action) {
        if self.show_help && !matches!(action, Action::Quit) {
            // Any key dismisses help
            self.show_help = false;
            return;
        }

        match action {
            Action::Quit => self.should_quit = true,
            Action::Save => self.save(),
            Action::NewEntry => {
                self.journal.start_new();
                self.focus = Focus::Main;
                self.scroll = 0;
            }
            Action::GeneratePrompt => {
                if self.journal.mode().is_editing() {
                    let prompt = self.journal.generate_prompt().to_string();
                    tracing::debug!(%prompt, "prompt generated");
                } else {
                    self.status_message = Some("Start a new entry to use a prompt".to_string());
                }
            }
            Action::ClearPrompt => self.journal.clear_prompt(),
            Action::ToggleTheme => {
                let is_dark = self.theme_store.toggle();
                self.status_message = Some(format!(
                    "{} theme",
                    if is_dark { "Dark" } else { "Light" }
                ));
            }
            Action::ToggleSidebar => {
                self.focus = if self.journal.toggle_sidebar() {
                    Focus::Sidebar
                } else {
                    Focus::Main
                };
            }
            Action::SwitchFocus => {
                self.focus = match self.focus {
                    Focus::Sidebar => Focus::Main,
                    Focus::Main => Focus::Sidebar,
                };
            }
            Action::ToggleHelp => self.show_help = true,
            Action::Up => match self.focus {
                Focus::Sidebar => self.list_cursor = self.list_cursor.saturating_sub(1),
                Focus::Main => self.scroll = self.scroll.saturating_sub(1),
            },
            Action::Down => match self.focus {
                Focus::Sidebar => {
                    if self.list_cursor + 1 < self.journal.entries().len() {
                        self.list_cursor += 1;
                    }
                }
                Focus::Main => self.scroll = self.scroll.saturating_add(1),
            },
            Action::Open => self.open_highlighted(),
            Action::Back => {
                if self.journal.sidebar_open() {
                    self.journal.toggle_sidebar();
                }
                self.focus = Focus::Main;
            }
            Action::Insert(c) => self.journal.push_char(c),
            Action::Newline => self.journal.push_newline(),
            Action::Backspace => self.journal.backspace(),
        }
    }

    fn save(&mut self) {
        if !self.journal.mode().is_editing() {
            return;
        }
        let saved = self.journal.save().map(|entry| entry.date.clone());
        match saved {
            Some(date) => {
                self.list_cursor = self.journal.entries().len().saturating_sub(1);
                self.focus = Focus::Main;
                self.status_message = Some(format!("Saved entry from {date}"));
            }
            None => {
                self.status_message = Some("Nothing to save".to_string());
            }
        }
    }

    fn open_highlighted(&mut self) {
        if let Some(id) = self.highlighted().map(|e| e.id) {
            self.journal.select_for_viewing(id);
            self.focus = Focus::Main;
            self.scroll = 0;
        }
    }
}
