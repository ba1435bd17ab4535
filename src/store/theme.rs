//! Dark/light theme preference.

use tracing::{debug, warn};

use crate::storage::{KeyValueStore, THEME_KEY};

/// Persisted dark/light preference.
#[derive(Debug)]
pub struct ThemeStore {
    is_dark: bool,
    storage: Box<dyn KeyValueStore>,
    persistent: bool,
}

impl ThemeStore {
    /// Hydrate from `storage`. Missing or unreadable data means light mode.
    pub fn load(storage: Box<dyn KeyValueStore>) -> Self {
        let is_dark = match storage.get(THEME_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<bool>(&raw) {
                Ok(value) => value,
                Err(e) => {
                    warn!(error = %e, "ignoring malformed theme preference");
                    false
                }
            },
            Ok(None) => false,
            Err(e) => {
                warn!(error = %e, "could not read theme preference");
                false
            }
        };
        debug!(is_dark, "loaded theme preference");

        Self {
            is_dark,
            storage,
            persistent: true,
        }
    }

    /// Current preference.
    pub fn get(&self) -> bool {
        self.is_dark
    }

    /// Set the preference and write it through.
    pub fn set(&mut self, is_dark: bool) {
        self.is_dark = is_dark;
        if !self.persistent {
            return;
        }

        let raw = if is_dark { "true" } else { "false" };
        if let Err(e) = self.storage.set(THEME_KEY, raw) {
            warn!(error = %e, "theme preference will not persist this session");
            self.persistent = false;
        }
    }

    /// Flip the preference.
    pub fn toggle(&mut self) -> bool {
        self.set(!self.is_dark);
        self.is_dark
    }

    /// Stop writing to storage; changes last for this session only.
    pub fn session_only(mut self) -> Self {
        self.persistent = false;
        self
    }

    /// False once a write has failed.
    pub fn is_persistent(&self) -> bool {
        self.persistent
    }

    /// The backing storage.
    pub fn storage(&self) -> &dyn KeyValueStore {
        self.storage.as_ref()
    }
}
