//! Application state stores.
//!
//! Two stores make up the whole application state:
//!
//! - [`ThemeStore`]: the dark/light preference
//! - [`JournalStore`]: the entry log plus transient editor/viewer state
//!
//! Both hydrate from a [`KeyValueStore`](crate::storage::KeyValueStore) on
//! load and write through to it on every mutation. Neither ever returns a
//! storage error to its caller: reads fall back to defaults and a failed
//! write switches the store into session-only mode.

mod journal;
mod theme;

pub use journal::{JournalOptions, JournalStore};
pub use theme::ThemeStore;

use std::fmt;

use chrono::{DateTime, Local};

/// Source of the current time.
pub trait Clock: fmt::Debug {
    /// Current local time.
    fn now(&self) -> DateTime<Local>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}
