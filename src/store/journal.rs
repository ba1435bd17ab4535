//! Entry log and editor/viewer state.

use std::collections::HashSet;

use chrono::{DateTime, Local};
use rand::Rng;
use tracing::{debug, warn};

use crate::error::Result;
use crate::model::{EntryId, JournalEntry, Mode, DEFAULT_DATE_FORMAT};
use crate::prompts::PromptList;
use crate::storage::{KeyValueStore, ENTRIES_KEY};

use super::{Clock, SystemClock};

/// Knobs for a [`JournalStore`].
#[derive(Debug)]
pub struct JournalOptions {
    /// Prompts offered by [`JournalStore::generate_prompt`].
    pub prompts: PromptList,
    /// chrono format string for entry dates.
    pub date_format: String,
    /// Time source for ids and dates.
    pub clock: Box<dyn Clock>,
}

impl Default for JournalOptions {
    fn default() -> Self {
        Self {
            prompts: PromptList::with_defaults(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            clock: Box::new(SystemClock),
        }
    }
}

/// The journal: an append-only entry log plus the state of the editor.
///
/// The log is persisted as one JSON array on every save. Everything else
/// (draft, selection, prompt, sidebar) is session state and resets on
/// [`save`](Self::save), [`select_for_viewing`](Self::select_for_viewing)
/// and [`start_new`](Self::start_new).
#[derive(Debug)]
pub struct JournalStore {
    entries: Vec<JournalEntry>,
    draft: String,
    selected: Option<EntryId>,
    prompt_enabled: bool,
    current_prompt: String,
    sidebar_open: bool,
    storage: Box<dyn KeyValueStore>,
    persistent: bool,
    options: JournalOptions,
}

impl JournalStore {
    /// Hydrate from `storage` with default options.
    pub fn load(storage: Box<dyn KeyValueStore>) -> Self {
        Self::load_with(storage, JournalOptions::default())
    }

    /// Hydrate from `storage`.
    ///
    /// A missing log is an empty journal. A log that is not a JSON array is
    /// discarded as a whole; inside an array, records that do not decode,
    /// have blank content, or repeat an earlier id are dropped one by one.
    pub fn load_with(storage: Box<dyn KeyValueStore>, options: JournalOptions) -> Self {
        let entries = match storage.get(ENTRIES_KEY) {
            Ok(Some(raw)) => decode_entries(&raw),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "could not read journal entries");
                Vec::new()
            }
        };
        debug!(count = entries.len(), "loaded journal entries");

        Self {
            entries,
            draft: String::new(),
            selected: None,
            prompt_enabled: false,
            current_prompt: String::new(),
            sidebar_open: false,
            storage,
            persistent: true,
            options,
        }
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// Look up an entry by id.
    pub fn get(&self, id: EntryId) -> Option<&JournalEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.selected.map_or(Mode::Editing, Mode::Viewing)
    }

    /// The entry being viewed, if any.
    pub fn selected(&self) -> Option<&JournalEntry> {
        self.selected.and_then(|id| self.get(id))
    }

    /// Unsaved draft text.
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Prompt attached to the draft, if prompt usage is on.
    pub fn current_prompt(&self) -> Option<&str> {
        (self.prompt_enabled && !self.current_prompt.is_empty())
            .then_some(self.current_prompt.as_str())
    }

    /// Whether the sidebar is open on narrow screens.
    pub fn sidebar_open(&self) -> bool {
        self.sidebar_open
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

    /// Prompts this journal draws from.
    pub fn prompts(&self) -> &PromptList {
        &self.options.prompts
    }

    /// The backing storage.
    pub fn storage(&self) -> &dyn KeyValueStore {
        self.storage.as_ref()
    }

    /// The log as it is persisted.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.entries)?)
    }

    /// Replace the draft text.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Append a character to the draft.
    pub fn push_char(&mut self, c: char) {
        self.draft.push(c);
    }

    /// Append a line break to the draft.
    pub fn push_newline(&mut self) {
        self.draft.push('\n');
    }

    /// Remove the last character of the draft.
    pub fn backspace(&mut self) {
        self.draft.pop();
    }

    /// Save the current draft with the current prompt.
    ///
    /// Blank drafts are ignored and `None` is returned.
    pub fn save(&mut self) -> Option<&JournalEntry> {
        let prompt = self.current_prompt().map(str::to_string);
        let content = self.draft.clone();
        self.save_entry(&content, prompt)
    }

    /// Save `content` as a new entry with an optional prompt.
    ///
    /// Blank content is ignored and `None` is returned. Otherwise the entry is
    /// appended, the log is written through and the editor resets.
    pub fn save_entry(&mut self, content: &str, prompt: Option<String>) -> Option<&JournalEntry> {
        if content.trim().is_empty() {
            debug!("ignoring blank entry");
            return None;
        }

        let now = self.options.clock.now();
        let id = self.next_id(now);
        let entry = JournalEntry::new(id, now, &self.options.date_format, content, prompt);
        debug!(id, chars = entry.content.chars().count(), "saving entry");

        self.entries.push(entry);
        self.persist();
        self.reset_editor();
        self.selected = None;

        self.entries.last()
    }

    /// View the entry with `id`. Unknown ids are ignored.
    pub fn select_for_viewing(&mut self, id: EntryId) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        self.selected = Some(id);
        self.reset_editor();
        true
    }

    /// Leave the viewer and start a blank entry.
    pub fn start_new(&mut self) {
        self.selected = None;
        self.reset_editor();
    }

    /// Attach a random prompt to the draft.
    pub fn generate_prompt(&mut self) -> &str {
        self.generate_prompt_with(&mut rand::thread_rng())
    }

    /// Attach a prompt drawn with `rng` to the draft.
    pub fn generate_prompt_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &str {
        self.current_prompt = self.options.prompts.choose(rng).to_string();
        self.prompt_enabled = true;
        &self.current_prompt
    }

    /// Detach the prompt from the draft.
    pub fn clear_prompt(&mut self) {
        self.current_prompt.clear();
        self.prompt_enabled = false;
    }

    /// Flip sidebar visibility.
    pub fn toggle_sidebar(&mut self) -> bool {
        self.sidebar_open = !self.sidebar_open;
        self.sidebar_open
    }

    fn reset_editor(&mut self) {
        self.draft.clear();
        self.clear_prompt();
        self.sidebar_open = false;
    }

    /// Millisecond timestamp, bumped past the newest id when the clock has
    /// not moved on.
    fn next_id(&self, now: DateTime<Local>) -> EntryId {
        let stamp = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        match self.entries.iter().map(|e| e.id).max() {
            Some(last) if stamp <= last => last.saturating_add(1),
            _ => stamp,
        }
    }

    fn persist(&mut self) {
        if !self.persistent {
            return;
        }

        let raw = match self.to_json() {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "could not serialize journal entries");
                return;
            }
        };

        if let Err(e) = self.storage.set(ENTRIES_KEY, &raw) {
            warn!(error = %e, "journal entries will not persist this session");
            self.persistent = false;
        }
    }
}

fn decode_entries(raw: &str) -> Vec<JournalEntry> {
    let values: Vec<serde_json::Value> = match serde_json::from_str(raw) {
        Ok(values) => values,
        Err(e) => {
            warn!(error = %e, "journal entries are corrupt, starting empty");
            return Vec::new();
        }
    };

    let mut seen = HashSet::with_capacity(values.len());
    let mut entries = Vec::with_capacity(values.len());
    for (index, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<JournalEntry>(value) {
            Ok(entry) if !entry.has_content() => {
                warn!(index, id = entry.id, "dropping entry without content");
            }
            Ok(entry) if !seen.insert(entry.id) => {
                warn!(index, id = entry.id, "dropping entry with duplicate id");
            }
            Ok(entry) => entries.push(entry),
            Err(e) => warn!(index, error = %e, "dropping malformed entry"),
        }
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::JournalError;
    use crate::storage::{FileStore, MemoryStore};
    use crate::store::FixedClock;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[derive(Debug)]
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(JournalError::io("write", std::io::Error::other("read-only")))
        }
    }

    #[derive(Debug)]
    struct UnreadableStore;

    impl KeyValueStore for UnreadableStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(JournalError::io("read", std::io::Error::other("unplugged")))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            Ok(())
        }
    }

    fn frozen() -> JournalOptions {
        JournalOptions {
            clock: Box::new(FixedClock(
                Local.with_ymd_and_hms(2026, 1, 2, 8, 30, 0).unwrap(),
            )),
            ..JournalOptions::default()
        }
    }

    fn empty_journal() -> JournalStore {
        JournalStore::load_with(Box::new(MemoryStore::new()), frozen())
    }

    #[test]
    fn test_first_load_is_empty_editor() {
        let journal = empty_journal();
        assert!(journal.entries().is_empty());
        assert_eq!(journal.draft(), "");
        assert_eq!(journal.mode(), Mode::Editing);
        assert_eq!(journal.current_prompt(), None);
        assert!(!journal.sidebar_open());
    }

    #[test]
    fn test_save_appends_entry() {
        let mut journal = empty_journal();
        journal.set_draft("Hello world");
        let saved = journal.save().cloned().unwrap();

        assert_eq!(saved.content, "Hello world");
        assert_eq!(saved.prompt, None);
        assert_eq!(saved.date, "1/2/2026, 8:30:00 AM");
        assert_eq!(journal.entries(), &[saved]);
        assert_eq!(journal.draft(), "");
    }

    #[test]
    fn test_blank_save_is_noop() {
        let mut journal = empty_journal();
        assert!(journal.save().is_none());
        journal.set_draft("  \n\t ");
        assert!(journal.save().is_none());
        assert!(journal.entries().is_empty());
        assert_eq!(journal.storage().get(ENTRIES_KEY).unwrap(), None);
        // Draft is left alone
        assert_eq!(journal.draft(), "  \n\t ");
    }

    #[test]
    fn test_prompt_attached_to_saved_entry() {
        let mut journal = empty_journal();
        let prompt = journal
            .generate_prompt_with(&mut StdRng::seed_from_u64(3))
            .to_string();
        assert!(journal.prompts().contains(&prompt));
        assert_eq!(journal.current_prompt(), Some(prompt.as_str()));

        journal.set_draft("Reflections");
        let saved = journal.save().cloned().unwrap();
        assert_eq!(saved.prompt.as_deref(), Some(prompt.as_str()));
        assert_eq!(journal.current_prompt(), None);
    }

    #[test]
    fn test_cleared_prompt_not_attached() {
        let mut journal = empty_journal();
        journal.generate_prompt();
        journal.clear_prompt();
        journal.set_draft("No prompt here");
        assert_eq!(journal.save().unwrap().prompt, None);
    }

    #[test]
    fn test_ids_unique_under_frozen_clock() {
        let mut journal = empty_journal();
        for i in 0..5 {
            journal.save_entry(&format!("entry {i}"), None);
        }
        let ids: HashSet<_> = journal.entries().iter().map(|e| e.id).collect();
        assert_eq!(ids.len(), 5);

        let first = journal.entries()[0].id;
        let expected = u64::try_from(
            Local
                .with_ymd_and_hms(2026, 1, 2, 8, 30, 0)
                .unwrap()
                .timestamp_millis(),
        )
        .unwrap();
        assert_eq!(first, expected);
        assert_eq!(journal.entries()[4].id, first + 4);
    }

    #[test]
    fn test_view_then_new_returns_to_editing() {
        let mut journal = empty_journal();
        let id = journal.save_entry("Something", None).unwrap().id;

        journal.set_draft("half written");
        journal.toggle_sidebar();
        assert!(journal.select_for_viewing(id));
        assert_eq!(journal.mode(), Mode::Viewing(id));
        assert_eq!(journal.selected().unwrap().content, "Something");
        assert_eq!(journal.draft(), "");
        assert!(!journal.sidebar_open());

        journal.start_new();
        assert_eq!(journal.mode(), Mode::Editing);
        assert_eq!(journal.draft(), "");
    }

    #[test]
    fn test_select_unknown_id_is_ignored() {
        let mut journal = empty_journal();
        journal.set_draft("keep me");
        assert!(!journal.select_for_viewing(99));
        assert_eq!(journal.mode(), Mode::Editing);
        assert_eq!(journal.draft(), "keep me");
    }

    #[test]
    fn test_save_from_viewing_returns_to_editing() {
        let mut journal = empty_journal();
        let id = journal.save_entry("first", None).unwrap().id;
        journal.select_for_viewing(id);
        journal.save_entry("second", None);
        assert_eq!(journal.mode(), Mode::Editing);
    }

    #[test]
    fn test_toggle_sidebar() {
        let mut journal = empty_journal();
        assert!(journal.toggle_sidebar());
        assert!(!journal.toggle_sidebar());
    }

    #[test]
    fn test_draft_editing() {
        let mut journal = empty_journal();
        journal.push_char('h');
        journal.push_char('i');
        journal.push_newline();
        journal.push_char('x');
        journal.backspace();
        assert_eq!(journal.draft(), "hi\n");
    }

    #[test]
    fn test_reload_round_trips_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let mut journal =
            JournalStore::load_with(Box::new(FileStore::open(dir.path()).unwrap()), frozen());
        journal.save_entry("one", None);
        journal.save_entry("two", Some("What now?".into()));
        let written = journal.storage().get(ENTRIES_KEY).unwrap().unwrap();
        drop(journal);

        let reloaded = JournalStore::load(Box::new(FileStore::open(dir.path()).unwrap()));
        assert_eq!(reloaded.entries().len(), 2);
        assert_eq!(reloaded.to_json().unwrap(), written);
    }

    #[test]
    fn test_corrupt_blob_starts_empty() {
        let storage = MemoryStore::with_records([(ENTRIES_KEY, "{\"id\": 1")]);
        let journal = JournalStore::load(Box::new(storage));
        assert!(journal.entries().is_empty());

        let storage = MemoryStore::with_records([(ENTRIES_KEY, "{\"id\": 1}")]);
        let journal = JournalStore::load(Box::new(storage));
        assert!(journal.entries().is_empty());
    }

    #[test]
    fn test_bad_records_dropped_individually() {
        let raw = r#"[
            {"id": 1, "date": "d", "content": "kept"},
            {"id": "two", "date": "d", "content": "wrong id type"},
            {"id": 3, "date": "d", "content": "   "},
            {"id": 1, "date": "d", "content": "duplicate"},
            {"id": 4, "date": "d", "content": "also kept", "prompt": "p"}
        ]"#;
        let journal = JournalStore::load(Box::new(MemoryStore::with_records([(ENTRIES_KEY, raw)])));
        let contents: Vec<_> = journal.entries().iter().map(|e| e.content.as_str()).collect();
        assert_eq!(contents, vec!["kept", "also kept"]);
    }

    #[test]
    fn test_write_failure_keeps_session_going() {
        let mut journal = JournalStore::load_with(Box::new(ReadOnlyStore), frozen());
        assert!(journal.save_entry("first", None).is_some());
        assert!(!journal.is_persistent());
        assert!(journal.save_entry("second", None).is_some());
        assert_eq!(journal.entries().len(), 2);
    }

    #[test]
    fn test_unreadable_storage_starts_empty() {
        let mut journal = JournalStore::load_with(Box::new(UnreadableStore), frozen());
        assert!(journal.entries().is_empty());
        assert_eq!(journal.mode(), Mode::Editing);
        assert!(journal.is_persistent());

        assert!(journal.save_entry("still works", None).is_some());
        assert_eq!(journal.entries().len(), 1);
    }

    #[test]
    fn test_unusable_date_format_still_saves() {
        let options = JournalOptions {
            date_format: "%Q".to_string(),
            ..frozen()
        };
        let mut journal = JournalStore::load_with(Box::new(MemoryStore::new()), options);

        let saved = journal.save_entry("hello", None).cloned().unwrap();
        assert_eq!(saved.date, "1/2/2026, 8:30:00 AM");
        assert_eq!(journal.entries().len(), 1);
    }

    #[test]
    fn test_new_ids_follow_loaded_ids() {
        let raw = r#"[{"id":99999999999999,"date":"d","content":"from the future"}]"#;
        let mut journal = JournalStore::load_with(
            Box::new(MemoryStore::with_records([(ENTRIES_KEY, raw)])),
            frozen(),
        );
        let id = journal.save_entry("now", None).unwrap().id;
        assert_eq!(id, 100_000_000_000_000);
    }
}
