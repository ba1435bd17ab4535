//! Integration tests for daybook.
//!
//! These walk through the journal the way a user does: open an empty
//! journal, write, attach prompts, browse, reopen.

use std::collections::HashSet;

use daybook::prelude::*;
use daybook::storage::{ENTRIES_KEY, THEME_KEY};

fn open(dir: &std::path::Path) -> (JournalStore, ThemeStore) {
    let storage = FileStore::open(dir).unwrap();
    (
        JournalStore::load(Box::new(storage.clone())),
        ThemeStore::load(Box::new(storage)),
    )
}

mod scenarios {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_first_load_on_empty_storage() {
        let dir = tempfile::tempdir().unwrap();
        let (journal, theme) = open(dir.path());

        assert_eq!(journal.draft(), "");
        assert_eq!(journal.mode(), Mode::Editing);
        assert!(journal.entries().is_empty());
        assert!(!theme.get());
    }

    #[test]
    fn test_save_hello_world() {
        let dir = tempfile::tempdir().unwrap();
        let (mut journal, _) = open(dir.path());

        journal.set_draft("Hello world");
        journal.save();

        assert_eq!(journal.entries().len(), 1);
        assert_eq!(journal.entries()[0].content, "Hello world");
        assert_eq!(journal.entries()[0].prompt, None);
    }

    #[test]
    fn test_prompt_then_save() {
        let dir = tempfile::tempdir().unwrap();
        let (mut journal, _) = open(dir.path());

        let prompt = journal.generate_prompt().to_string();
        journal.set_draft("Reflections");
        journal.save();

        assert_eq!(journal.entries()[0].prompt.as_deref(), Some(prompt.as_str()));
    }

    #[test]
    fn test_save_empty_leaves_log_alone() {
        let dir = tempfile::tempdir().unwrap();
        let (mut journal, _) = open(dir.path());

        journal.save_entry("already here", None);
        journal.set_draft("");
        assert!(journal.save().is_none());
        assert_eq!(journal.entries().len(), 1);
    }

    #[test]
    fn test_view_then_start_new() {
        let dir = tempfile::tempdir().unwrap();
        let (mut journal, _) = open(dir.path());

        let id = journal.save_entry("look at me later", None).unwrap().id;
        journal.select_for_viewing(id);
        assert_eq!(journal.mode(), Mode::Viewing(id));

        journal.start_new();
        assert_eq!(journal.mode(), Mode::Editing);
        assert_eq!(journal.draft(), "");
    }
}

mod persistence {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_entries_and_theme_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let (mut journal, mut theme) = open(dir.path());
            journal.save_entry("morning pages", None);
            journal.save_entry("evening notes", Some("What went well?".into()));
            theme.set(true);
        }

        let (journal, theme) = open(dir.path());
        let contents: Vec<_> = journal.entries().iter().map(|e| e.content.as_str()).collect();
        assert_eq!(contents, vec!["morning pages", "evening notes"]);
        assert_eq!(journal.entries()[1].prompt.as_deref(), Some("What went well?"));
        assert!(theme.get());
    }

    #[test]
    fn test_persisted_layout() {
        let dir = tempfile::tempdir().unwrap();
        let (mut journal, mut theme) = open(dir.path());
        let entry = journal.save_entry("hi", None).cloned().unwrap();
        theme.set(false);

        let raw_entries = std::fs::read_to_string(dir.path().join("journalEntries.json")).unwrap();
        assert_eq!(
            raw_entries,
            format!(
                r#"[{{"id":{},"date":"{}","content":"hi"}}]"#,
                entry.id, entry.date
            )
        );
        let raw_theme = std::fs::read_to_string(dir.path().join("theme.json")).unwrap();
        assert_eq!(raw_theme, "false");
    }

    #[test]
    fn test_foreign_blob_round_trips() {
        // Layout written by earlier versions, with an empty prompt field
        let blob = r#"[{"id":1700000000000,"date":"11/14/2023, 10:13:20 PM","content":"Old entry","prompt":""},{"id":1700000000001,"date":"11/14/2023, 10:13:20 PM","content":"Another","prompt":"Why?"}]"#;
        let storage = MemoryStore::with_records([(ENTRIES_KEY, blob), (THEME_KEY, "true")]);

        let journal = JournalStore::load(Box::new(storage.clone()));
        assert_eq!(journal.entries().len(), 2);
        assert_eq!(journal.to_json().unwrap(), blob);
        assert!(ThemeStore::load(Box::new(storage)).get());
    }

    #[test]
    fn test_ids_unique_after_many_quick_saves() {
        let dir = tempfile::tempdir().unwrap();
        let (mut journal, _) = open(dir.path());
        for i in 0..200 {
            journal.save_entry(&format!("quick {i}"), None);
        }

        let ids: HashSet<_> = journal.entries().iter().map(|e| e.id).collect();
        assert_eq!(ids.len(), 200);
        assert!(journal
            .entries()
            .windows(2)
            .all(|pair| pair[0].id < pair[1].id));
    }
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_non_blank_save_appends_one(content in ".*[^\\s].*", existing in 0usize..5) {
            let mut journal = JournalStore::load(Box::new(MemoryStore::new()));
            for i in 0..existing {
                journal.save_entry(&format!("seed {i}"), None);
            }

            let saved = journal.save_entry(&content, None).cloned();
            prop_assert!(saved.is_some());
            prop_assert_eq!(journal.entries().len(), existing + 1);
            prop_assert_eq!(&journal.entries()[existing].content, &content);

            let ids: HashSet<_> = journal.entries().iter().map(|e| e.id).collect();
            prop_assert_eq!(ids.len(), existing + 1);
        }

        #[test]
        fn prop_blank_save_is_noop(content in "[ \\t\\r\\n]*", existing in 0usize..5) {
            let mut journal = JournalStore::load(Box::new(MemoryStore::new()));
            for i in 0..existing {
                journal.save_entry(&format!("seed {i}"), None);
            }
            let before = journal.entries().to_vec();

            prop_assert!(journal.save_entry(&content, None).is_none());
            prop_assert_eq!(journal.entries(), before.as_slice());
        }

        #[test]
        fn prop_reload_reproduces_blob(contents in proptest::collection::vec(".*[^\\s].*", 0..8)) {
            let dir = tempfile::tempdir().unwrap();
            let (mut journal, _) = open(dir.path());
            for content in &contents {
                journal.save_entry(content, None);
            }
            let written = journal.storage().get(ENTRIES_KEY).unwrap();
            let (reloaded, _) = open(dir.path());

            match written {
                Some(blob) => prop_assert_eq!(reloaded.to_json().unwrap(), blob),
                None => prop_assert!(contents.is_empty()),
            }
        }

        #[test]
        fn prop_theme_toggle_is_involution(start in any::<bool>()) {
            let mut theme = ThemeStore::load(Box::new(MemoryStore::new()));
            theme.set(start);
            theme.toggle();
            theme.toggle();
            prop_assert_eq!(theme.get(), start);
        }

        #[test]
        fn prop_generated_prompt_is_listed(seed in any::<u64>()) {
            use rand::SeedableRng;

            let mut journal = JournalStore::load(Box::new(MemoryStore::new()));
            let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
            let prompt = journal.generate_prompt_with(&mut rng).to_string();
            prop_assert!(journal.prompts().contains(&prompt));
            prop_assert!(daybook::prompts::DEFAULT_PROMPTS.contains(&prompt.as_str()));
        }
    }
}
