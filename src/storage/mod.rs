//! Local key-value storage.
//!
//! Journal state lives in a handful of string-keyed records. [`FileStore`]
//! keeps each record in its own `<key>.json` file under a data directory;
//! [`MemoryStore`] keeps them in a map for tests and for sessions where the
//! disk is not usable.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{JournalError, Result};
use crate::util::atomic_write;

/// Key holding the serialized theme preference.
pub const THEME_KEY: &str = "theme";

/// Key holding the serialized entry log.
pub const ENTRIES_KEY: &str = "journalEntries";

/// File extension used for records on disk.
const RECORD_EXTENSION: &str = "json";

/// A string-keyed store of string values.
pub trait KeyValueStore: fmt::Debug {
    /// Read the value stored under `key`, or `None` if nothing is stored.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Check that a key is usable as a file stem.
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(JournalError::invalid_argument("key", "must not be empty"));
    }
    if let Some(bad) = key
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        return Err(JournalError::invalid_argument(
            "key",
            format!("contains unsupported character {bad:?}"),
        ));
    }
    Ok(())
}

/// Directory-backed store, one file per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.exists() {
            std::fs::create_dir_all(&root).map_err(|e| {
                JournalError::io(format!("Failed to create data directory: {}", root.display()), e)
            })?;
        }
        if !root.is_dir() {
            return Err(JournalError::StorageUnavailable { path: root });
        }
        debug!(root = %root.display(), "opened file store");
        Ok(Self { root })
    }

    /// Open the store in the platform data directory.
    pub fn open_default() -> Result<Self> {
        Self::open(default_data_dir()?)
    }

    /// Directory holding the record files.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file backing `key`.
    pub fn record_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.{RECORD_EXTENSION}"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        let path = self.record_path(key);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(JournalError::io(
                format!("Failed to read record: {}", path.display()),
                e,
            )),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        let path = self.record_path(key);
        atomic_write(&path, value.as_bytes())?;
        debug!(key, bytes = value.len(), "wrote record");
        Ok(())
    }
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `records`.
    pub fn with_records<K, V>(records: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            records: records
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        Ok(self.records.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        self.records.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Get the default data directory.
pub fn default_data_dir() -> Result<PathBuf> {
    let data_dir =
        dirs::data_dir().ok_or_else(|| JournalError::unsupported("data directory discovery"))?;

    Ok(data_dir.join(crate::NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        assert_eq!(store.get(THEME_KEY).unwrap(), None);
    }

    #[test]
    fn test_file_store_set_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();

        store.set(ENTRIES_KEY, "[]").unwrap();
        assert_eq!(store.get(ENTRIES_KEY).unwrap().as_deref(), Some("[]"));
        assert!(dir.path().join("journalEntries.json").exists());

        // Survives reopening
        let reopened = FileStore::open(dir.path()).unwrap();
        assert_eq!(reopened.get(ENTRIES_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_file_store_creates_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("data").join("daybook");
        FileStore::open(&root).unwrap();
        assert!(root.is_dir());
    }

    #[test]
    fn test_file_store_rejects_file_as_root() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("not-a-dir");
        std::fs::write(&file, "x").unwrap();
        assert!(matches!(
            FileStore::open(&file),
            Err(JournalError::StorageUnavailable { .. })
        ));
    }

    #[test]
    fn test_invalid_keys_rejected() {
        let mut store = MemoryStore::new();
        assert!(store.set("../escape", "x").is_err());
        assert!(store.set("", "x").is_err());
        assert!(store.get("a/b").is_err());
        assert!(store.set("journal_entries-2", "x").is_ok());
    }

    #[test]
    fn test_memory_store_with_records() {
        let store = MemoryStore::with_records([(THEME_KEY, "true")]);
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("true"));
        assert_eq!(store.get(ENTRIES_KEY).unwrap(), None);
    }
}
