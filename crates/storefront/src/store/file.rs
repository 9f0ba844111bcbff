//! File-backed store.
//!
//! The whole store is one JSON object (`{"key": "raw value", ...}`). Nothing
//! is cached: every operation reads the file, and every mutation applies its
//! single key change to what is on disk right now and writes the result
//! through a uniquely named temporary file that is then renamed over the
//! store. Several handles on the same file therefore never erase each
//! other's keys, and a crash never leaves a half-written store.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tempfile::NamedTempFile;

use super::{KeyValueStore, StoreError};

type Entries = BTreeMap<String, String>;

/// Persistent store kept in a single JSON file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles through this handle.
    lock: Mutex<()>,
}

impl FileStore {
    /// Open the store at `path`, creating it lazily on first write.
    ///
    /// A file that is not a JSON object of strings reads as empty and is
    /// replaced on the next write.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if an existing file cannot be read.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        };

        let entries = store.load()?;
        tracing::debug!(path = %store.path.display(), keys = entries.len(), "opened file store");

        Ok(store)
    }

    fn load(&self) -> Result<Entries, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!(path = %self.path.display(), error = %e, "store file corrupted, reading as empty");
                Entries::new()
            })),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Entries::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, entries: &Entries) -> Result<(), StoreError> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        let mut tmp = NamedTempFile::new_in(parent)?;
        tmp.write_all(&serde_json::to_vec_pretty(entries)?)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }

    /// Apply `change` to the current file contents and write them back if
    /// it reports a modification.
    fn update(&self, change: impl FnOnce(&mut Entries) -> bool) -> Result<(), StoreError> {
        let _guard = self.lock.lock().map_err(|_| StoreError::Poisoned)?;
        let mut entries = self.load()?;
        if change(&mut entries) {
            self.save(&entries)?;
        }
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let _guard = self.lock.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.update(|entries| {
            entries.insert(key.to_owned(), value.to_owned());
            true
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.update(|entries| entries.remove(key).is_some())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        let _guard = self.lock.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(self.load()?.into_keys().collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let store = FileStore::open(&path).unwrap();
        store.set("shop_seeded_v1", "1").unwrap();
        store.set("k", "[]").unwrap();
        store.remove("k").unwrap();
        drop(store);

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("shop_seeded_v1").unwrap().as_deref(), Some("1"));
        assert_eq!(reopened.get("k").unwrap(), None);
    }

    #[test]
    fn test_missing_file_is_empty_and_not_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");

        let store = FileStore::open(&path).unwrap();
        assert!(store.keys().unwrap().is_empty());
        store.remove("k").unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_corrupted_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "not json").unwrap();

        let store = FileStore::open(&path).unwrap();
        assert!(store.keys().unwrap().is_empty());

        store.set("k", "v").unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"k\""));
    }

    #[test]
    fn test_handles_on_one_file_keep_each_others_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        let first = FileStore::open(&path).unwrap();
        let second = FileStore::open(&path).unwrap();

        first.set("a", "1").unwrap();
        second.set("b", "2").unwrap();
        first.set("c", "3").unwrap();

        let fresh = FileStore::open(&path).unwrap();
        assert_eq!(fresh.keys().unwrap(), vec!["a", "b", "c"]);
        assert_eq!(second.get("c").unwrap().as_deref(), Some("3"));
    }

    #[test]
    fn test_remove_through_one_handle_is_seen_by_another() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        let first = FileStore::open(&path).unwrap();
        let second = FileStore::open(&path).unwrap();

        first.set("k", "v").unwrap();
        second.remove("k").unwrap();

        assert_eq!(first.get("k").unwrap(), None);
        first.set("other", "x").unwrap();
        assert_eq!(second.keys().unwrap(), vec!["other"]);
    }

    #[test]
    fn test_no_fixed_temp_file_is_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        let store = FileStore::open(&path).unwrap();
        store.set("k", "v").unwrap();
        store.remove("k").unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["storage.json"]);
    }
}
