//! Per-origin key-value storage.
//!
//! # Keys
//!
//! Every value is a JSON blob stored under a fixed string key:
//!
//! - `shop_users_v1` - registered users (`User[]`)
//! - `shop_current_user_v1` - the logged-in session (`Session`)
//! - `shop_messages_v1` - submitted contact messages (`ContactMessage[]`)
//! - `shop_seeded_v1` - presence flag for the one-time seed import
//! - `shop_cart_<email>` - a user's cart (`CartItem[]`)
//!
//! # Backends
//!
//! - [`MemoryStore`] - in-process map, optionally with a byte quota
//! - [`FileStore`] - a single JSON object file on disk
//!
//! Writers never coordinate: concurrent writers to the same key are
//! last-write-wins.

mod file;
mod memory;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Storage keys.
pub mod keys {
    /// Registered users.
    pub const USERS: &str = "shop_users_v1";

    /// Current logged-in user.
    pub const CURRENT_USER: &str = "shop_current_user_v1";

    /// Contact form messages.
    pub const MESSAGES: &str = "shop_messages_v1";

    /// Seed import flag.
    pub const SEEDED: &str = "shop_seeded_v1";

    /// Prefix of per-user cart keys.
    pub const CART_PREFIX: &str = "shop_cart_";

    /// Cart key for a user email, exactly as held in the session.
    #[must_use]
    pub fn cart(email: &str) -> String {
        format!("{CART_PREFIX}{email}")
    }
}

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be serialized.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The write would exceed the store's quota.
    #[error("storage quota exceeded writing {key} (limit {limit} bytes)")]
    QuotaExceeded {
        /// Key being written.
        key: String,
        /// Quota in bytes.
        limit: usize,
    },

    /// A lock guarding the store was poisoned by a panicking writer.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// A string-keyed, string-valued persistent store.
///
/// Mirrors the browser's per-origin storage: values are opaque strings and
/// callers are responsible for encoding.
pub trait KeyValueStore: Send + Sync {
    /// Fetch the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the backend rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the backend rejects the write.
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// All keys currently present, in no particular order.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the backend cannot be read.
    fn keys(&self) -> Result<Vec<String>, StoreError>;
}

/// A stored JSON array, decoded entry by entry.
///
/// Entries that do not decode as `T` are hidden from iteration but written
/// back unchanged, in their original position, when the list is saved.
#[derive(Debug, Clone)]
pub struct Records<T> {
    entries: Vec<Record<T>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
enum Record<T> {
    Known(T),
    Unknown(Value),
}

impl<T> Records<T> {
    /// Decoded entries, in stored order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().filter_map(|entry| match entry {
            Record::Known(value) => Some(value),
            Record::Unknown(_) => None,
        })
    }

    /// Append a decoded entry at the end.
    pub fn push(&mut self, value: T) {
        self.entries.push(Record::Known(value));
    }

    /// Number of decoded entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop the undecoded entries and keep the rest.
    #[must_use]
    pub fn into_decoded(self) -> Vec<T> {
        self.entries
            .into_iter()
            .filter_map(|entry| match entry {
                Record::Known(value) => Some(value),
                Record::Unknown(_) => None,
            })
            .collect()
    }
}

impl<T> Default for Records<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T: Serialize> Serialize for Records<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.entries)
    }
}

/// JSON adapter over a shared [`KeyValueStore`].
///
/// Cheap to clone; every service holds its own handle to the same backend.
#[derive(Clone)]
pub struct LocalStore {
    inner: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for LocalStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalStore").finish_non_exhaustive()
    }
}

impl LocalStore {
    /// Wrap a backend.
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            inner: Arc::new(store),
        }
    }

    /// A fresh, empty in-memory store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// Read and decode the value under `key`.
    ///
    /// Returns `None` when the key is missing, the backend fails, or the
    /// stored text is not valid JSON for `T`. Never errors.
    #[must_use]
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.inner.get(key) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(key, error = %e, "storage read failed");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!(key, error = %e, "ignoring unparsable stored value");
                None
            }
        }
    }

    /// Read a JSON array, treating a missing or corrupted value as empty.
    ///
    /// Entries that do not decode as `T` are skipped.
    #[must_use]
    pub fn read_list<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        self.read_records(key).into_decoded()
    }

    /// Read a JSON array for a read-modify-write cycle.
    ///
    /// A missing value, or one that is not an array, reads as empty.
    /// Individual entries that do not decode as `T` are kept aside so that
    /// writing the result back does not lose them.
    #[must_use]
    pub fn read_records<T: DeserializeOwned>(&self, key: &str) -> Records<T> {
        let values: Vec<Value> = self.read(key).unwrap_or_default();

        let entries: Vec<_> = values
            .into_iter()
            .map(|value| match T::deserialize(&value) {
                Ok(decoded) => Record::Known(decoded),
                Err(e) => {
                    tracing::debug!(key, error = %e, "keeping undecodable entry");
                    Record::Unknown(value)
                }
            })
            .collect();

        Records { entries }
    }

    /// Encode `value` as JSON and store it under `key`.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if encoding fails or the backend rejects the write.
    pub fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value)?;
        self.inner.set(key, &raw)
    }

    /// Fetch the raw, undecoded value under `key`.
    #[must_use]
    pub fn read_raw(&self, key: &str) -> Option<String> {
        self.inner.get(key).ok().flatten()
    }

    /// Store a raw string under `key`.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the backend rejects the write.
    pub fn write_raw(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.inner.set(key, value)
    }

    /// Returns `true` if any value is stored under `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.read_raw(key).is_some()
    }

    /// Delete `key`.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the backend rejects the write.
    pub fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.inner.remove(key)
    }

    /// All keys in the store, sorted.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the backend cannot be read.
    pub fn keys(&self) -> Result<Vec<String>, StoreError> {
        let mut keys = self.inner.keys()?;
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Item {
        id: String,
    }

    #[test]
    fn test_read_missing_key_is_none() {
        let store = LocalStore::in_memory();
        assert_eq!(store.read::<Item>("missing"), None);
    }

    #[test]
    fn test_write_then_read() {
        let store = LocalStore::in_memory();
        store.write("k", &Item { id: "a".into() }).unwrap();
        assert_eq!(store.read::<Item>("k"), Some(Item { id: "a".into() }));
        assert_eq!(store.read_raw("k").unwrap(), r#"{"id":"a"}"#);
    }

    #[test]
    fn test_corrupted_value_reads_as_none() {
        let store = LocalStore::in_memory();
        store.write_raw("k", "{not json").unwrap();
        assert_eq!(store.read::<Item>("k"), None);
        assert!(store.read_list::<Item>("k").is_empty());
    }

    #[test]
    fn test_wrong_shape_reads_as_empty_list() {
        let store = LocalStore::in_memory();
        store.write_raw("k", r#"{"id":"a"}"#).unwrap();
        assert!(store.read_list::<Item>("k").is_empty());
    }

    #[test]
    fn test_off_shape_entry_is_skipped_not_fatal() {
        let store = LocalStore::in_memory();
        store
            .write_raw("k", r#"[{"id":"a"},{"name":"b"},{"id":"c"}]"#)
            .unwrap();

        let items: Vec<Item> = store.read_list("k");
        assert_eq!(items, vec![Item { id: "a".into() }, Item { id: "c".into() }]);
    }

    #[test]
    fn test_records_write_back_keeps_undecoded_entries() {
        let store = LocalStore::in_memory();
        store.write_raw("k", r#"[{"id":"a"},{"name":"b"}]"#).unwrap();

        let mut records = store.read_records::<Item>("k");
        assert_eq!(records.iter().collect::<Vec<_>>(), vec![&Item { id: "a".into() }]);

        records.push(Item { id: "c".into() });
        store.write("k", &records).unwrap();

        assert_eq!(
            store.read_raw("k").unwrap(),
            r#"[{"id":"a"},{"name":"b"},{"id":"c"}]"#
        );
    }

    #[test]
    fn test_records_from_non_array_start_empty() {
        let store = LocalStore::in_memory();
        store.write_raw("k", r#"{"id":"a"}"#).unwrap();

        let mut records = store.read_records::<Item>("k");
        assert!(records.is_empty());

        records.push(Item { id: "b".into() });
        store.write("k", &records).unwrap();
        assert_eq!(store.read_raw("k").unwrap(), r#"[{"id":"b"}]"#);
    }

    #[test]
    fn test_remove_and_contains() {
        let store = LocalStore::in_memory();
        store.write_raw(keys::SEEDED, "1").unwrap();
        assert!(store.contains(keys::SEEDED));
        store.remove(keys::SEEDED).unwrap();
        assert!(!store.contains(keys::SEEDED));
        // Removing again is fine.
        store.remove(keys::SEEDED).unwrap();
    }

    #[test]
    fn test_cart_key() {
        assert_eq!(keys::cart("ali@x.com"), "shop_cart_ali@x.com");
    }

    #[test]
    fn test_keys_sorted() {
        let store = LocalStore::in_memory();
        store.write_raw("b", "1").unwrap();
        store.write_raw("a", "1").unwrap();
        assert_eq!(store.keys().unwrap(), vec!["a", "b"]);
    }
}
