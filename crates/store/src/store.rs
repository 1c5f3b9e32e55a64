//! The namespaced record store.
//!
//! [`RecordStore`] is a façade over a [`StorageBackend`]: every key it
//! touches is prefixed with a namespace string, isolating one application's
//! records from anything else sharing the same flat store. Values are JSON
//! text - collections are one serialized array per key, singletons one
//! serialized object per key.
//!
//! The store is deliberately dumb. It has no retries, no cross-key
//! transactions, and no concurrency control: every operation is a single
//! synchronous read-modify-write. Callers needing multi-key consistency
//! (e.g. writing an order and then updating stats) accept that a failure
//! between the two writes leaves them inconsistent.

use std::collections::BTreeMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::backend::{MemoryBackend, StorageBackend};
use crate::error::StoreError;
use crate::models::{Settings, Stats};
use crate::products;

/// Version of the persisted layout, written into the `schema` singleton.
pub const SCHEMA_VERSION: u32 = 1;

/// Well-known namespace-relative keys.
pub mod keys {
    /// Product catalog collection.
    pub const PRODUCTS: &str = "products";
    /// Cart collection.
    pub const CART: &str = "cart";
    /// Orders collection.
    pub const ORDERS: &str = "orders";
    /// Customers collection.
    pub const CUSTOMERS: &str = "customers";
    /// Settings singleton.
    pub const SETTINGS: &str = "settings";
    /// Stats singleton.
    pub const STATS: &str = "stats";
    /// Schema version singleton.
    pub const SCHEMA: &str = "schema";
    /// First-run flag.
    pub const INITIALIZED: &str = "initialized";
}

/// Schema version singleton record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaInfo {
    /// Layout version of the persisted keys.
    pub version: u32,
}

/// A flat export of every key under a namespace.
///
/// Maps each full storage key to its raw stored string - not a normalized
/// document. Importing writes the pairs back verbatim, which is what makes
/// the export → clear → import round trip exact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot(BTreeMap<String, String>);

impl Snapshot {
    /// Number of keys in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the snapshot holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(full_key, raw_value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Namespaced, synchronous record storage.
///
/// An explicit instance owned by whoever needs persistence - there is no
/// global store. Repositories in this crate borrow it mutably for the
/// duration of each operation.
pub struct RecordStore {
    namespace: String,
    backend: Box<dyn StorageBackend>,
}

impl RecordStore {
    /// Create a store over `backend`, prefixing every key with `namespace`.
    #[must_use]
    pub fn new(namespace: impl Into<String>, backend: Box<dyn StorageBackend>) -> Self {
        Self {
            namespace: namespace.into(),
            backend,
        }
    }

    /// Convenience constructor for an ephemeral in-memory store.
    #[must_use]
    pub fn in_memory(namespace: impl Into<String>) -> Self {
        Self::new(namespace, Box::new(MemoryBackend::new()))
    }

    /// The namespace prefix this store applies.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    fn storage_key(&self, key: &str) -> String {
        format!("{}_{}", self.namespace, key)
    }

    fn full_prefix(&self) -> String {
        format!("{}_", self.namespace)
    }

    /// Serialize `value` and write it under the namespaced `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Serialization`] if `value` cannot be encoded,
    /// or [`StoreError::Storage`] (including the quota case) if the backend
    /// refuses the write. Failures are logged before being returned.
    pub fn put<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), StoreError> {
        let text = serde_json::to_string(value).map_err(|source| {
            tracing::warn!(key, error = %source, "failed to serialize record");
            StoreError::Serialization {
                key: key.to_owned(),
                source,
            }
        })?;
        let storage_key = self.storage_key(key);
        self.backend.write(&storage_key, &text).map_err(|e| {
            tracing::warn!(key, error = %e, "failed to write record");
            e.into()
        })
    }

    /// Read and deserialize the value under the namespaced `key`.
    ///
    /// Absence is not an error: a missing key reads as `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Corrupted`] if a value exists but cannot be
    /// decoded into `T`, or [`StoreError::Storage`] if the backend fails.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let storage_key = self.storage_key(key);
        match self.backend.read(&storage_key)? {
            None => Ok(None),
            Some(text) => serde_json::from_str(&text).map(Some).map_err(|source| {
                tracing::warn!(key, error = %source, "stored value is corrupted");
                StoreError::Corrupted {
                    key: key.to_owned(),
                    source,
                }
            }),
        }
    }

    /// Delete the value under the namespaced `key`. No-op if absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if the backend fails.
    pub fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let storage_key = self.storage_key(key);
        Ok(self.backend.delete(&storage_key)?)
    }

    /// Load a collection, defaulting to an empty one when the key is absent.
    ///
    /// # Errors
    ///
    /// Same as [`RecordStore::get`].
    pub fn load_collection<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, StoreError> {
        Ok(self.get(key)?.unwrap_or_default())
    }

    /// Persist a collection under `key`.
    ///
    /// # Errors
    ///
    /// Same as [`RecordStore::put`].
    pub fn save_collection<T: Serialize>(
        &mut self,
        key: &str,
        records: &[T],
    ) -> Result<(), StoreError> {
        self.put(key, records)
    }

    /// Append `record` to the collection under `key`, preserving prior order.
    ///
    /// The write replaces the whole collection value, so it is all-or-nothing
    /// at the key granularity: on failure the prior state is untouched.
    ///
    /// # Errors
    ///
    /// Same as [`RecordStore::get`] and [`RecordStore::put`].
    pub fn append<T>(&mut self, key: &str, record: T) -> Result<(), StoreError>
    where
        T: Serialize + DeserializeOwned,
    {
        let mut records: Vec<T> = self.load_collection(key)?;
        records.push(record);
        self.save_collection(key, &records)
    }

    /// Namespace-relative keys currently stored, in sorted order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if the backend fails.
    pub fn keys(&self) -> Result<Vec<String>, StoreError> {
        let prefix = self.full_prefix();
        Ok(self
            .backend
            .keys()?
            .into_iter()
            .filter_map(|k| k.strip_prefix(&prefix).map(str::to_owned))
            .collect())
    }

    /// Export every key under the namespace as a flat snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if the backend fails.
    pub fn export(&self) -> Result<Snapshot, StoreError> {
        let prefix = self.full_prefix();
        let mut pairs = Vec::new();
        for key in self.backend.keys()? {
            if !key.starts_with(&prefix) {
                continue;
            }
            if let Some(value) = self.backend.read(&key)? {
                pairs.push((key, value));
            }
        }
        Ok(pairs.into_iter().collect())
    }

    /// Write every pair from `snapshot` back verbatim, overwriting existing
    /// keys. Pairs outside this store's namespace are skipped and logged.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if any write fails; earlier writes are
    /// not rolled back.
    pub fn import(&mut self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let prefix = self.full_prefix();
        for (key, value) in snapshot.iter() {
            if !key.starts_with(&prefix) {
                tracing::warn!(key, "skipping snapshot key outside namespace");
                continue;
            }
            self.backend.write(key, value)?;
        }
        Ok(())
    }

    /// Parse `text` as a snapshot and import it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Import`] if `text` is not a valid export -
    /// nothing is written in that case - or the errors of
    /// [`RecordStore::import`].
    pub fn import_json(&mut self, text: &str) -> Result<(), StoreError> {
        let snapshot: Snapshot = serde_json::from_str(text).map_err(StoreError::Import)?;
        self.import(&snapshot)
    }

    /// Delete every key under the namespace.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if the backend fails mid-way; keys
    /// already deleted stay deleted.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        let prefix = self.full_prefix();
        for key in self.backend.keys()? {
            if key.starts_with(&prefix) {
                self.backend.delete(&key)?;
            }
        }
        tracing::debug!(namespace = %self.namespace, "cleared namespace");
        Ok(())
    }

    /// Total byte length of every value under the namespace.
    ///
    /// Diagnostic only - the number reflects stored JSON text, not in-memory
    /// size.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if the backend fails.
    pub fn size_in_bytes(&self) -> Result<usize, StoreError> {
        let prefix = self.full_prefix();
        let mut total = 0;
        for key in self.backend.keys()? {
            if !key.starts_with(&prefix) {
                continue;
            }
            if let Some(value) = self.backend.read(&key)? {
                total += value.len();
            }
        }
        Ok(total)
    }

    /// Whether [`RecordStore::initialize`] has completed for this namespace.
    ///
    /// # Errors
    ///
    /// Same as [`RecordStore::get`].
    pub fn is_initialized(&self) -> Result<bool, StoreError> {
        Ok(self.get::<bool>(keys::INITIALIZED)?.unwrap_or(false))
    }

    /// First-run setup: write the schema version, default settings, zeroed
    /// stats, and the seed product catalog, then set the initialized flag.
    ///
    /// Idempotent - returns `false` without touching anything when the flag
    /// is already set.
    ///
    /// # Errors
    ///
    /// Same as [`RecordStore::put`].
    pub fn initialize(&mut self) -> Result<bool, StoreError> {
        if self.is_initialized()? {
            return Ok(false);
        }

        self.put(keys::SCHEMA, &SchemaInfo {
            version: SCHEMA_VERSION,
        })?;
        self.put(keys::SETTINGS, &Settings::default())?;
        self.put(keys::STATS, &Stats::default())?;
        self.save_collection(keys::PRODUCTS, &products::default_catalog())?;
        self.put(keys::INITIALIZED, &true)?;

        tracing::info!(namespace = %self.namespace, "initialized store");
        Ok(true)
    }
}

impl std::fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore")
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;
    use crate::backend::{FileBackend, MemoryBackend};

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    struct Note {
        text: String,
    }

    fn note(text: &str) -> Note {
        Note {
            text: text.to_owned(),
        }
    }

    #[test]
    fn test_get_missing_key_is_none() {
        let store = RecordStore::in_memory("choco_shop");
        let read: Option<Note> = store.get("missing_key").unwrap();
        assert_eq!(read, None);
    }

    #[test]
    fn test_put_get_remove() {
        let mut store = RecordStore::in_memory("choco_shop");
        store.put("note", &note("dark over milk")).unwrap();

        let read: Option<Note> = store.get("note").unwrap();
        assert_eq!(read, Some(note("dark over milk")));

        store.remove("note").unwrap();
        let read: Option<Note> = store.get("note").unwrap();
        assert_eq!(read, None);

        // removing an absent key is a no-op
        store.remove("note").unwrap();
    }

    #[test]
    fn test_keys_are_namespaced() {
        let mut backend = MemoryBackend::new();
        backend.write("other_app_note", "\"x\"").unwrap();
        let mut store = RecordStore::new("choco_shop", Box::new(backend));

        store.put("note", &note("nibs")).unwrap();

        // only this namespace's keys are visible, prefix stripped
        assert_eq!(store.keys().unwrap(), vec!["note"]);
        let foreign: Option<Note> = store.get("other_app_note").unwrap();
        assert_eq!(foreign, None);
    }

    #[test]
    fn test_corrupted_value_is_distinct_from_absent() {
        let mut backend = MemoryBackend::new();
        backend.write("choco_shop_note", "{not json").unwrap();
        let store = RecordStore::new("choco_shop", Box::new(backend));

        let err = store.get::<Note>("note").unwrap_err();
        assert!(matches!(err, StoreError::Corrupted { ref key, .. } if key == "note"));
    }

    #[test]
    fn test_append_preserves_order() {
        let mut store = RecordStore::in_memory("choco_shop");
        store.append("notes", note("first")).unwrap();
        store.append("notes", note("second")).unwrap();
        store.append("notes", note("third")).unwrap();

        let notes: Vec<Note> = store.load_collection("notes").unwrap();
        assert_eq!(notes, vec![note("first"), note("second"), note("third")]);
    }

    #[test]
    fn test_clear_removes_every_key() {
        let mut store = RecordStore::in_memory("choco_shop");
        store.put("a", &note("1")).unwrap();
        store.put("b", &note("2")).unwrap();

        store.clear().unwrap();

        assert!(store.keys().unwrap().is_empty());
        assert_eq!(store.get::<Note>("a").unwrap(), None);
        assert_eq!(store.get::<Note>("b").unwrap(), None);
    }

    #[test]
    fn test_clear_leaves_other_namespaces_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shared.json");

        let mut other =
            RecordStore::new("other_app", Box::new(FileBackend::open(&path).unwrap()));
        other.put("note", &note("theirs")).unwrap();
        drop(other);

        let mut store =
            RecordStore::new("choco_shop", Box::new(FileBackend::open(&path).unwrap()));
        store.put("note", &note("mine")).unwrap();
        store.clear().unwrap();
        assert!(store.export().unwrap().is_empty());
        drop(store);

        let other = RecordStore::new("other_app", Box::new(FileBackend::open(&path).unwrap()));
        assert_eq!(other.get::<Note>("note").unwrap(), Some(note("theirs")));
    }

    #[test]
    fn test_export_import_round_trip() {
        let mut store = RecordStore::in_memory("choco_shop");
        store.put("note", &note("ganache")).unwrap();
        store.append("notes", note("a")).unwrap();
        store.append("notes", note("b")).unwrap();

        let snapshot = store.export().unwrap();
        assert_eq!(snapshot.len(), 2);

        store.clear().unwrap();
        assert_eq!(store.get::<Note>("note").unwrap(), None);

        store.import(&snapshot).unwrap();
        assert_eq!(store.get::<Note>("note").unwrap(), Some(note("ganache")));
        let notes: Vec<Note> = store.load_collection("notes").unwrap();
        assert_eq!(notes, vec![note("a"), note("b")]);
        assert_eq!(store.export().unwrap(), snapshot);
    }

    #[test]
    fn test_import_json_rejects_malformed_payload() {
        let mut store = RecordStore::in_memory("choco_shop");
        let err = store.import_json("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, StoreError::Import(_)));

        let err = store.import_json("not json at all").unwrap_err();
        assert!(matches!(err, StoreError::Import(_)));
    }

    #[test]
    fn test_import_skips_foreign_keys() {
        let mut store = RecordStore::in_memory("choco_shop");
        store
            .import_json(r#"{"other_app_note": "\"x\"", "choco_shop_note": "{\"text\":\"kept\"}"}"#)
            .unwrap();

        assert_eq!(store.keys().unwrap(), vec!["note"]);
        assert_eq!(store.get::<Note>("note").unwrap(), Some(note("kept")));
    }

    #[test]
    fn test_size_in_bytes_sums_values() {
        let mut store = RecordStore::in_memory("choco_shop");
        assert_eq!(store.size_in_bytes().unwrap(), 0);

        store.put("flag", &true).unwrap(); // "true"
        store.put("num", &7_u8).unwrap(); // "7"
        assert_eq!(store.size_in_bytes().unwrap(), 5);
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let mut store = RecordStore::in_memory("choco_shop");
        assert!(!store.is_initialized().unwrap());

        assert!(store.initialize().unwrap());
        assert!(store.is_initialized().unwrap());

        let schema: SchemaInfo = store.get(keys::SCHEMA).unwrap().unwrap();
        assert_eq!(schema.version, SCHEMA_VERSION);
        let settings: Option<Settings> = store.get(keys::SETTINGS).unwrap();
        assert!(settings.is_some());

        // second call is a no-op
        assert!(!store.initialize().unwrap());
    }
}
