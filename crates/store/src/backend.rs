//! Storage backends: flat string key-value primitives.
//!
//! A backend knows nothing about namespaces, collections, or JSON records -
//! it stores opaque strings under opaque keys, exactly the contract of the
//! browser storage the demo originally ran on. The [`RecordStore`]
//! (crate::store::RecordStore) layers namespacing and serialization on top.
//!
//! Two backends are provided:
//!
//! - [`MemoryBackend`] - a plain map, with an optional byte quota standing in
//!   for the browser's storage quota. Used by tests and ephemeral stores.
//! - [`FileBackend`] - a single JSON document on disk, rewritten atomically
//!   on every mutation. The durable analog of browser local storage.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StorageError;

/// Flat string key-value storage.
///
/// All operations are synchronous and non-blocking in the sense of the host:
/// each call runs to completion before the next one starts. Implementations
/// are not required to be thread-safe.
pub trait StorageBackend {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backing medium cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, overwriting any existing value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::QuotaExceeded`] if the write does not fit the
    /// configured quota, or another [`StorageError`] if persisting fails.
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value stored under `key`. No-op if the key is absent.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if persisting the removal fails.
    fn delete(&mut self, key: &str) -> Result<(), StorageError>;

    /// All keys currently stored, in sorted order.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backing medium cannot be read.
    fn keys(&self) -> Result<Vec<String>, StorageError>;
}

/// Returns an error if writing `key`/`value` into `entries` would push the
/// stored byte total past `quota`.
///
/// Byte accounting counts keys and values, matching how browsers meter their
/// storage quota.
fn check_quota(
    entries: &BTreeMap<String, String>,
    quota: Option<usize>,
    key: &str,
    value: &str,
) -> Result<(), StorageError> {
    let Some(quota) = quota else {
        return Ok(());
    };

    let current: usize = entries
        .iter()
        .filter(|(k, _)| k.as_str() != key)
        .map(|(k, v)| k.len() + v.len())
        .sum();
    let needed = key.len() + value.len();
    let available = quota.saturating_sub(current);

    if needed > available {
        return Err(StorageError::QuotaExceeded { needed, available });
    }
    Ok(())
}

/// In-memory backend.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: BTreeMap<String, String>,
    quota: Option<usize>,
}

impl MemoryBackend {
    /// Create an empty backend with no quota.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty backend that refuses writes past `quota` stored bytes.
    #[must_use]
    pub const fn with_quota(quota: usize) -> Self {
        Self {
            entries: BTreeMap::new(),
            quota: Some(quota),
        }
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        check_quota(&self.entries, self.quota, key, value)?;
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.entries.keys().cloned().collect())
    }
}

/// File-backed backend: the whole map lives in one JSON document.
///
/// Every mutation rewrites the document through a sibling temp file followed
/// by a rename, so the file on disk is always a complete, parseable map.
/// Reads are served from memory; the file is loaded once at open.
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
    entries: BTreeMap<String, String>,
    quota: Option<usize>,
}

impl FileBackend {
    /// Open (or create) the backing document at `path`.
    ///
    /// A missing file yields an empty backend; the file is created on the
    /// first write.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the file exists but cannot be read, or
    /// [`StorageError::Document`] if its contents are not a JSON string map.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path,
            entries,
            quota: None,
        })
    }

    /// Open with a byte quota; see [`MemoryBackend::with_quota`].
    ///
    /// # Errors
    ///
    /// Same as [`FileBackend::open`].
    pub fn open_with_quota(
        path: impl Into<PathBuf>,
        quota: usize,
    ) -> Result<Self, StorageError> {
        let mut backend = Self::open(path)?;
        backend.quota = Some(quota);
        Ok(backend)
    }

    /// Path of the backing document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), StorageError> {
        let text = serde_json::to_string_pretty(&self.entries)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, text)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl StorageBackend for FileBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        check_quota(&self.entries, self.quota, key, value)?;
        let previous = self.entries.insert(key.to_owned(), value.to_owned());
        if let Err(e) = self.persist() {
            // Roll the in-memory map back so it keeps matching the file.
            match previous {
                Some(v) => self.entries.insert(key.to_owned(), v),
                None => self.entries.remove(key),
            };
            tracing::warn!(key, error = %e, "failed to persist write");
            return Err(e);
        }
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), StorageError> {
        let Some(previous) = self.entries.remove(key) else {
            return Ok(());
        };
        if let Err(e) = self.persist() {
            self.entries.insert(key.to_owned(), previous);
            tracing::warn!(key, error = %e, "failed to persist delete");
            return Err(e);
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.entries.keys().cloned().collect())
    }
}
