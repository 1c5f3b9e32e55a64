//! Error types for the record store.
//!
//! The original demo this crate replaces swallowed every failure behind a
//! logged boolean, which left callers unable to tell a missing record from a
//! corrupted one. Here the taxonomy is explicit: absence is `Ok(None)` on
//! reads, everything else is a typed error.

use thiserror::Error;

/// Failures raised by a [`StorageBackend`](crate::backend::StorageBackend).
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing file could not be read or written.
    #[error("storage i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A write would exceed the configured byte quota.
    #[error("storage quota exceeded: {needed} bytes needed, {available} available")]
    QuotaExceeded {
        /// Bytes the write required.
        needed: usize,
        /// Bytes left under the quota before the write.
        available: usize,
    },

    /// The backing document on disk is not a valid key-value map.
    #[error("backing document is malformed: {0}")]
    Document(#[from] serde_json::Error),
}

/// Failures raised by the [`RecordStore`](crate::store::RecordStore) and the
/// repositories built on it.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A record could not be serialized for writing.
    #[error("failed to serialize record for key `{key}`: {source}")]
    Serialization {
        /// Namespace-relative key being written.
        key: String,
        /// Underlying serializer error.
        source: serde_json::Error,
    },

    /// A stored value exists but cannot be decoded into the requested type.
    ///
    /// Distinct from absence: reads return `Ok(None)` for missing keys.
    #[error("stored value for key `{key}` is corrupted: {source}")]
    Corrupted {
        /// Namespace-relative key that was read.
        key: String,
        /// Underlying deserializer error.
        source: serde_json::Error,
    },

    /// A snapshot payload handed to import is not a valid export.
    #[error("snapshot is not a valid export: {0}")]
    Import(#[source] serde_json::Error),

    /// The storage backend failed.
    #[error("storage backend error: {0}")]
    Storage(#[from] StorageError),
}

impl StoreError {
    /// Whether this error is the backend refusing a write for capacity.
    ///
    /// Convenience for callers that want to surface quota pressure
    /// differently from other storage failures.
    #[must_use]
    pub const fn is_quota_exceeded(&self) -> bool {
        matches!(
            self,
            Self::Storage(StorageError::QuotaExceeded { .. })
        )
    }
}
