//! CLI command implementations.

pub mod maintenance;
pub mod report;
pub mod snapshot;

use std::path::PathBuf;

use thiserror::Error;

use choco_shelf_store::backend::FileBackend;
use choco_shelf_store::error::{StorageError, StoreError};
use choco_shelf_store::store::RecordStore;

/// Default store file when neither the flag nor the env var is set.
const DEFAULT_PATH: &str = "./choco-shelf.json";

/// Default key namespace.
const DEFAULT_NAMESPACE: &str = "choco_shop";

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// The store reported a failure.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The store file could not be opened.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// A snapshot file could not be read or written.
    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// A destructive command was run without confirmation.
    #[error("refusing to run without --yes")]
    NotConfirmed,
}

/// Where a command should open its store.
#[derive(Debug, Clone)]
pub struct StoreTarget {
    /// Path of the store file.
    pub path: PathBuf,
    /// Key namespace.
    pub namespace: String,
}

impl StoreTarget {
    /// Resolve the target from flags, environment, and defaults - in that
    /// order.
    #[must_use]
    pub fn resolve(path: Option<PathBuf>, namespace: Option<String>) -> Self {
        let path = path
            .or_else(|| std::env::var_os("CHOCO_SHELF_PATH").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PATH));
        let namespace = namespace
            .or_else(|| std::env::var("CHOCO_SHELF_NAMESPACE").ok())
            .unwrap_or_else(|| DEFAULT_NAMESPACE.to_owned());
        Self { path, namespace }
    }

    /// Open the store file this target points at.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Storage`] if the file exists but cannot be loaded.
    pub fn open(&self) -> Result<RecordStore, CliError> {
        let backend = FileBackend::open(&self.path)?;
        Ok(RecordStore::new(self.namespace.clone(), Box::new(backend)))
    }
}
