//! Snapshot export and import commands.

use std::io::Write;
use std::path::Path;

use super::{CliError, StoreTarget};

/// Export every key under the namespace as a snapshot JSON document.
///
/// Writes to `output` when given, stdout otherwise.
///
/// # Errors
///
/// Returns [`CliError`] if the store cannot be read or the output cannot be
/// written.
pub fn export(target: &StoreTarget, output: Option<&Path>) -> Result<(), CliError> {
    let store = target.open()?;
    let snapshot = store.export()?;

    let text = serde_json::to_string_pretty(&snapshot)
        .map_err(choco_shelf_store::error::StorageError::from)?;

    match output {
        Some(path) => {
            std::fs::write(path, &text).map_err(|source| CliError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            tracing::info!(
                keys = snapshot.len(),
                output = %path.display(),
                "exported snapshot"
            );
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .and_then(|()| stdout.write_all(b"\n"))
                .map_err(|source| CliError::Io {
                    path: "<stdout>".into(),
                    source,
                })?;
        }
    }
    Ok(())
}

/// Import a snapshot file, overwriting existing keys.
///
/// # Errors
///
/// Returns [`CliError`] if the file cannot be read, is not a valid export,
/// or the store cannot be written.
pub fn import(target: &StoreTarget, file: &Path) -> Result<(), CliError> {
    let text = std::fs::read_to_string(file).map_err(|source| CliError::Io {
        path: file.to_path_buf(),
        source,
    })?;

    let mut store = target.open()?;
    store.import_json(&text)?;

    tracing::info!(
        file = %file.display(),
        keys = store.keys()?.len(),
        "imported snapshot"
    );
    Ok(())
}
