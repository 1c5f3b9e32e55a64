//! Store maintenance commands.

use super::{CliError, StoreTarget};

/// Create the store file and seed defaults.
///
/// Idempotent: running against an already-initialized store changes nothing.
///
/// # Errors
///
/// Returns [`CliError`] if the store cannot be opened or written.
pub fn init(target: &StoreTarget) -> Result<(), CliError> {
    let mut store = target.open()?;

    if store.initialize()? {
        tracing::info!(
            path = %target.path.display(),
            namespace = %target.namespace,
            "store initialized"
        );
    } else {
        tracing::info!(
            path = %target.path.display(),
            "store was already initialized"
        );
    }
    Ok(())
}

/// Delete every key under the namespace.
///
/// # Errors
///
/// Returns [`CliError::NotConfirmed`] unless `yes` is set, or [`CliError`]
/// if the store cannot be opened or written.
pub fn clear(target: &StoreTarget, yes: bool) -> Result<(), CliError> {
    if !yes {
        return Err(CliError::NotConfirmed);
    }

    let mut store = target.open()?;
    let count = store.keys()?.len();
    store.clear()?;

    tracing::info!(
        namespace = %target.namespace,
        keys = count,
        "cleared namespace"
    );
    Ok(())
}
