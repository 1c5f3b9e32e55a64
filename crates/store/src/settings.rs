//! Settings repository.

use crate::error::StoreError;
use crate::models::Settings;
use crate::store::{RecordStore, keys};

/// Repository for the settings singleton.
pub struct SettingsRepository<'a> {
    store: &'a mut RecordStore,
}

impl<'a> SettingsRepository<'a> {
    /// Create a new settings repository.
    #[must_use]
    pub const fn new(store: &'a mut RecordStore) -> Self {
        Self { store }
    }

    /// Load the stored settings, or the defaults when none are stored yet.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Corrupted`] if a settings record exists but
    /// cannot be decoded - corruption is not papered over with defaults.
    pub fn load(&self) -> Result<Settings, StoreError> {
        Ok(self.store.get(keys::SETTINGS)?.unwrap_or_default())
    }

    /// Persist `settings`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the write fails.
    pub fn save(&mut self, settings: &Settings) -> Result<(), StoreError> {
        self.store.put(keys::SETTINGS, settings)
    }
}
