//! Stats repository.

use crate::error::StoreError;
use crate::models::{Order, Stats};
use crate::store::{RecordStore, keys};

/// Repository for the stats singleton.
pub struct StatsRepository<'a> {
    store: &'a mut RecordStore,
}

impl<'a> StatsRepository<'a> {
    /// Create a new stats repository.
    #[must_use]
    pub const fn new(store: &'a mut RecordStore) -> Self {
        Self { store }
    }

    /// Load the stored aggregate, or a zeroed one when none is stored yet.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Corrupted`] if a stats record exists but cannot
    /// be decoded.
    pub fn load(&self) -> Result<Stats, StoreError> {
        Ok(self.store.get(keys::STATS)?.unwrap_or_default())
    }

    /// Fold `order` into the aggregate and persist it.
    ///
    /// This is the incremental maintenance the aggregate relies on; nothing
    /// ever recomputes it from the orders collection.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if reading or writing the singleton fails.
    pub fn record_order(&mut self, order: &Order) -> Result<Stats, StoreError> {
        let mut stats = self.load()?;
        stats.record_order(order.total, order.created_at);
        self.store.put(keys::STATS, &stats)?;
        Ok(stats)
    }
}
