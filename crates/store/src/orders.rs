//! Order repository.

use chrono::Utc;
use rust_decimal::Decimal;

use choco_shelf_core::{OrderId, OrderStatus};

use crate::error::StoreError;
use crate::models::{LineItem, Order};
use crate::stats::StatsRepository;
use crate::store::{RecordStore, keys};

/// Repository for the orders collection.
pub struct OrderRepository<'a> {
    store: &'a mut RecordStore,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(store: &'a mut RecordStore) -> Self {
        Self { store }
    }

    /// All placed orders, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the collection cannot be read.
    pub fn list(&self) -> Result<Vec<Order>, StoreError> {
        self.store.load_collection(keys::ORDERS)
    }

    /// Look up an order by ID.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the collection cannot be read.
    pub fn find(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
        Ok(self.list()?.into_iter().find(|o| o.id == id))
    }

    /// Place an order for `line_items`: assign a fresh ID and timestamp,
    /// append it to the orders collection, and fold it into the stats
    /// singleton.
    ///
    /// The two writes are separate keys with no cross-key atomicity: if the
    /// stats write fails after the order write succeeded, the aggregate
    /// diverges from the collection and stays that way.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if either write fails.
    pub fn place(&mut self, line_items: Vec<LineItem>) -> Result<Order, StoreError> {
        let total: Decimal = line_items.iter().map(LineItem::subtotal).sum();
        let order = Order {
            id: OrderId::generate(),
            created_at: Utc::now(),
            line_items,
            total,
            status: OrderStatus::Pending,
        };

        self.store.append(keys::ORDERS, order.clone())?;
        StatsRepository::new(self.store).record_order(&order)?;

        tracing::info!(order = %order.id, total = %order.total, "placed order");
        Ok(order)
    }
}
