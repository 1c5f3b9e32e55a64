//! Customer repository.
//!
//! Customers are keyed by email rather than by generated ID: the demo's
//! checkout form knows nothing about stored IDs, so every submission is an
//! upsert against the address it carries.

use chrono::Utc;

use choco_shelf_core::{CustomerId, Email};

use crate::error::StoreError;
use crate::models::{Customer, CustomerInput};
use crate::store::{RecordStore, keys};

/// Repository for the customers collection.
pub struct CustomerRepository<'a> {
    store: &'a mut RecordStore,
}

impl<'a> CustomerRepository<'a> {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(store: &'a mut RecordStore) -> Self {
        Self { store }
    }

    /// All stored customers, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the collection cannot be read.
    pub fn list(&self) -> Result<Vec<Customer>, StoreError> {
        self.store.load_collection(keys::CUSTOMERS)
    }

    /// Look up a customer by email (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the collection cannot be read.
    pub fn find_by_email(&self, email: &Email) -> Result<Option<Customer>, StoreError> {
        Ok(self.list()?.into_iter().find(|c| c.email.matches(email)))
    }

    /// Insert or update a customer keyed by the input's email.
    ///
    /// A matching record (case-insensitive email comparison) is merged into:
    /// fields the input carries overwrite, fields it leaves `None` stay, and
    /// `updated_at` is touched. Otherwise a new record with a fresh ID is
    /// appended. The collection never grows by more than one per call.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if reading or writing the collection fails.
    pub fn upsert(&mut self, input: CustomerInput) -> Result<Customer, StoreError> {
        let mut customers = self.list()?;
        let now = Utc::now();

        let stored = if let Some(existing) = customers
            .iter_mut()
            .find(|c| c.email.matches(&input.email))
        {
            tracing::debug!(customer = %existing.id, "merging customer details");
            existing.merge(input, now);
            existing.clone()
        } else {
            let customer = Customer {
                id: CustomerId::generate(),
                email: input.email,
                name: input.name,
                phone: input.phone,
                accepts_marketing: input.accepts_marketing.unwrap_or(false),
                created_at: now,
                updated_at: now,
            };
            tracing::debug!(customer = %customer.id, "creating customer");
            customers.push(customer.clone());
            customer
        };

        self.store.save_collection(keys::CUSTOMERS, &customers)?;
        Ok(stored)
    }
}
