//! Product catalog repository.

use rust_decimal::Decimal;

use choco_shelf_core::ProductId;

use crate::error::StoreError;
use crate::models::Product;
use crate::store::{RecordStore, keys};

/// The catalog the demo ships with.
#[must_use]
pub fn default_catalog() -> Vec<Product> {
    let bar = |name: &str, description: &str, cents: i64, cocoa: Option<u8>| Product {
        id: ProductId::generate(),
        name: name.to_owned(),
        description: description.to_owned(),
        price: Decimal::new(cents, 2),
        cocoa_percent: cocoa,
    };

    vec![
        bar(
            "Dark 72% Bar",
            "Single-origin dark chocolate, stone ground.",
            450,
            Some(72),
        ),
        bar(
            "Milk Hazelnut Bar",
            "Milk chocolate with roasted Piedmont hazelnuts.",
            520,
            Some(38),
        ),
        bar(
            "Cocoa Nib Truffles",
            "A dozen truffles rolled in crushed nibs.",
            1400,
            None,
        ),
        bar(
            "Drinking Chocolate",
            "Shaved couverture for thick drinking chocolate.",
            980,
            Some(60),
        ),
    ]
}

/// Repository for the product catalog collection.
pub struct ProductRepository<'a> {
    store: &'a mut RecordStore,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(store: &'a mut RecordStore) -> Self {
        Self { store }
    }

    /// All catalog products, in stored order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the collection cannot be read.
    pub fn list(&self) -> Result<Vec<Product>, StoreError> {
        self.store.load_collection(keys::PRODUCTS)
    }

    /// Look up a product by ID.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the collection cannot be read.
    pub fn find(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        Ok(self.list()?.into_iter().find(|p| p.id == id))
    }

    /// Write the default catalog if no products are stored yet.
    ///
    /// Returns the number of products seeded (zero when the catalog already
    /// has entries).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if reading or writing the collection fails.
    pub fn seed(&mut self) -> Result<usize, StoreError> {
        if !self.list()?.is_empty() {
            return Ok(0);
        }
        let catalog = default_catalog();
        self.store.save_collection(keys::PRODUCTS, &catalog)?;
        tracing::info!(count = catalog.len(), "seeded product catalog");
        Ok(catalog.len())
    }
}
