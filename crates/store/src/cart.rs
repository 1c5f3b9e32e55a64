//! Cart repository.

use rust_decimal::Decimal;

use choco_shelf_core::ProductId;

use crate::error::StoreError;
use crate::models::CartItem;
use crate::store::{RecordStore, keys};

/// Repository for the cart collection.
pub struct CartRepository<'a> {
    store: &'a mut RecordStore,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(store: &'a mut RecordStore) -> Self {
        Self { store }
    }

    /// Current cart lines, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the collection cannot be read.
    pub fn items(&self) -> Result<Vec<CartItem>, StoreError> {
        self.store.load_collection(keys::CART)
    }

    /// Append a line to the cart.
    ///
    /// Lines are not merged: adding the same product twice keeps two lines,
    /// in the order they were added.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if reading or writing the collection fails.
    pub fn add(&mut self, item: CartItem) -> Result<(), StoreError> {
        tracing::debug!(product = %item.product_id, quantity = item.quantity, "adding to cart");
        self.store.append(keys::CART, item)
    }

    /// Remove every line referring to `product_id`.
    ///
    /// Returns the number of lines removed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if reading or writing the collection fails.
    pub fn remove(&mut self, product_id: ProductId) -> Result<usize, StoreError> {
        let items = self.items()?;
        let before = items.len();
        let kept: Vec<CartItem> = items
            .into_iter()
            .filter(|item| item.product_id != product_id)
            .collect();
        let removed = before - kept.len();
        if removed > 0 {
            self.store.save_collection(keys::CART, &kept)?;
        }
        Ok(removed)
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the write fails.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.store.save_collection::<CartItem>(keys::CART, &[])
    }

    /// Sum of line subtotals.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the collection cannot be read.
    pub fn total(&self) -> Result<Decimal, StoreError> {
        Ok(self.items()?.iter().map(CartItem::subtotal).sum())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::Product;

    fn product(name: &str, cents: i64) -> Product {
        Product {
            id: ProductId::generate(),
            name: name.to_owned(),
            description: String::new(),
            price: Decimal::new(cents, 2),
            cocoa_percent: None,
        }
    }

    #[test]
    fn test_add_keeps_order_and_duplicates() {
        let mut store = RecordStore::in_memory("choco_shop");
        let dark = product("Dark 72% Bar", 450);
        let milk = product("Milk Hazelnut Bar", 520);

        let mut cart = CartRepository::new(&mut store);
        cart.add(CartItem::of(&dark, 1)).unwrap();
        cart.add(CartItem::of(&milk, 2)).unwrap();
        cart.add(CartItem::of(&dark, 1)).unwrap();

        let items = cart.items().unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].product_id, dark.id);
        assert_eq!(items[1].product_id, milk.id);
        assert_eq!(items[2].product_id, dark.id);
    }

    #[test]
    fn test_total() {
        let mut store = RecordStore::in_memory("choco_shop");
        let dark = product("Dark 72% Bar", 450);
        let truffles = product("Cocoa Nib Truffles", 1400);

        let mut cart = CartRepository::new(&mut store);
        assert_eq!(cart.total().unwrap(), Decimal::ZERO);

        cart.add(CartItem::of(&dark, 2)).unwrap();
        cart.add(CartItem::of(&truffles, 1)).unwrap();
        assert_eq!(cart.total().unwrap(), Decimal::new(2300, 2));
    }

    #[test]
    fn test_remove_drops_every_matching_line() {
        let mut store = RecordStore::in_memory("choco_shop");
        let dark = product("Dark 72% Bar", 450);
        let milk = product("Milk Hazelnut Bar", 520);

        let mut cart = CartRepository::new(&mut store);
        cart.add(CartItem::of(&dark, 1)).unwrap();
        cart.add(CartItem::of(&milk, 1)).unwrap();
        cart.add(CartItem::of(&dark, 3)).unwrap();

        assert_eq!(cart.remove(dark.id).unwrap(), 2);
        let items = cart.items().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].product_id, milk.id);

        // removing a product that is not in the cart removes nothing
        assert_eq!(cart.remove(dark.id).unwrap(), 0);
    }

    #[test]
    fn test_clear() {
        let mut store = RecordStore::in_memory("choco_shop");
        let dark = product("Dark 72% Bar", 450);

        let mut cart = CartRepository::new(&mut store);
        cart.add(CartItem::of(&dark, 1)).unwrap();
        cart.clear().unwrap();
        assert!(cart.items().unwrap().is_empty());
    }
}
