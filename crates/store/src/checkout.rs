//! Checkout flow: cart → order → customer.
//!
//! This is the multi-step sequence the demo's checkout form ran: place an
//! order for the cart's lines, upsert the customer who placed it, then empty
//! the cart. The steps touch separate keys and are not transactional - a
//! failure partway leaves the earlier writes in place.

use thiserror::Error;

use crate::cart::CartRepository;
use crate::customers::CustomerRepository;
use crate::error::StoreError;
use crate::models::{CustomerInput, LineItem, Order};
use crate::orders::OrderRepository;
use crate::store::RecordStore;

/// Failures of the checkout flow.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The cart has no lines to order.
    #[error("cannot check out an empty cart")]
    EmptyCart,

    /// A store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Check out the current cart for the customer described by `details`.
///
/// Returns the placed order. The cart is emptied last, so a failure earlier
/// in the sequence leaves it intact for a retry.
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`] when there is nothing to order, or
/// a wrapped [`StoreError`] if any step fails.
pub fn checkout(store: &mut RecordStore, details: CustomerInput) -> Result<Order, CheckoutError> {
    let items = CartRepository::new(store).items()?;
    if items.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let line_items: Vec<LineItem> = items.into_iter().map(Into::into).collect();
    let order = OrderRepository::new(store).place(line_items)?;
    CustomerRepository::new(store).upsert(details)?;
    CartRepository::new(store).clear()?;

    Ok(order)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use choco_shelf_core::Email;

    use super::*;
    use crate::models::CartItem;
    use crate::products::ProductRepository;

    fn details(email: &str) -> CustomerInput {
        CustomerInput::from_email(Email::parse(email).unwrap())
    }

    #[test]
    fn test_checkout_empty_cart_is_an_error() {
        let mut store = RecordStore::in_memory("choco_shop");
        let err = checkout(&mut store, details("a@example.com")).unwrap_err();
        assert!(matches!(err, CheckoutError::EmptyCart));
    }

    #[test]
    fn test_checkout_places_order_and_empties_cart() {
        let mut store = RecordStore::in_memory("choco_shop");
        ProductRepository::new(&mut store).seed().unwrap();
        let product = ProductRepository::new(&mut store)
            .list()
            .unwrap()
            .into_iter()
            .next()
            .unwrap();

        CartRepository::new(&mut store)
            .add(CartItem::of(&product, 2))
            .unwrap();
        let cart_total = CartRepository::new(&mut store).total().unwrap();
        assert!(cart_total > Decimal::ZERO);

        let order = checkout(&mut store, details("a@example.com")).unwrap();
        assert_eq!(order.total, cart_total);
        assert_eq!(order.line_items.len(), 1);

        assert!(CartRepository::new(&mut store).items().unwrap().is_empty());
        let customers = CustomerRepository::new(&mut store).list().unwrap();
        assert_eq!(customers.len(), 1);
    }

    #[test]
    fn test_repeat_checkout_reuses_customer() {
        let mut store = RecordStore::in_memory("choco_shop");
        ProductRepository::new(&mut store).seed().unwrap();
        let product = ProductRepository::new(&mut store)
            .list()
            .unwrap()
            .into_iter()
            .next()
            .unwrap();

        for _ in 0..2 {
            CartRepository::new(&mut store)
                .add(CartItem::of(&product, 1))
                .unwrap();
            checkout(&mut store, details("repeat@example.com")).unwrap();
        }

        assert_eq!(OrderRepository::new(&mut store).list().unwrap().len(), 2);
        assert_eq!(CustomerRepository::new(&mut store).list().unwrap().len(), 1);
    }
}
