//! Cart line record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use choco_shelf_core::ProductId;

use super::Product;

/// One line in the cart.
///
/// Carries a denormalized name and unit price so the cart renders (and
/// checks out) the price the customer saw, even if the catalog changes
/// underneath it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product this line refers to.
    pub product_id: ProductId,
    /// Product name at the time it was added.
    pub name: String,
    /// Number of units.
    pub quantity: u32,
    /// Unit price at the time it was added.
    pub unit_price: Decimal,
}

impl CartItem {
    /// Build a cart line for `quantity` units of `product`.
    #[must_use]
    pub fn of(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            quantity,
            unit_price: product.price,
        }
    }

    /// Line subtotal: unit price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}
