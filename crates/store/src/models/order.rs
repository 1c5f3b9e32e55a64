//! Order records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use choco_shelf_core::{OrderId, OrderStatus, ProductId};

use super::CartItem;

/// One line of a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product the line refers to.
    pub product_id: ProductId,
    /// Product name at purchase time.
    pub name: String,
    /// Number of units.
    pub quantity: u32,
    /// Unit price at purchase time.
    pub unit_price: Decimal,
}

impl LineItem {
    /// Line subtotal: unit price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

impl From<CartItem> for LineItem {
    fn from(item: CartItem) -> Self {
        Self {
            product_id: item.product_id,
            name: item.name,
            quantity: item.quantity,
            unit_price: item.unit_price,
        }
    }
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
    /// Purchased lines.
    pub line_items: Vec<LineItem>,
    /// Sum of line subtotals at placement time.
    pub total: Decimal,
    /// Lifecycle status.
    pub status: OrderStatus,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_line_item_from_cart_item() {
        let cart_item = CartItem {
            product_id: ProductId::generate(),
            name: "Cocoa Nib Truffles".to_owned(),
            quantity: 2,
            unit_price: Decimal::new(1200, 2),
        };
        let line: LineItem = cart_item.clone().into();
        assert_eq!(line.product_id, cart_item.product_id);
        assert_eq!(line.subtotal(), Decimal::new(2400, 2));
    }
}
