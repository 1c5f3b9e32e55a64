//! Product catalog record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use choco_shelf_core::ProductId;

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Short description shown on the product card.
    pub description: String,
    /// Unit price in the shop currency.
    pub price: Decimal,
    /// Cocoa content, where it makes sense for the product.
    pub cocoa_percent: Option<u8>,
}
