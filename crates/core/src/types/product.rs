//! Catalog products as served by the order API.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// A purchasable product.
///
/// Owned by the server; clients treat it as read-only and refetch it on every
/// render rather than caching it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Optional marketing copy. Serialized as `null` when absent.
    #[serde(default)]
    pub description: Option<String>,
    pub price: Price,
    /// Units currently in stock.
    pub inventory: u32,
}

impl Product {
    /// Whether `quantity` units can be fulfilled from current stock.
    #[must_use]
    pub const fn has_stock_for(&self, quantity: u32) -> bool {
        self.inventory >= quantity
    }
}
