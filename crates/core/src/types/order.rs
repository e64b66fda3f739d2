//! Orders and the request/response bodies of the order API.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::cart::CartItem;
use super::id::{OrderId, ProductId};
use super::price::Price;
use super::status::OrderStatus;

/// A line of a placed order, priced at the moment the order was created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: u32,
    pub unit_price: Price,
}

impl OrderLine {
    /// `unit_price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

/// A server-side order as returned by the tracking endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Creation time in UTC, without offset (`2026-10-18T09:30:00.123456`).
    pub created_at: NaiveDateTime,
    pub total_amount: Price,
    pub status: OrderStatus,
    #[serde(default)]
    pub items: Vec<OrderLine>,
}

/// Body of `POST /order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceOrderRequest {
    #[serde(default)]
    pub items: Vec<CartItem>,
}

/// Response of a successful `POST /order`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPlaced {
    pub order_id: OrderId,
    pub status: OrderStatus,
}

/// Body of `POST /payment`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub order_id: OrderId,
}

/// Response of a successful `POST /payment`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub order_id: OrderId,
    pub status: OrderStatus,
}

/// Error body returned by the order API for any non-success response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    /// Create an error body.
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
