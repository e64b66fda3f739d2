//! Storefront workflows.
//!
//! Each workflow is a short sequence of order API calls and cart storage
//! operations producing view data for a page (or CLI output):
//!
//! - [`catalog`] - list products for the shop front
//! - [`cart_summary`] - price the stored cart against the live catalog
//! - [`add_item`] - validate and merge a line into the stored cart
//! - [`place_order`] - submit the cart, pay for it, clear it
//! - [`pay_order`] - retry payment for an existing order
//! - [`track_order`] - look up an order by the id a shopper typed in

pub mod catalog;
pub mod orders;

pub use catalog::{CartLineView, CartView, ProductView, add_item, cart_summary, catalog};
pub use orders::{
    CheckoutOutcome, StatusStepView, TrackLineView, TrackView, parse_order_id, pay_order, place_order,
    track_order,
};

use thiserror::Error;

use crate::cart::CartStoreError;
use crate::shop::ShopError;

/// Errors surfaced to the shopper by a workflow.
///
/// The `Display` text of the first four variants is the exact message shown
/// to users.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Checkout attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Tracking attempted without a usable order id.
    #[error("Enter Order ID")]
    MissingOrderId,

    /// Quantity was zero or not a number.
    #[error("Quantity must be a whole number of at least 1")]
    InvalidQuantity,

    /// The API refused to create the order.
    #[error("Order Error: {0}")]
    OrderRejected(String),

    /// Any other order API failure.
    #[error(transparent)]
    Shop(#[from] ShopError),

    /// Cart storage failed.
    #[error(transparent)]
    Cart(#[from] CartStoreError),
}

impl ServiceError {
    /// Whether this is the shopper's mistake rather than a system failure.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyCart | Self::MissingOrderId | Self::InvalidQuantity | Self::OrderRejected(_)
        )
    }
}
