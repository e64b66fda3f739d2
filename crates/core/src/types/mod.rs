//! Core types for Bazaar.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod id;
pub mod order;
pub mod price;
pub mod product;
pub mod status;

pub use cart::{Cart, CartItem};
pub use id::*;
pub use order::{
    ErrorBody, Order, OrderLine, OrderPlaced, PaymentReceipt, PaymentRequest, PlaceOrderRequest,
};
pub use price::Price;
pub use product::Product;
pub use status::*;
