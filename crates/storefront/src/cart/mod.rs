//! Cart persistence.
//!
//! The cart lives on the shopper's side: a serialized list of
//! `{product_id, quantity}` lines under the key [`CART_KEY`] in some
//! key-value storage. [`CartStore`] abstracts that storage so the same
//! checkout code runs against a browser session, a JSON file, or memory.
//!
//! Missing entries read as an empty cart. Entries that no longer decode are
//! logged and also read as empty, so a bad write can never wedge checkout.

mod file;
mod memory;
mod session;

pub use file::FileCartStore;
pub use memory::MemoryCartStore;
pub use session::SessionCartStore;

use std::future::Future;

use bazaar_core::{Cart, CartItem};
use thiserror::Error;

/// Storage key the cart is kept under.
pub const CART_KEY: &str = "cart";

/// Errors from reading or writing stored carts.
#[derive(Debug, Error)]
pub enum CartStoreError {
    /// Session storage failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// File storage failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The cart could not be serialized.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Key-value storage holding one shopper's cart.
pub trait CartStore: Send + Sync {
    /// Read the stored cart; absent or unreadable entries give an empty cart.
    fn load(&self) -> impl Future<Output = Result<Cart, CartStoreError>> + Send;

    /// Replace the stored cart.
    fn save(&self, cart: &Cart) -> impl Future<Output = Result<(), CartStoreError>> + Send;

    /// Remove the stored cart entirely.
    fn clear(&self) -> impl Future<Output = Result<(), CartStoreError>> + Send;
}

/// Load the cart, merge `item` into it and store the result.
///
/// # Errors
///
/// Returns error if the store cannot be read or written.
pub async fn add_to_cart<S: CartStore>(store: &S, item: CartItem) -> Result<Cart, CartStoreError> {
    let mut cart = store.load().await?;
    cart.add(item);
    store.save(&cart).await?;
    Ok(cart)
}

/// Decode a stored cart, treating corrupt data as empty.
fn decode_cart(raw: &str) -> Cart {
    serde_json::from_str(raw).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Discarding unreadable stored cart");
        Cart::new()
    })
}
