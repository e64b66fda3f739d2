//! Session-stored models for the storefront.

pub mod flash;

pub use flash::{Flash, FlashLevel, push_flash, take_flash};

/// Session keys used by the storefront.
///
/// The cart itself lives under [`crate::cart::CART_KEY`].
pub mod session_keys {
    /// Key for the one-shot notice shown on the next page render.
    pub const FLASH: &str = "flash";
}
