//! Command implementations.
//!
//! Each command runs one storefront workflow against a file-backed cart and
//! returns the text to print.

pub mod cart;
pub mod catalog;
pub mod orders;

use std::path::Path;
use std::time::Duration;

use bazaar_storefront::cart::FileCartStore;
use bazaar_storefront::config::{ConfigError, ShopApiConfig};
use bazaar_storefront::services::ServiceError;
use bazaar_storefront::shop::{ShopClient, ShopError};
use thiserror::Error;

/// Errors that end a command with a non-zero exit.
#[derive(Debug, Error)]
pub enum CliError {
    /// The API base URL is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The HTTP client could not be built.
    #[error("Could not create API client: {0}")]
    Client(#[from] ShopError),

    /// A workflow failed.
    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// What every command needs: an API client and the local cart.
pub struct Context {
    pub client: ShopClient,
    pub store: FileCartStore,
}

impl Context {
    /// Build a context for `api_base`, keeping the cart under `cart_dir`.
    ///
    /// # Errors
    ///
    /// Returns error if `api_base` is not an http(s) URL or the client cannot
    /// be built.
    pub fn new(api_base: &str, timeout_secs: u64, cart_dir: &Path) -> Result<Self, CliError> {
        let mut config = ShopApiConfig::new(api_base)?;
        config.timeout = Duration::from_secs(timeout_secs);

        Ok(Self {
            client: ShopClient::new(&config)?,
            store: FileCartStore::new(cart_dir),
        })
    }
}
