//! Client for the Bazaar order API.
//!
//! # Architecture
//!
//! - Plain JSON over HTTP with `reqwest`
//! - The API is the source of truth: products are fetched fresh for every
//!   render and nothing is cached here
//! - Non-success responses carry `{"error": "..."}`; that message (or the raw
//!   body when it is missing) is what users get to see
//!
//! # Example
//!
//! ```rust,ignore
//! use bazaar_storefront::shop::ShopClient;
//!
//! let client = ShopClient::new(&config.api)?;
//! let products = client.fetch_products().await?;
//! let placed = client.place_order(&cart).await?;
//! client.submit_payment(placed.order_id).await?;
//! let order = client.track_order(placed.order_id).await?;
//! ```

mod client;

pub use client::ShopClient;

use thiserror::Error;

/// Errors that can occur when talking to the order API.
#[derive(Debug, Error)]
pub enum ShopError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response body was not the expected JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A request URL could not be built from the configured base.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ShopError {
    /// HTTP status returned by the API, if it answered at all.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ShopError::Api {
            status: 400,
            message: "Not enough inventory for Laptop".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "API error (400): Not enough inventory for Laptop"
        );
        assert_eq!(err.status(), Some(400));
    }
}
