//! Order API client implementation.

use std::sync::Arc;

use bazaar_core::{
    Cart, ErrorBody, Order, OrderId, OrderPlaced, PaymentReceipt, PaymentRequest,
    PlaceOrderRequest, Product,
};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use super::ShopError;
use crate::config::ShopApiConfig;

/// Longest slice of an unexpected response body written to the logs.
const LOG_BODY_LIMIT: usize = 500;

/// Client for the Bazaar order API.
///
/// Cheaply cloneable; clones share one connection pool.
#[derive(Clone)]
pub struct ShopClient {
    inner: Arc<ShopClientInner>,
}

struct ShopClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl std::fmt::Debug for ShopClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl ShopClient {
    /// Create a new order API client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &ShopApiConfig) -> Result<Self, ShopError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("bazaar-storefront/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(ShopClientInner {
                client,
                base_url: config.base_url.clone(),
            }),
        })
    }

    /// Base URL every endpoint is resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Fetch the full catalog.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response is not a product list.
    #[instrument(skip(self))]
    pub async fn fetch_products(&self) -> Result<Vec<Product>, ShopError> {
        let response = self.inner.client.get(self.endpoint("products")?).send().await?;
        let products: Vec<Product> = decode(response).await?;
        debug!(count = products.len(), "Fetched products");
        Ok(products)
    }

    /// Submit the cart as a new order.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::Api` carrying the server's message when the order is
    /// rejected (unknown product, not enough stock, ...).
    #[instrument(skip(self, cart), fields(lines = cart.len()))]
    pub async fn place_order(&self, cart: &Cart) -> Result<OrderPlaced, ShopError> {
        let body = PlaceOrderRequest {
            items: cart.items().to_vec(),
        };
        let response = self
            .inner
            .client
            .post(self.endpoint("order")?)
            .json(&body)
            .send()
            .await?;
        decode(response).await
    }

    /// Pay for an order.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the API rejects the payment.
    #[instrument(skip(self))]
    pub async fn submit_payment(&self, order_id: OrderId) -> Result<PaymentReceipt, ShopError> {
        let response = self
            .inner
            .client
            .post(self.endpoint("payment")?)
            .json(&PaymentRequest { order_id })
            .send()
            .await?;
        decode(response).await
    }

    /// Fetch an order's current state.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::Api` with status 404 for unknown orders.
    #[instrument(skip(self))]
    pub async fn track_order(&self, order_id: OrderId) -> Result<Order, ShopError> {
        let response = self
            .inner
            .client
            .get(self.endpoint(&format!("track/{order_id}"))?)
            .send()
            .await?;
        decode(response).await
    }

    fn endpoint(&self, path: &str) -> Result<Url, ShopError> {
        Ok(self.inner.base_url.join(path)?)
    }
}

/// Read a response, turning non-success statuses into `ShopError::Api`.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ShopError> {
    let status = response.status();
    // Body as text first for better error diagnostics
    let body = response.text().await?;

    if !status.is_success() {
        let message = error_message(&body)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());
        debug!(status = %status, message = %message, "Order API returned non-success status");
        return Err(ShopError::Api {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str(&body).map_err(|e| {
        tracing::error!(
            error = %e,
            body = %body.chars().take(LOG_BODY_LIMIT).collect::<String>(),
            "Failed to parse order API response"
        );
        ShopError::Parse(e)
    })
}

/// The `error` field of an error body, or the raw body if it has none.
fn error_message(body: &str) -> Option<String> {
    if let Ok(ErrorBody { error }) = serde_json::from_str::<ErrorBody>(body) {
        return Some(error);
    }
    let trimmed = body.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_error_field() {
        assert_eq!(
            error_message(r#"{"error": "Product 9 not found"}"#).as_deref(),
            Some("Product 9 not found")
        );
    }

    #[test]
    fn test_error_message_falls_back_to_raw_body() {
        assert_eq!(
            error_message(r#"{"detail": "nope"}"#).as_deref(),
            Some(r#"{"detail": "nope"}"#)
        );
        assert_eq!(error_message("  \n"), None);
    }

    #[test]
    fn test_endpoints_stay_under_base() {
        let config = ShopApiConfig::new("http://127.0.0.1:5000/api").unwrap();
        let client = ShopClient::new(&config).unwrap();
        assert_eq!(client.base_url().as_str(), "http://127.0.0.1:5000/api/");
        assert_eq!(
            client.endpoint("track/12").unwrap().as_str(),
            "http://127.0.0.1:5000/api/track/12"
        );
        assert_eq!(
            client.endpoint("products").unwrap().as_str(),
            "http://127.0.0.1:5000/api/products"
        );
    }
}
