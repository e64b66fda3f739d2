//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Product catalog
//! GET  /health                 - Health check
//!
//! # Cart (session storage, POST-redirect-GET)
//! GET  /cart                   - Cart page with priced lines
//! POST /cart/add               - Merge a line into the cart
//! POST /cart/clear             - Empty the cart
//!
//! # Orders
//! POST /order                  - Place, pay for and clear the cart
//! GET  /track?order_id=N       - Order tracking page
//! POST /track/pay              - Retry payment for an order
//! ```
//!
//! Form handlers never render directly: they store a [`Flash`] notice and
//! redirect, so reloading a page never resubmits a form.
//!
//! [`Flash`]: crate::models::Flash

pub mod cart;
pub mod home;
pub mod orders;

use axum::{
    Router,
    routing::{get, post},
};
use tower_sessions::Session;

use crate::cart::{CartStore, SessionCartStore};
use crate::error::Result;
use crate::state::AppState;

/// Create the storefront routes router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/health", get(health))
        .route("/cart", get(cart::show))
        .route("/cart/add", post(cart::add))
        .route("/cart/clear", post(cart::clear))
        .route("/order", post(orders::place))
        .route("/track", get(orders::track))
        .route("/track/pay", post(orders::pay))
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Number of units in the visitor's cart, for the header badge.
async fn cart_count(session: &Session) -> Result<u64> {
    Ok(SessionCartStore::new(session.clone())
        .load()
        .await?
        .total_quantity())
}
