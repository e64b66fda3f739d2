//! Cart route handlers.
//!
//! The cart is kept in the visitor's session under the `cart` key. Adding a
//! product merges quantities by product id; nothing is sent to the order API
//! until checkout.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use bazaar_core::ProductId;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::{instrument, warn};

use crate::cart::{CartStore, SessionCartStore};
use crate::error::{AppError, Result};
use crate::filters;
use crate::models::{Flash, push_flash, take_flash};
use crate::services::{self, CartView, ServiceError};
use crate::state::AppState;

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/cart.html")]
pub struct CartTemplate {
    pub cart: CartView,
    /// Set when the cart could not be priced against the catalog.
    pub load_error: Option<String>,
    /// Whether the stored cart holds anything, even if it could not be priced.
    pub has_items: bool,
    pub flash: Option<Flash>,
    pub cart_count: u64,
}

/// Form data for adding to cart.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: ProductId,
    /// Raw quantity field; blank means one unit.
    #[serde(default)]
    pub quantity: Option<String>,
}

/// Display the cart page.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<impl IntoResponse> {
    let flash = take_flash(&session).await;
    let store = SessionCartStore::new(session);
    let stored = store.load().await?;

    let (cart, load_error) = match services::cart_summary(&store, state.shop()).await {
        Ok(cart) => (cart, None),
        Err(ServiceError::Shop(e)) => {
            warn!(error = %e, "Failed to price cart");
            (
                CartView::empty(),
                Some("Your cart could not be loaded. Please try again shortly.".to_string()),
            )
        }
        Err(e) => return Err(AppError::from(e)),
    };

    Ok(CartTemplate {
        cart,
        load_error,
        has_items: !stored.is_empty(),
        flash,
        cart_count: stored.total_quantity(),
    })
}

/// Add an item to the cart and return to the catalog.
#[instrument(skip(session))]
pub async fn add(session: Session, Form(form): Form<AddToCartForm>) -> Result<Redirect> {
    let store = SessionCartStore::new(session.clone());

    let flash = match services::add_item(&store, form.product_id, form.quantity.as_deref()).await {
        Ok(_) => Flash::success("Added to cart"),
        Err(e) if e.is_user_error() => Flash::error(e.to_string()),
        Err(e) => return Err(e.into()),
    };

    push_flash(&session, flash).await?;
    Ok(Redirect::to("/"))
}

/// Empty the cart.
#[instrument(skip(session))]
pub async fn clear(session: Session) -> Result<Redirect> {
    SessionCartStore::new(session.clone()).clear().await?;
    push_flash(&session, Flash::info("Cart cleared")).await?;
    Ok(Redirect::to("/cart"))
}
