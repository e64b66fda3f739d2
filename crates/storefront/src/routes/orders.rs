//! Checkout and order tracking route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::{instrument, warn};

use crate::cart::SessionCartStore;
use crate::error::Result;
use crate::filters;
use crate::models::{Flash, push_flash, take_flash};
use crate::services::{self, CheckoutOutcome, ServiceError, TrackView};
use crate::shop::ShopError;
use crate::state::AppState;

/// Order tracking page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/track.html")]
pub struct TrackTemplate {
    /// What the visitor typed, echoed back into the form.
    pub query: String,
    pub order: Option<TrackView>,
    pub error: Option<String>,
    pub flash: Option<Flash>,
    pub cart_count: u64,
}

/// Query parameters for the tracking page.
#[derive(Debug, Default, Deserialize)]
pub struct TrackQuery {
    pub order_id: Option<String>,
}

/// Form data for paying an existing order.
#[derive(Debug, Deserialize)]
pub struct PayForm {
    pub order_id: String,
}

/// Place an order for the session cart, pay for it and clear the cart.
///
/// Success lands on the tracking page for the new order; a refused order
/// returns to the cart with the reason.
#[instrument(skip(state, session))]
pub async fn place(State(state): State<AppState>, session: Session) -> Result<Redirect> {
    let store = SessionCartStore::new(session.clone());

    match services::place_order(&store, state.shop()).await {
        Ok(outcome) => {
            let flash = match &outcome {
                CheckoutOutcome::Paid { .. } => Flash::success(outcome.message()),
                CheckoutOutcome::PaymentFailed { .. } => Flash::error(outcome.message()),
            };
            push_flash(&session, flash).await?;
            Ok(Redirect::to(&track_path(&outcome.order_id().to_string())))
        }
        Err(e) if e.is_user_error() => {
            push_flash(&session, Flash::error(e.to_string())).await?;
            Ok(Redirect::to("/cart"))
        }
        Err(ServiceError::Shop(e)) => {
            warn!(error = %e, "Checkout failed");
            push_flash(&session, Flash::error(unavailable_message(&e))).await?;
            Ok(Redirect::to("/cart"))
        }
        Err(e) => Err(e.into()),
    }
}

/// Display the tracking form, and the order when an id was given.
#[instrument(skip(state, session))]
pub async fn track(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<TrackQuery>,
) -> Result<impl IntoResponse> {
    let flash = take_flash(&session).await;
    let cart_count = super::cart_count(&session).await?;
    let raw = query.order_id.unwrap_or_default();

    let (order, error) = if raw.trim().is_empty() {
        (None, None)
    } else {
        match services::track_order(state.shop(), &raw).await {
            Ok(view) => (Some(view), None),
            Err(ServiceError::Shop(ShopError::Api { message, .. })) => (None, Some(message)),
            Err(ServiceError::Shop(e)) => {
                warn!(error = %e, "Order lookup failed");
                (None, Some(unavailable_message(&e)))
            }
            Err(e) => (None, Some(e.to_string())),
        }
    };

    Ok(TrackTemplate {
        query: raw.trim().to_string(),
        order,
        error,
        flash,
        cart_count,
    })
}

/// Retry payment for an order and return to its tracking page.
#[instrument(skip(state, session))]
pub async fn pay(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<PayForm>,
) -> Result<Redirect> {
    let order_id = match services::parse_order_id(&form.order_id) {
        Ok(id) => id,
        Err(e) => {
            push_flash(&session, Flash::error(e.to_string())).await?;
            return Ok(Redirect::to("/track"));
        }
    };

    let flash = match services::pay_order(state.shop(), order_id).await {
        Ok(receipt) => Flash::success(format!(
            "Payment received. Order {} is {}",
            receipt.order_id, receipt.status
        )),
        Err(ServiceError::Shop(ShopError::Api { message, .. })) => {
            Flash::error(format!("Payment failed: {message}"))
        }
        Err(ServiceError::Shop(e)) => {
            warn!(error = %e, %order_id, "Payment retry failed");
            Flash::error(unavailable_message(&e))
        }
        Err(e) => return Err(e.into()),
    };

    push_flash(&session, flash).await?;
    Ok(Redirect::to(&track_path(&order_id.to_string())))
}

fn track_path(order_id: &str) -> String {
    format!("/track?order_id={order_id}")
}

fn unavailable_message(err: &ShopError) -> String {
    match err {
        ShopError::Api { message, .. } => message.clone(),
        _ => "The store is unavailable right now. Please try again shortly.".to_string(),
    }
}
