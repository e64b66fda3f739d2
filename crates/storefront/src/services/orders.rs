//! Checkout, payment and order tracking.

use bazaar_core::{Order, OrderId, OrderStatus, PaymentReceipt};
use tracing::{info, instrument, warn};

use super::ServiceError;
use crate::cart::CartStore;
use crate::shop::{ShopClient, ShopError};

/// Result of a checkout that created an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Order created and paid.
    Paid {
        order_id: OrderId,
        status: OrderStatus,
    },
    /// Order created but the payment call failed. The order holds stock, so
    /// the cart is cleared anyway and payment can be retried by id.
    PaymentFailed { order_id: OrderId, reason: String },
}

impl CheckoutOutcome {
    #[must_use]
    pub const fn order_id(&self) -> OrderId {
        match self {
            Self::Paid { order_id, .. } | Self::PaymentFailed { order_id, .. } => *order_id,
        }
    }

    /// Message shown to the shopper after checkout.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Paid { order_id, .. } => format!("Order placed! Your Order ID: {order_id}"),
            Self::PaymentFailed { order_id, reason } => format!(
                "Order placed with ID {order_id}, but payment failed: {reason}. You can retry payment from the tracking page."
            ),
        }
    }
}

/// Submit the stored cart as an order, pay for it and clear the cart.
///
/// An empty cart, or one holding a zero-quantity line, is rejected before
/// any API call. If the API rejects the order the cart is left untouched.
///
/// # Errors
///
/// - `EmptyCart` if there is nothing to order
/// - `InvalidQuantity` if a stored line asks for zero units
/// - `OrderRejected` with the API's message if the order is refused
/// - `Shop`/`Cart` for transport or storage failures
#[instrument(skip(store, client))]
pub async fn place_order<S: CartStore>(
    store: &S,
    client: &ShopClient,
) -> Result<CheckoutOutcome, ServiceError> {
    let cart = store.load().await?;
    if cart.is_empty() {
        return Err(ServiceError::EmptyCart);
    }
    if cart.items().iter().any(|item| item.quantity == 0) {
        return Err(ServiceError::InvalidQuantity);
    }

    let placed = client.place_order(&cart).await.map_err(|e| match e {
        ShopError::Api { message, .. } => ServiceError::OrderRejected(message),
        other => ServiceError::Shop(other),
    })?;
    info!(order_id = %placed.order_id, "Order placed");

    let outcome = match client.submit_payment(placed.order_id).await {
        Ok(receipt) => CheckoutOutcome::Paid {
            order_id: receipt.order_id,
            status: receipt.status,
        },
        Err(e) => {
            warn!(order_id = %placed.order_id, error = %e, "Payment failed after order was placed");
            CheckoutOutcome::PaymentFailed {
                order_id: placed.order_id,
                reason: payment_failure_reason(&e),
            }
        }
    };

    store.clear().await?;
    Ok(outcome)
}

/// Pay for an existing order. Paying an already paid order is harmless.
///
/// # Errors
///
/// Returns error if the API rejects the payment or cannot be reached.
#[instrument(skip(client))]
pub async fn pay_order(client: &ShopClient, order_id: OrderId) -> Result<PaymentReceipt, ServiceError> {
    Ok(client.submit_payment(order_id).await?)
}

/// Parse an order id typed by a shopper. Only positive integers are accepted.
///
/// # Errors
///
/// Returns `MissingOrderId` for blank, non-numeric, zero or negative input.
pub fn parse_order_id(raw: &str) -> Result<OrderId, ServiceError> {
    raw.parse::<OrderId>()
        .ok()
        .filter(|id| id.as_i32() > 0)
        .ok_or(ServiceError::MissingOrderId)
}

/// Order tracking display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackView {
    pub order_id: OrderId,
    pub created_at: String,
    pub status: String,
    pub paid: bool,
    pub total: String,
    pub lines: Vec<TrackLineView>,
    pub steps: Vec<StatusStepView>,
    /// The order exactly as the API returned it, pretty-printed.
    pub raw_json: String,
}

/// One order line on the tracking page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackLineView {
    pub product_id: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
}

/// One step of the fulfillment progress bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusStepView {
    pub label: &'static str,
    pub reached: bool,
    pub current: bool,
}

impl From<&Order> for TrackView {
    fn from(order: &Order) -> Self {
        let step = order.status.step();
        Self {
            order_id: order.id,
            created_at: order.created_at.format("%Y-%m-%d %H:%M UTC").to_string(),
            status: order.status.to_string(),
            paid: order.status.is_paid(),
            total: order.total_amount.to_string(),
            lines: order
                .items
                .iter()
                .map(|line| TrackLineView {
                    product_id: line.product_id.to_string(),
                    quantity: line.quantity,
                    unit_price: line.unit_price.to_string(),
                    line_total: line.line_total().to_string(),
                })
                .collect(),
            steps: OrderStatus::FLOW
                .iter()
                .map(|status| StatusStepView {
                    label: status.label(),
                    reached: status.step() <= step,
                    current: status.step() == step,
                })
                .collect(),
            raw_json: serde_json::to_string_pretty(order).unwrap_or_default(),
        }
    }
}

/// Look up an order from raw shopper input.
///
/// # Errors
///
/// Returns `MissingOrderId` for unusable input, or the API error (404 for
/// unknown orders).
#[instrument(skip(client))]
pub async fn track_order(client: &ShopClient, raw_id: &str) -> Result<TrackView, ServiceError> {
    let order_id = parse_order_id(raw_id)?;
    let order = client.track_order(order_id).await?;
    Ok(TrackView::from(&order))
}

fn payment_failure_reason(err: &ShopError) -> String {
    match err {
        ShopError::Api { message, .. } => message.clone(),
        other => other.to_string(),
    }
}
