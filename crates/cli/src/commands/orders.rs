//! `bazaar order | pay | track`

use std::fmt::Write;

use bazaar_storefront::services::{self, CheckoutOutcome, TrackView};

use super::{CliError, Context};

/// Place an order for the local cart, pay for it and clear the cart.
///
/// A failed payment still succeeds as a command: the order exists and the
/// message says how to retry.
///
/// # Errors
///
/// Returns error for an empty cart or a refused order.
pub async fn place(ctx: &Context) -> Result<String, CliError> {
    let outcome = services::place_order(&ctx.store, &ctx.client).await?;
    Ok(match &outcome {
        CheckoutOutcome::Paid { status, .. } => format!("{} (status: {status})", outcome.message()),
        CheckoutOutcome::PaymentFailed { order_id, .. } => {
            format!("{}\nRetry with: bazaar pay {order_id}", outcome.message())
        }
    })
}

/// Pay for an existing order.
///
/// # Errors
///
/// Returns error for a bad id or if the API refuses the payment.
pub async fn pay(ctx: &Context, raw_id: &str) -> Result<String, CliError> {
    let order_id = services::parse_order_id(raw_id)?;
    let receipt = services::pay_order(&ctx.client, order_id).await?;
    Ok(format!(
        "Payment received. Order {} is {}",
        receipt.order_id, receipt.status
    ))
}

/// Show an order.
///
/// # Errors
///
/// Returns error for a bad id or an unknown order.
pub async fn track(ctx: &Context, raw_id: &str) -> Result<String, CliError> {
    let view = services::track_order(&ctx.client, raw_id).await?;
    Ok(render_track(&view))
}

pub fn render_track(order: &TrackView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Order #{}  placed {}", order.order_id, order.created_at);

    let progress: Vec<String> = order
        .steps
        .iter()
        .map(|step| {
            if step.current {
                format!("[{}]", step.label)
            } else {
                step.label.to_string()
            }
        })
        .collect();
    let _ = writeln!(out, "Status: {}", progress.join(" > "));

    for line in &order.lines {
        let _ = writeln!(
            out,
            "  product {} x{} @ {} = {}",
            line.product_id, line.quantity, line.unit_price, line.line_total
        );
    }
    let _ = write!(out, "Total: {}", order.total);
    if !order.paid {
        let _ = write!(out, "\nAwaiting payment: bazaar pay {}", order.order_id);
    }
    out
}
