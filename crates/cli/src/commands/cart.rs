//! `bazaar cart add | show | clear`

use std::fmt::Write;

use bazaar_core::ProductId;
use bazaar_storefront::cart::CartStore;
use bazaar_storefront::services::{self, CartView};

use super::{CliError, Context};

/// Merge a product into the local cart.
///
/// # Errors
///
/// Returns error for a bad quantity or if the cart file cannot be written.
pub async fn add(
    ctx: &Context,
    product_id: ProductId,
    quantity: Option<&str>,
) -> Result<String, CliError> {
    let cart = services::add_item(&ctx.store, product_id, quantity).await?;
    Ok(format!(
        "Added to cart. Product {product_id} now x{}",
        cart.quantity_of(product_id).unwrap_or_default()
    ))
}

/// Show the cart priced against the live catalog.
///
/// # Errors
///
/// Returns error if the cart cannot be read or the catalog fetched.
pub async fn show(ctx: &Context) -> Result<String, CliError> {
    let cart = services::cart_summary(&ctx.store, &ctx.client).await?;
    Ok(render_cart(&cart))
}

/// Remove the cart file.
///
/// # Errors
///
/// Returns error if the cart file exists but cannot be removed.
pub async fn clear(ctx: &Context) -> Result<String, CliError> {
    ctx.store
        .clear()
        .await
        .map_err(services::ServiceError::from)?;
    Ok("Cart cleared".to_string())
}

pub fn render_cart(cart: &CartView) -> String {
    if cart.is_empty() {
        return "Cart is empty".to_string();
    }

    let mut out = String::new();
    for line in &cart.lines {
        let _ = writeln!(out, "{}, Qty: {}, {}", line.name, line.quantity, line.line_total);
    }
    let _ = write!(out, "Total: {}", cart.total);
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bazaar_core::{Cart, CartItem, Price, Product};

    use super::*;
    use crate::commands::test_support::offline_context;

    #[tokio::test]
    async fn test_add_merges_into_cart_file() {
        let (ctx, _dir) = offline_context();
        add(&ctx, ProductId::new(2), None).await.unwrap();
        let message = add(&ctx, ProductId::new(2), Some("3")).await.unwrap();

        assert_eq!(message, "Added to cart. Product 2 now x4");
        assert!(ctx.store.path().exists());
    }

    #[tokio::test]
    async fn test_add_rejects_zero_quantity() {
        let (ctx, _dir) = offline_context();
        let err = add(&ctx, ProductId::new(2), Some("0")).await.unwrap_err();
        assert!(err.to_string().contains("at least 1"));
        assert!(!ctx.store.path().exists());
    }

    #[test]
    fn test_render_cart_lines() {
        let cart: Cart = vec![CartItem::new(ProductId::new(1), 2)].into();
        let products = [Product {
            id: ProductId::new(1),
            name: "Laptop".to_string(),
            description: None,
            price: Price::from_rupees(60_000),
            inventory: 50,
        }];

        let out = render_cart(&CartView::build(&cart, &products));
        assert_eq!(out, "Laptop, Qty: 2, ₹120000.00\nTotal: ₹120000.00");
    }

    #[tokio::test]
    async fn test_show_and_clear_empty_cart_work_offline() {
        let (ctx, _dir) = offline_context();
        assert_eq!(show(&ctx).await.unwrap(), "Cart is empty");

        add(&ctx, ProductId::new(1), None).await.unwrap();
        assert_eq!(clear(&ctx).await.unwrap(), "Cart cleared");
        assert_eq!(show(&ctx).await.unwrap(), "Cart is empty");
    }
}
