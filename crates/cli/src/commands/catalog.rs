//! `bazaar products`

use std::fmt::Write;

use bazaar_storefront::services::{self, ProductView};

use super::{CliError, Context};

/// List the catalog.
///
/// # Errors
///
/// Returns error if the catalog cannot be fetched.
pub async fn products(ctx: &Context) -> Result<String, CliError> {
    let products = services::catalog(&ctx.client).await?;
    Ok(render_products(&products))
}

/// One block per product: id, name, price and stock, then the description.
pub fn render_products(products: &[ProductView]) -> String {
    if products.is_empty() {
        return "No products available.".to_string();
    }

    let mut out = String::new();
    for product in products {
        let _ = writeln!(
            out,
            "#{:<4} {:<24} {:>14}  stock {}",
            product.id, product.name, product.price, product.inventory
        );
        if !product.description.is_empty() {
            let _ = writeln!(out, "      {}", product.description);
        }
    }
    out.trim_end().to_string()
}
