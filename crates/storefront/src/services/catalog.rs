//! Catalog and cart views.

use bazaar_core::{Cart, CartItem, Price, Product, ProductId};
use tracing::instrument;

use super::ServiceError;
use crate::cart::{CartStore, add_to_cart};
use crate::shop::ShopClient;

/// Name shown for cart lines whose product is no longer in the catalog.
pub const UNKNOWN_PRODUCT: &str = "Unknown";

/// Product display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductView {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: String,
    pub inventory: u32,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            description: product.description.clone().unwrap_or_default(),
            price: product.price.to_string(),
            inventory: product.inventory,
        }
    }
}

/// One priced cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineView {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub line_total: String,
}

/// A cart priced against the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub total: String,
    pub item_count: u64,
}

impl CartView {
    /// An empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            lines: Vec::new(),
            total: Price::ZERO.to_string(),
            item_count: 0,
        }
    }

    /// Price every cart line with `products`.
    ///
    /// Lines for products missing from the catalog keep their quantity but
    /// show as [`UNKNOWN_PRODUCT`] priced at zero.
    #[must_use]
    pub fn build(cart: &Cart, products: &[Product]) -> Self {
        let mut total = Price::ZERO;
        let lines = cart
            .items()
            .iter()
            .map(|item| {
                let (name, unit_price) = products
                    .iter()
                    .find(|p| p.id == item.product_id)
                    .map_or((UNKNOWN_PRODUCT, Price::ZERO), |p| (p.name.as_str(), p.price));
                let line_total = unit_price.times(item.quantity);
                total = total + line_total;
                CartLineView {
                    product_id: item.product_id,
                    name: name.to_string(),
                    quantity: item.quantity,
                    line_total: line_total.to_string(),
                }
            })
            .collect();

        Self {
            lines,
            total: total.to_string(),
            item_count: cart.total_quantity(),
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Fetch the catalog for display.
///
/// # Errors
///
/// Returns error if the product list cannot be fetched.
#[instrument(skip(client))]
pub async fn catalog(client: &ShopClient) -> Result<Vec<ProductView>, ServiceError> {
    let products = client.fetch_products().await?;
    Ok(products.iter().map(ProductView::from).collect())
}

/// Price the stored cart against the live catalog.
///
/// An empty cart is returned without calling the API.
///
/// # Errors
///
/// Returns error if the cart cannot be read or the catalog cannot be fetched.
#[instrument(skip(store, client))]
pub async fn cart_summary<S: CartStore>(
    store: &S,
    client: &ShopClient,
) -> Result<CartView, ServiceError> {
    let cart = store.load().await?;
    if cart.is_empty() {
        return Ok(CartView::empty());
    }
    let products = client.fetch_products().await?;
    Ok(CartView::build(&cart, &products))
}

/// Add `quantity` units of a product to the stored cart.
///
/// `quantity` is the raw form/CLI input: blank means 1, anything that is not
/// a positive whole number is rejected.
///
/// # Errors
///
/// Returns `InvalidQuantity` for bad input, or a storage error.
#[instrument(skip(store))]
pub async fn add_item<S: CartStore>(
    store: &S,
    product_id: ProductId,
    quantity: Option<&str>,
) -> Result<Cart, ServiceError> {
    let quantity = parse_quantity(quantity)?;
    Ok(add_to_cart(store, CartItem::new(product_id, quantity)).await?)
}

fn parse_quantity(raw: Option<&str>) -> Result<u32, ServiceError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(1),
        Some(s) => s
            .parse::<u32>()
            .ok()
            .filter(|&q| q > 0)
            .ok_or(ServiceError::InvalidQuantity),
    }
}
