//! In-memory catalog and order store.
//!
//! All state lives behind a single `tokio::sync::RwLock`. Order creation
//! validates every line and decrements stock under one write guard, so two
//! concurrent checkouts can never both claim the last unit of a product.

use std::collections::BTreeMap;

use bazaar_core::{
    Cart, CartItem, Order, OrderId, OrderLine, OrderStatus, Price, Product, ProductId,
};
use chrono::SubsecRound;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

/// Products created when the catalog starts out empty.
const SEED_PRODUCTS: &[(&str, i64)] = &[
    ("Laptop", 60_000),
    ("Smartphone", 15_000),
    ("Headphones", 2_000),
    ("Keyboard", 1_200),
];

/// Errors returned by store operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("No items provided")]
    NoItems,

    #[error("Invalid quantity for product {0}")]
    InvalidQuantity(ProductId),

    #[error("Product {0} not found")]
    ProductNotFound(ProductId),

    #[error("Not enough inventory for {0}")]
    InsufficientInventory(String),

    #[error("Order not found")]
    OrderNotFound(OrderId),

    #[error("Order {0} is already delivered")]
    AlreadyDelivered(OrderId),

    #[error("Order {0} is awaiting payment")]
    AwaitingPayment(OrderId),
}

/// What [`ShopStore::seed`] did to the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The catalog was empty and this many products were created.
    Seeded(usize),
    /// The catalog existed and this many products were topped back up.
    Restocked(usize),
}

/// Catalog and order state.
#[derive(Debug, Default)]
pub struct ShopStore {
    inner: RwLock<Inventory>,
}

#[derive(Debug, Default)]
struct Inventory {
    products: BTreeMap<ProductId, Product>,
    orders: BTreeMap<OrderId, Order>,
    last_product_id: i32,
    last_order_id: i32,
}

impl ShopStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an empty catalog, or top up low stock on an existing one.
    #[instrument(skip(self))]
    pub async fn seed(&self, default_inventory: u32) -> SeedOutcome {
        let mut inventory = self.inner.write().await;

        if inventory.products.is_empty() {
            for (name, rupees) in SEED_PRODUCTS {
                inventory.insert_product(
                    name,
                    None,
                    Price::from_rupees(*rupees),
                    default_inventory,
                );
            }
            info!(count = SEED_PRODUCTS.len(), "Seeded catalog");
            return SeedOutcome::Seeded(SEED_PRODUCTS.len());
        }

        let mut restocked = 0;
        for product in inventory.products.values_mut() {
            if product.inventory < default_inventory {
                product.inventory = default_inventory;
                restocked += 1;
            }
        }
        info!(restocked, "Inventory reset where needed");
        SeedOutcome::Restocked(restocked)
    }

    /// Add a product to the catalog.
    pub async fn add_product(
        &self,
        name: &str,
        description: Option<&str>,
        price: Price,
        inventory: u32,
    ) -> Product {
        self.inner
            .write()
            .await
            .insert_product(name, description, price, inventory)
    }

    /// All products ordered by id.
    pub async fn products(&self) -> Vec<Product> {
        self.inner.read().await.products.values().cloned().collect()
    }

    /// Look up a single product.
    pub async fn product(&self, id: ProductId) -> Option<Product> {
        self.inner.read().await.products.get(&id).cloned()
    }

    /// Create a `Pending` order and take its stock.
    ///
    /// Nothing is modified unless every line is valid. Several lines for the
    /// same product are checked against stock by their combined quantity.
    ///
    /// # Errors
    ///
    /// - `NoItems` if `items` is empty
    /// - `InvalidQuantity` if any line asks for zero units
    /// - `ProductNotFound` if a line names an unknown product
    /// - `InsufficientInventory` if stock cannot cover a product's total
    #[instrument(skip(self, items), fields(lines = items.len()))]
    pub async fn create_order(&self, items: &[CartItem]) -> Result<Order, StoreError> {
        if items.is_empty() {
            return Err(StoreError::NoItems);
        }
        if let Some(zero) = items.iter().find(|item| item.quantity == 0) {
            return Err(StoreError::InvalidQuantity(zero.product_id));
        }

        let requested: Cart = items.iter().copied().collect();
        let mut inventory = self.inner.write().await;

        let mut lines = Vec::with_capacity(requested.len());
        for item in &requested {
            let product = inventory
                .products
                .get(&item.product_id)
                .ok_or(StoreError::ProductNotFound(item.product_id))?;
            if !product.has_stock_for(item.quantity) {
                return Err(StoreError::InsufficientInventory(product.name.clone()));
            }
            lines.push(OrderLine {
                product_id: product.id,
                quantity: item.quantity,
                unit_price: product.price,
            });
        }

        for line in &lines {
            if let Some(product) = inventory.products.get_mut(&line.product_id) {
                product.inventory -= line.quantity;
            }
        }

        inventory.last_order_id += 1;
        let order = Order {
            id: OrderId::new(inventory.last_order_id),
            created_at: chrono::Utc::now().naive_utc().trunc_subsecs(6),
            total_amount: lines.iter().map(OrderLine::line_total).sum(),
            status: OrderStatus::Pending,
            items: lines,
        };
        inventory.orders.insert(order.id, order.clone());

        info!(order_id = %order.id, total = %order.total_amount, "Order created");
        Ok(order)
    }

    /// Look up an order.
    ///
    /// # Errors
    ///
    /// Returns `OrderNotFound` if no order has this id.
    pub async fn order(&self, id: OrderId) -> Result<Order, StoreError> {
        self.inner
            .read()
            .await
            .orders
            .get(&id)
            .cloned()
            .ok_or(StoreError::OrderNotFound(id))
    }

    /// Accept payment for an order.
    ///
    /// A `Pending` order moves to `Packed`. Paying an order that is already
    /// past `Pending` changes nothing and reports its current status.
    ///
    /// # Errors
    ///
    /// Returns `OrderNotFound` if no order has this id.
    #[instrument(skip(self))]
    pub async fn pay(&self, id: OrderId) -> Result<OrderStatus, StoreError> {
        let mut inventory = self.inner.write().await;
        let order = inventory
            .orders
            .get_mut(&id)
            .ok_or(StoreError::OrderNotFound(id))?;

        if order.status == OrderStatus::Pending {
            order.status = OrderStatus::Packed;
            info!(order_id = %id, "Payment accepted");
        } else {
            debug!(order_id = %id, status = %order.status, "Payment repeated, order unchanged");
        }
        Ok(order.status)
    }

    /// Move a paid order to the next status in the fulfillment flow.
    ///
    /// Only [`ShopStore::pay`] takes an order out of `Pending`.
    ///
    /// # Errors
    ///
    /// Returns `OrderNotFound` for unknown ids, `AwaitingPayment` while the
    /// order is unpaid and `AlreadyDelivered` once the order has reached the
    /// end of the flow.
    #[instrument(skip(self))]
    pub async fn advance(&self, id: OrderId) -> Result<Order, StoreError> {
        let mut inventory = self.inner.write().await;
        let order = inventory
            .orders
            .get_mut(&id)
            .ok_or(StoreError::OrderNotFound(id))?;

        if order.status == OrderStatus::Pending {
            return Err(StoreError::AwaitingPayment(id));
        }
        let next = order.status.next().ok_or(StoreError::AlreadyDelivered(id))?;
        order.status = next;
        info!(order_id = %id, status = %next, "Order advanced");
        Ok(order.clone())
    }
}

impl Inventory {
    fn insert_product(
        &mut self,
        name: &str,
        description: Option<&str>,
        price: Price,
        inventory: u32,
    ) -> Product {
        self.last_product_id += 1;
        let product = Product {
            id: ProductId::new(self.last_product_id),
            name: name.to_string(),
            description: description.map(String::from),
            price,
            inventory,
        };
        self.products.insert(product.id, product.clone());
        product
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item(product: i32, quantity: u32) -> CartItem {
        CartItem::new(ProductId::new(product), quantity)
    }

    async fn seeded() -> ShopStore {
        let store = ShopStore::new();
        store.seed(50).await;
        store
    }

    #[tokio::test]
    async fn test_seed_empty_catalog() {
        let store = ShopStore::new();
        assert_eq!(store.seed(50).await, SeedOutcome::Seeded(4));

        let products = store.products().await;
        let names: Vec<_> = products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Laptop", "Smartphone", "Headphones", "Keyboard"]);
        assert!(products.iter().all(|p| p.inventory == 50));
        assert_eq!(products[0].price, Price::from_rupees(60_000));
    }

    #[tokio::test]
    async fn test_seed_tops_up_existing_catalog() {
        let store = seeded().await;
        store.create_order(&[item(1, 10)]).await.unwrap();

        assert_eq!(store.seed(50).await, SeedOutcome::Restocked(1));
        assert_eq!(store.product(ProductId::new(1)).await.unwrap().inventory, 50);
        assert_eq!(store.products().await.len(), 4);
    }

    #[tokio::test]
    async fn test_create_order_takes_stock_and_prices_lines() {
        let store = seeded().await;
        let order = store
            .create_order(&[item(1, 2), item(4, 1)])
            .await
            .unwrap();

        assert_eq!(order.id, OrderId::new(1));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total_amount, Price::from_rupees(121_200));
        assert_eq!(order.items[1].unit_price, Price::from_rupees(1_200));
        assert_eq!(store.product(ProductId::new(1)).await.unwrap().inventory, 48);
        assert_eq!(store.order(order.id).await.unwrap(), order);
    }

    #[tokio::test]
    async fn test_create_order_rejects_empty() {
        let store = seeded().await;
        assert_eq!(store.create_order(&[]).await, Err(StoreError::NoItems));
    }

    #[tokio::test]
    async fn test_create_order_rejects_zero_quantity() {
        let store = seeded().await;
        let err = store
            .create_order(&[item(1, 1), item(2, 0)])
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::InvalidQuantity(ProductId::new(2)));
    }

    #[tokio::test]
    async fn test_create_order_unknown_product_changes_nothing() {
        let store = seeded().await;
        let err = store
            .create_order(&[item(1, 5), item(99, 1)])
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Product 99 not found");
        assert_eq!(store.product(ProductId::new(1)).await.unwrap().inventory, 50);
    }

    #[tokio::test]
    async fn test_duplicate_lines_checked_by_combined_quantity() {
        let store = seeded().await;
        let err = store
            .create_order(&[item(2, 30), item(2, 30)])
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Not enough inventory for Smartphone");
        assert_eq!(store.product(ProductId::new(2)).await.unwrap().inventory, 50);
    }

    #[tokio::test]
    async fn test_created_at_has_microsecond_precision() {
        use chrono::Timelike;

        let store = seeded().await;
        let order = store.create_order(&[item(3, 1)]).await.unwrap();
        assert_eq!(order.created_at.nanosecond() % 1_000, 0);
    }

    #[tokio::test]
    async fn test_pay_is_idempotent() {
        let store = seeded().await;
        let order = store.create_order(&[item(3, 1)]).await.unwrap();

        assert_eq!(store.pay(order.id).await.unwrap(), OrderStatus::Packed);
        store.advance(order.id).await.unwrap();
        assert_eq!(store.pay(order.id).await.unwrap(), OrderStatus::Shipped);
    }

    #[tokio::test]
    async fn test_unknown_order() {
        let store = seeded().await;
        let id = OrderId::new(404);
        assert_eq!(store.order(id).await, Err(StoreError::OrderNotFound(id)));
        assert_eq!(store.pay(id).await, Err(StoreError::OrderNotFound(id)));
    }

    #[tokio::test]
    async fn test_advance_stops_at_delivered() {
        let store = seeded().await;
        let order = store.create_order(&[item(3, 1)]).await.unwrap();

        assert_eq!(
            store.advance(order.id).await,
            Err(StoreError::AwaitingPayment(order.id))
        );
        assert_eq!(store.order(order.id).await.unwrap().status, OrderStatus::Pending);

        store.pay(order.id).await.unwrap();
        for expected in &OrderStatus::FLOW[2..] {
            assert_eq!(store.advance(order.id).await.unwrap().status, *expected);
        }
        assert_eq!(
            store.advance(order.id).await,
            Err(StoreError::AlreadyDelivered(order.id))
        );
    }
}
