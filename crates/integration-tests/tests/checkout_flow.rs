//! Storefront workflows against a live order API.
//!
//! These drive `bazaar_storefront::services` exactly as the web handlers and
//! the CLI do, with an in-memory cart.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use bazaar_core::{
    CartItem, ErrorBody, OrderId, OrderPlaced, OrderStatus, PlaceOrderRequest, ProductId,
};
use bazaar_integration_tests::{TestApi, serve};
use bazaar_storefront::cart::{CartStore, MemoryCartStore, add_to_cart};
use bazaar_storefront::config::ShopApiConfig;
use bazaar_storefront::services::{self, CheckoutOutcome, ServiceError};
use bazaar_storefront::shop::{ShopClient, ShopError};

async fn cart_with(items: &[(i32, u32)]) -> MemoryCartStore {
    let store = MemoryCartStore::new();
    for &(product, quantity) in items {
        add_to_cart(&store, CartItem::new(ProductId::new(product), quantity))
            .await
            .expect("memory store never fails");
    }
    store
}

#[tokio::test]
async fn test_catalog_renders_prices() {
    let api = TestApi::spawn().await;
    let products = services::catalog(&api.client()).await.expect("catalog");

    assert_eq!(products.len(), 4);
    assert_eq!(products[1].name, "Smartphone");
    assert_eq!(products[1].price, "₹15000.00");
}

#[tokio::test]
async fn test_cart_summary_prices_merged_lines() {
    let api = TestApi::spawn().await;
    let store = cart_with(&[(1, 1), (4, 2), (1, 1)]).await;

    let cart = services::cart_summary(&store, &api.client())
        .await
        .expect("summary");
    assert_eq!(cart.lines.len(), 2);
    assert_eq!(cart.lines[0].quantity, 2);
    assert_eq!(cart.total, "₹122400.00");
    assert_eq!(cart.item_count, 4);
}

#[tokio::test]
async fn test_checkout_pays_and_clears_cart() {
    let api = TestApi::spawn().await;
    let client = api.client();
    let store = cart_with(&[(1, 2), (3, 1)]).await;

    let outcome = services::place_order(&store, &client).await.expect("checkout");
    assert_eq!(
        outcome,
        CheckoutOutcome::Paid {
            order_id: OrderId::new(1),
            status: OrderStatus::Packed,
        }
    );
    assert!(store.load().await.expect("load").is_empty());

    let view = services::track_order(&client, "1").await.expect("track");
    assert_eq!(view.status, "Packed");
    assert!(view.paid);
    assert_eq!(view.total, "₹122000.00");

    let laptop = api.store().product(ProductId::new(1)).await.expect("laptop");
    assert_eq!(laptop.inventory, 48);
}

#[tokio::test]
async fn test_rejected_order_keeps_cart() {
    let api = TestApi::spawn().await;
    let store = cart_with(&[(2, 30), (2, 30)]).await;

    let err = services::place_order(&store, &api.client())
        .await
        .expect_err("stock is short");
    assert_eq!(err.to_string(), "Order Error: Not enough inventory for Smartphone");
    assert!(err.is_user_error());
    assert_eq!(store.load().await.expect("load").quantity_of(ProductId::new(2)), Some(60));
}

#[tokio::test]
async fn test_unknown_product_in_cart() {
    let api = TestApi::spawn().await;
    let store = cart_with(&[(99, 1)]).await;

    let err = services::place_order(&store, &api.client())
        .await
        .expect_err("unknown product");
    assert_eq!(err.to_string(), "Order Error: Product 99 not found");
}

#[tokio::test]
async fn test_track_unknown_order() {
    let api = TestApi::spawn().await;
    let err = services::track_order(&api.client(), "12")
        .await
        .expect_err("no such order");

    assert!(matches!(
        err,
        ServiceError::Shop(ShopError::Api { status: 404, ref message }) if message == "Order not found"
    ));
}

#[tokio::test]
async fn test_payment_retry_is_idempotent() {
    let api = TestApi::spawn().await;
    let client = api.client();
    let order = api
        .store()
        .create_order(&[CartItem::new(ProductId::new(3), 1)])
        .await
        .expect("order");

    let receipt = services::pay_order(&client, order.id).await.expect("pay");
    assert_eq!(receipt.status, OrderStatus::Packed);

    api.store().advance(order.id).await.expect("advance");
    let receipt = services::pay_order(&client, order.id).await.expect("pay again");
    assert_eq!(receipt.status, OrderStatus::Shipped);
}

/// Forward order creation to the real API.
async fn forward_order(
    State(upstream): State<ShopClient>,
    Json(request): Json<PlaceOrderRequest>,
) -> (StatusCode, Json<OrderPlaced>) {
    let placed = upstream
        .place_order(&request.items.into())
        .await
        .expect("upstream order");
    (StatusCode::CREATED, Json(placed))
}

/// A payment endpoint that is down.
async fn failing_payment() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody::new("Payment gateway unavailable")),
    )
}

#[tokio::test]
async fn test_payment_failure_still_clears_cart() {
    let api = TestApi::spawn().await;
    let gateway = Router::new()
        .route("/api/order", post(forward_order))
        .route("/api/payment", post(failing_payment))
        .with_state(api.client());
    let addr = serve(gateway).await;

    let config = ShopApiConfig::new(&format!("http://{addr}/api")).expect("valid API base URL");
    let client = ShopClient::new(&config).expect("client");
    let store = cart_with(&[(3, 1)]).await;

    let outcome = services::place_order(&store, &client).await.expect("checkout");
    assert!(matches!(
        outcome,
        CheckoutOutcome::PaymentFailed { order_id, ref reason }
            if order_id == OrderId::new(1) && reason == "Payment gateway unavailable"
    ));
    assert!(outcome.message().contains("retry payment"));
    assert!(store.load().await.expect("load").is_empty());

    let order = api.store().order(OrderId::new(1)).await.expect("order exists");
    assert_eq!(order.status, OrderStatus::Pending);
}
