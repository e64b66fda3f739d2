//! HTTP route handlers for the order API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                          - Health check
//! GET  /api/products                    - Product listing
//! POST /api/order                       - Create order from cart lines (201)
//! POST /api/payment                     - Accept payment for an order
//! GET  /api/track/{order_id}            - Order with status and lines
//! POST /api/orders/{order_id}/advance   - Move order to next status
//! ```

use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    routing::{get, post},
};
use bazaar_core::{
    Order, OrderId, OrderPlaced, PaymentReceipt, PaymentRequest, PlaceOrderRequest, Product,
};
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;

/// List every product in the catalog.
#[instrument(skip(state))]
pub async fn list_products(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.store().products().await)
}

/// Create an order from the submitted cart lines.
#[instrument(skip(state, body))]
pub async fn create_order(
    State(state): State<AppState>,
    body: std::result::Result<Json<PlaceOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<OrderPlaced>)> {
    let Json(request) = body?;
    let order = state.store().create_order(&request.items).await?;

    Ok((
        StatusCode::CREATED,
        Json(OrderPlaced {
            order_id: order.id,
            status: order.status,
        }),
    ))
}

/// Accept payment for an order.
#[instrument(skip(state, body))]
pub async fn payment(
    State(state): State<AppState>,
    body: std::result::Result<Json<PaymentRequest>, JsonRejection>,
) -> Result<Json<PaymentReceipt>> {
    let Json(request) = body?;
    let status = state.store().pay(request.order_id).await?;

    Ok(Json(PaymentReceipt {
        order_id: request.order_id,
        status,
    }))
}

/// Fetch an order for tracking.
#[instrument(skip(state))]
pub async fn track_order(
    State(state): State<AppState>,
    path: std::result::Result<Path<i32>, PathRejection>,
) -> Result<Json<Order>> {
    let Path(order_id) = path?;
    Ok(Json(state.store().order(OrderId::new(order_id)).await?))
}

/// Move a paid order one step along the fulfillment flow.
#[instrument(skip(state))]
pub async fn advance_order(
    State(state): State<AppState>,
    path: std::result::Result<Path<i32>, PathRejection>,
) -> Result<Json<Order>> {
    let Path(order_id) = path?;
    Ok(Json(state.store().advance(OrderId::new(order_id)).await?))
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Create the `/api` routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products))
        .route("/order", post(create_order))
        .route("/payment", post(payment))
        .route("/track/{order_id}", get(track_order))
        .route("/orders/{order_id}/advance", post(advance_order))
}

/// Create all routes for the API server.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/api", api_routes())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, header};
    use bazaar_core::OrderStatus;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::store::ShopStore;

    async fn app() -> Router {
        let store = ShopStore::new();
        store.seed(3).await;
        routes().with_state(AppState::new(store))
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_list_products() {
        let app = app().await;
        let (status, body) = send(&app, Request::get("/api/products").body(Body::empty()).unwrap()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 4);
        assert_eq!(body[0]["name"], "Laptop");
        assert_eq!(body[0]["description"], Value::Null);
        assert_eq!(body[0]["inventory"], 3);
    }

    #[tokio::test]
    async fn test_order_payment_track_flow() {
        let app = app().await;

        let (status, placed) = send(
            &app,
            post_json("/api/order", &json!({"items": [{"product_id": 2, "quantity": 2}]})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(placed, json!({"order_id": 1, "status": "Pending"}));

        let (status, paid) = send(&app, post_json("/api/payment", &json!({"order_id": 1}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(paid["status"], "Packed");

        let (status, order) = send(&app, Request::get("/api/track/1").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(order["status"], OrderStatus::Packed.label());
        assert_eq!(order["total_amount"], 30000.0);
        assert_eq!(order["items"][0]["quantity"], 2);
    }

    #[tokio::test]
    async fn test_order_errors_use_error_body() {
        let app = app().await;

        let (status, body) = send(&app, post_json("/api/order", &json!({"items": []}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "No items provided"}));

        let (status, body) = send(
            &app,
            post_json("/api/order", &json!({"items": [{"product_id": 1, "quantity": 4}]})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Not enough inventory for Laptop");

        let (status, body) = send(
            &app,
            post_json("/api/order", &json!({"items": [{"product_id": 77, "quantity": 1}]})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Product 77 not found");
    }

    #[tokio::test]
    async fn test_missing_items_field_means_no_items() {
        let app = app().await;
        let (status, body) = send(&app, post_json("/api/order", &json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No items provided");
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let app = app().await;
        let (status, body) = send(
            &app,
            post_json("/api/order", &json!({"items": [{"product_id": 1, "quantity": -1}]})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("Invalid request body"));
    }

    #[tokio::test]
    async fn test_unknown_order() {
        let app = app().await;
        let (status, body) = send(&app, Request::get("/api/track/42").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Order not found");

        let (status, _) = send(&app, post_json("/api/payment", &json!({"order_id": 42}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_non_numeric_order_id_uses_error_body() {
        let app = app().await;
        let (status, body) = send(&app, Request::get("/api/track/abc").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("Invalid path"));

        let (status, body) = send(
            &app,
            Request::post("/api/orders/x/advance").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_advance() {
        let app = app().await;
        send(
            &app,
            post_json("/api/order", &json!({"items": [{"product_id": 3, "quantity": 1}]})),
        )
        .await;

        let advance = || Request::post("/api/orders/1/advance").body(Body::empty()).unwrap();
        let (status, body) = send(&app, advance()).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "Order 1 is awaiting payment");

        send(&app, post_json("/api/payment", &json!({"order_id": 1}))).await;
        let (status, order) = send(&app, advance()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(order["status"], "Shipped");

        for _ in 0..2 {
            send(&app, advance()).await;
        }
        let (status, body) = send(&app, advance()).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "Order 1 is already delivered");
    }
}
