//! Integration tests for Bazaar.
//!
//! Every test gets its own API server (freshly seeded) and, where needed, its
//! own storefront, both bound to ephemeral ports on 127.0.0.1. Nothing
//! external has to be running.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p bazaar-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `api_contract` - JSON API status codes, error bodies and stock handling
//! - `checkout_flow` - storefront workflows driving a live API
//! - `storefront_pages` - HTML pages through a cookie-keeping browser client

use std::net::SocketAddr;

use axum::Router;
use bazaar_api::state::AppState as ApiState;
use bazaar_api::store::ShopStore;
use bazaar_storefront::config::{ShopApiConfig, StorefrontConfig};
use bazaar_storefront::shop::ShopClient;
use bazaar_storefront::state::AppState as StorefrontState;
use tokio::net::TcpListener;

/// Stock level every seeded product starts with.
pub const SEED_INVENTORY: u32 = 50;

/// A running API server.
pub struct TestApi {
    /// Base URL including the `/api` prefix, e.g. `http://127.0.0.1:41234/api`.
    pub base_url: String,
    /// Handle on the server's state for arranging fixtures.
    pub state: ApiState,
}

impl TestApi {
    /// Start a freshly seeded API server.
    pub async fn spawn() -> Self {
        let store = ShopStore::new();
        store.seed(SEED_INVENTORY).await;

        let state = ApiState::new(store);
        let addr = serve(bazaar_api::app(state.clone())).await;

        Self {
            base_url: format!("http://{addr}/api"),
            state,
        }
    }

    /// The catalog and order store behind the server.
    #[must_use]
    pub fn store(&self) -> &ShopStore {
        self.state.store()
    }

    /// URL of an API endpoint, e.g. `url("track/1")`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    /// An order API client pointed at this server.
    #[must_use]
    pub fn client(&self) -> ShopClient {
        let config = ShopApiConfig::new(&self.base_url).expect("valid API base URL");
        ShopClient::new(&config).expect("Failed to create API client")
    }
}

/// A running storefront wired to its own API server.
pub struct TestStorefront {
    /// Storefront root URL without a trailing slash.
    pub base_url: String,
    pub api: TestApi,
}

impl TestStorefront {
    /// Start an API server and a storefront that talks to it.
    pub async fn spawn() -> Self {
        let api = TestApi::spawn().await;
        let api_base = api.base_url.clone();

        let config = StorefrontConfig::from_lookup(|key| match key {
            "BAZAAR_API_BASE" => Some(api_base.clone()),
            _ => None,
        })
        .expect("valid storefront configuration");
        let state = StorefrontState::new(config).expect("Failed to create storefront state");
        let addr = serve(bazaar_storefront::app(state)).await;

        Self {
            base_url: format!("http://{addr}"),
            api,
        }
    }

    /// URL of a storefront page, e.g. `url("/cart")`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// A browser-like client: keeps cookies and follows redirects.
#[must_use]
pub fn browser() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Serve `app` on an ephemeral port in the background.
pub async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("listener has an address");

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}
