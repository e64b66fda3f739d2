//! Application state shared across handlers.

use std::sync::Arc;

use crate::store::ShopStore;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: ShopStore,
}

impl AppState {
    /// Create a new application state around an existing store.
    #[must_use]
    pub fn new(store: ShopStore) -> Self {
        Self {
            inner: Arc::new(AppStateInner { store }),
        }
    }

    /// Get a reference to the catalog and order store.
    #[must_use]
    pub fn store(&self) -> &ShopStore {
        &self.inner.store
    }
}
