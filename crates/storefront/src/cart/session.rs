//! Session-backed cart storage for the web storefront.
//!
//! The session cookie outlives page loads, so the cart survives navigation
//! and browser restarts until the session expires from inactivity.

use bazaar_core::Cart;
use tower_sessions::Session;

use super::{CART_KEY, CartStore, CartStoreError};

/// Cart stored under [`CART_KEY`] in the visitor's session.
#[derive(Debug, Clone)]
pub struct SessionCartStore {
    session: Session,
}

impl SessionCartStore {
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }
}

impl CartStore for SessionCartStore {
    async fn load(&self) -> Result<Cart, CartStoreError> {
        let Some(value) = self.session.get_value(CART_KEY).await? else {
            return Ok(Cart::new());
        };
        Ok(serde_json::from_value(value).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Discarding unreadable session cart");
            Cart::new()
        }))
    }

    async fn save(&self, cart: &Cart) -> Result<(), CartStoreError> {
        self.session.insert(CART_KEY, cart).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), CartStoreError> {
        self.session.remove_value(CART_KEY).await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use bazaar_core::{CartItem, ProductId};
    use tower_sessions::MemoryStore;

    use super::*;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_session_round_trip() {
        let store = SessionCartStore::new(session());
        assert!(store.load().await.unwrap().is_empty());

        let cart: Cart = vec![CartItem::new(ProductId::new(2), 3)].into();
        store.save(&cart).await.unwrap();
        assert_eq!(store.load().await.unwrap(), cart);

        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unreadable_session_value_is_empty() {
        let session = session();
        session.insert(CART_KEY, "not a cart").await.unwrap();
        let store = SessionCartStore::new(session);
        assert!(store.load().await.unwrap().is_empty());
    }
}
