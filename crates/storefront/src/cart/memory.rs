//! Process-local cart storage.

use std::sync::Arc;

use bazaar_core::Cart;
use tokio::sync::Mutex;

use super::{CartStore, CartStoreError, decode_cart};

/// Cart held in memory as its serialized form.
///
/// Clones share the same slot. Useful for tests and for embedding the
/// checkout flow without any persistent storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryCartStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryCartStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored value, exactly as it would sit in a key-value store.
    pub async fn raw(&self) -> Option<String> {
        self.slot.lock().await.clone()
    }

    /// Overwrite the raw stored value.
    pub async fn set_raw(&self, raw: impl Into<String>) {
        *self.slot.lock().await = Some(raw.into());
    }
}

impl CartStore for MemoryCartStore {
    async fn load(&self) -> Result<Cart, CartStoreError> {
        Ok(self
            .slot
            .lock()
            .await
            .as_deref()
            .map(decode_cart)
            .unwrap_or_default())
    }

    async fn save(&self, cart: &Cart) -> Result<(), CartStoreError> {
        let raw = serde_json::to_string(cart)?;
        *self.slot.lock().await = Some(raw);
        Ok(())
    }

    async fn clear(&self) -> Result<(), CartStoreError> {
        *self.slot.lock().await = None;
        Ok(())
    }
}
