//! JSON-file cart storage for the command-line client.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use bazaar_core::Cart;
use tracing::debug;

use super::{CART_KEY, CartStore, CartStoreError, decode_cart};

/// Cart kept as `<dir>/cart.json`.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// crash mid-write leaves the previous cart intact.
#[derive(Debug, Clone)]
pub struct FileCartStore {
    path: PathBuf,
}

impl FileCartStore {
    /// Store the cart inside `dir`, which is created on first save.
    #[must_use]
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{CART_KEY}.json")),
        }
    }

    /// Location of the cart file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CartStore for FileCartStore {
    async fn load(&self) -> Result<Cart, CartStoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => Ok(decode_cart(&raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Cart::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, cart: &Cart) -> Result<(), CartStoreError> {
        if let Some(dir) = self.path.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }
        let raw = serde_json::to_vec(cart)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, raw).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        debug!(path = %self.path.display(), lines = cart.len(), "Saved cart");
        Ok(())
    }

    async fn clear(&self) -> Result<(), CartStoreError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bazaar_core::{CartItem, ProductId};

    use super::*;

    #[tokio::test]
    async fn test_missing_file_is_empty_cart() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCartStore::new(dir.path().join("nested"));
        assert!(store.load().await.unwrap().is_empty());
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_save_creates_dir_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCartStore::new(dir.path().join("nested"));
        let cart: Cart = vec![
            CartItem::new(ProductId::new(1), 1),
            CartItem::new(ProductId::new(3), 5),
        ]
        .into();

        store.save(&cart).await.unwrap();
        assert!(store.path().exists());
        assert_eq!(FileCartStore::new(dir.path().join("nested")).load().await.unwrap(), cart);

        store.clear().await.unwrap();
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_empty_cart() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCartStore::new(dir.path());
        std::fs::write(store.path(), "garbage").unwrap();
        assert!(store.load().await.unwrap().is_empty());
    }
}
