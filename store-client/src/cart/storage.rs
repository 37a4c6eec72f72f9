//! Cart persistence adapters
//!
//! Only `{session_id, items}` crosses the adapter boundary. Derived totals
//! and UI flags stay in the store and are recomputed on load, so stale
//! aggregates can never be restored verbatim.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::ClientResult;
use shared::models::CartItem;

/// The persisted slice of cart state
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PersistedCart {
    pub session_id: String,
    pub items: Vec<CartItem>,
}

/// Storage adapter injected into [`super::CartStore`]
pub trait CartStorage {
    /// Read the persisted cart, `None` when nothing was saved yet
    fn load(&self) -> ClientResult<Option<PersistedCart>>;
    /// Write the persisted cart
    fn save(&self, cart: &PersistedCart) -> ClientResult<()>;
}

/// In-memory adapter (tests, ephemeral sessions)
#[derive(Debug, Default)]
pub struct MemoryCartStorage {
    cart: Mutex<Option<PersistedCart>>,
}

impl MemoryCartStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStorage for MemoryCartStorage {
    fn load(&self) -> ClientResult<Option<PersistedCart>> {
        Ok(self.cart.lock().expect("cart storage lock poisoned").clone())
    }

    fn save(&self, cart: &PersistedCart) -> ClientResult<()> {
        *self.cart.lock().expect("cart storage lock poisoned") = Some(cart.clone());
        Ok(())
    }
}

/// JSON-file adapter — the local-storage analogue, surviving restarts
#[derive(Debug, Clone)]
pub struct FileCartStorage {
    path: PathBuf,
}

impl FileCartStorage {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl CartStorage for FileCartStorage {
    fn load(&self) -> ClientResult<Option<PersistedCart>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&contents)?))
    }

    fn save(&self, cart: &PersistedCart) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string(cart)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartStore;
    use shared::models::Product;

    fn product(id: i64, price: &str) -> Product {
        Product {
            id,
            name: format!("Product {id}"),
            brand: "TeaFit".into(),
            price: price.into(),
            original_price: None,
            category: "wellness".into(),
            image: String::new(),
            images: vec![],
            delivery_time: 7,
            stock: 10,
            discount: None,
            badges: vec![],
            in_stock: true,
        }
    }

    #[test]
    fn file_storage_survives_reload_and_recomputes_totals() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.json");

        let session = {
            let mut store = CartStore::open(FileCartStorage::new(&path));
            store.add_item(&product(1, "199"), 2);
            store.toggle_open();
            store.session_id().to_string()
        };

        // Reload: session id and items come back, aggregates are
        // recomputed, the open flag does not survive.
        let store = CartStore::open(FileCartStorage::new(&path));
        assert_eq!(store.session_id(), session);
        assert_eq!(store.items().len(), 1);
        assert_eq!(store.total(), rust_decimal::Decimal::from(398));
        assert_eq!(store.item_count(), 2);
        assert!(!store.is_open());
    }

    #[test]
    fn persisted_json_contains_only_session_and_items() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.json");

        let mut store = CartStore::open(FileCartStorage::new(&path));
        store.add_item(&product(1, "199"), 1);

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(raw.get("sessionId").is_some());
        assert!(raw.get("items").is_some());
        assert!(raw.get("total").is_none());
        assert!(raw.get("itemCount").is_none());
        assert!(raw.get("isOpen").is_none());
    }

    #[test]
    fn missing_file_starts_a_fresh_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = CartStore::open(FileCartStorage::new(dir.path().join("absent.json")));
        assert!(store.items().is_empty());
        assert_eq!(store.session_id().len(), 9);
    }

    #[test]
    fn corrupt_file_falls_back_to_fresh_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.json");
        std::fs::write(&path, "not json").unwrap();

        let store = CartStore::open(FileCartStorage::new(&path));
        assert!(store.items().is_empty());
    }
}
