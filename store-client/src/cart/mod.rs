//! Session cart store
//!
//! The client-side cart state engine: an explicit context object owning the
//! per-session quantity-per-product mapping, independent of any particular
//! screen. Persistence goes through an injected [`CartStorage`] adapter;
//! only the session id and items are written. The UI-visibility flag and
//! the derived aggregates are ephemeral and recomputed, never restored.

mod storage;

pub use storage::{CartStorage, FileCartStorage, MemoryCartStorage, PersistedCart};

use rust_decimal::Decimal;

use shared::models::{CartItem, CartProduct, OrderItem, Product};
use shared::util::{session_id, snowflake_id};

/// Cart state engine for one browsing session.
///
/// Every mutation leaves the derived `total` and `item_count` consistent
/// with the items before returning; callers read them synchronously right
/// after a mutation. Operations are infallible: unknown product ids are
/// silent no-ops and persistence failures only log.
#[derive(Debug)]
pub struct CartStore<S: CartStorage> {
    storage: S,
    session_id: String,
    items: Vec<CartItem>,
    /// Cart sidebar visibility; ephemeral, never persisted
    is_open: bool,
    /// Derived: Σ(price × quantity)
    total: Decimal,
    /// Derived: Σ quantity
    item_count: i32,
}

impl<S: CartStorage> CartStore<S> {
    /// Open a store over the given adapter: restore `{session_id, items}`
    /// when a persisted copy exists, otherwise start a fresh session.
    /// Aggregates are recomputed from the restored items, not restored.
    pub fn open(storage: S) -> Self {
        let persisted = match storage.load() {
            Ok(persisted) => persisted,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load persisted cart; starting fresh");
                None
            }
        };

        let (session, items) = match persisted {
            Some(cart) => (cart.session_id, cart.items),
            None => (session_id(), Vec::new()),
        };

        let mut store = Self {
            storage,
            session_id: session,
            items,
            is_open: false,
            total: Decimal::ZERO,
            item_count: 0,
        };
        store.recalculate();
        store
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn item_count(&self) -> i32 {
        self.item_count
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn toggle_open(&mut self) {
        self.is_open = !self.is_open;
    }

    pub fn set_open(&mut self, open: bool) {
        self.is_open = open;
    }

    /// Add a product to the cart. An existing entry for the same product
    /// merges by quantity; a new entry gets a fresh id and a denormalized
    /// display copy of the product. No stock check happens here — the cart
    /// may hold more than is available.
    pub fn add_item(&mut self, product: &Product, quantity: i32) {
        if let Some(existing) = self.items.iter().find(|i| i.product_id == product.id) {
            let merged = existing.quantity + quantity;
            self.update_quantity(product.id, merged);
            return;
        }

        self.items.push(CartItem {
            id: snowflake_id(),
            session_id: self.session_id.clone(),
            product_id: product.id,
            quantity,
            product: Some(CartProduct {
                id: product.id,
                name: product.name.clone(),
                brand: product.brand.clone(),
                price: product.price.clone(),
                image: product.image.clone(),
                delivery_time: product.delivery_time,
            }),
        });
        self.recalculate();
        self.persist();
    }

    /// Remove a product's entry; silent no-op when absent.
    pub fn remove_item(&mut self, product_id: i64) {
        self.items.retain(|i| i.product_id != product_id);
        self.recalculate();
        self.persist();
    }

    /// Replace the stored quantity; `quantity <= 0` removes the entry.
    pub fn update_quantity(&mut self, product_id: i64, quantity: i32) {
        if quantity <= 0 {
            self.remove_item(product_id);
            return;
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product_id) {
            item.quantity = quantity;
        }
        self.recalculate();
        self.persist();
    }

    /// Empty the cart. Invoked once, right after a successful order
    /// placement; a failed checkout must leave the cart as it was.
    pub fn clear(&mut self) {
        self.items.clear();
        self.recalculate();
        self.persist();
    }

    /// Snapshot the current entries as immutable order lines for checkout.
    pub fn order_items(&self) -> Vec<OrderItem> {
        self.items
            .iter()
            .map(|item| {
                let product = item.product.as_ref();
                OrderItem {
                    id: item.product_id,
                    name: product.map(|p| p.name.clone()).unwrap_or_default(),
                    brand: product.map(|p| p.brand.clone()).unwrap_or_default(),
                    price: product.map(|p| p.price.clone()).unwrap_or_default(),
                    quantity: item.quantity,
                    image: product.map(|p| p.image.clone()).unwrap_or_default(),
                }
            })
            .collect()
    }

    /// The running total as a decimal string for the order payload.
    pub fn total_string(&self) -> String {
        self.total.normalize().to_string()
    }

    /// Recompute the derived aggregates from the current entries.
    /// Unparsable price strings count as zero.
    fn recalculate(&mut self) {
        self.total = self
            .items
            .iter()
            .map(|item| {
                let price: Decimal = item
                    .product
                    .as_ref()
                    .and_then(|p| p.price.parse().ok())
                    .unwrap_or_default();
                price * Decimal::from(item.quantity)
            })
            .sum();
        self.item_count = self.items.iter().map(|item| item.quantity).sum();
    }

    /// Best-effort write of `{session_id, items}` through the adapter.
    fn persist(&self) {
        let cart = PersistedCart {
            session_id: self.session_id.clone(),
            items: self.items.clone(),
        };
        if let Err(e) = self.storage.save(&cart) {
            tracing::warn!(error = %e, "Failed to persist cart");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, price: &str) -> Product {
        Product {
            id,
            name: format!("Product {id}"),
            brand: "HealthVit".into(),
            price: price.into(),
            original_price: None,
            category: "wellness".into(),
            image: "https://example.com/p.jpg".into(),
            images: vec![],
            delivery_time: 10,
            stock: 20,
            discount: None,
            badges: vec![],
            in_stock: true,
        }
    }

    fn fresh_store() -> CartStore<MemoryCartStorage> {
        CartStore::open(MemoryCartStorage::new())
    }

    fn assert_aggregates_consistent<S: CartStorage>(store: &CartStore<S>) {
        let expected_total: Decimal = store
            .items()
            .iter()
            .map(|i| {
                let price: Decimal = i
                    .product
                    .as_ref()
                    .and_then(|p| p.price.parse().ok())
                    .unwrap_or_default();
                price * Decimal::from(i.quantity)
            })
            .sum();
        let expected_count: i32 = store.items().iter().map(|i| i.quantity).sum();
        assert_eq!(store.total(), expected_total);
        assert_eq!(store.item_count(), expected_count);
    }

    #[test]
    fn aggregates_track_every_mutation() {
        let mut store = fresh_store();

        store.add_item(&product(1, "299"), 2);
        assert_aggregates_consistent(&store);
        assert_eq!(store.total(), Decimal::from(598));

        store.add_item(&product(2, "699"), 1);
        assert_aggregates_consistent(&store);
        assert_eq!(store.total(), Decimal::from(1297));
        assert_eq!(store.item_count(), 3);

        store.update_quantity(1, 1);
        assert_aggregates_consistent(&store);
        assert_eq!(store.total(), Decimal::from(998));

        store.remove_item(2);
        assert_aggregates_consistent(&store);
        assert_eq!(store.total(), Decimal::from(299));
    }

    #[test]
    fn duplicate_add_merges_quantities() {
        let mut store = fresh_store();
        store.add_item(&product(1, "299"), 1);
        store.add_item(&product(1, "299"), 2);

        assert_eq!(store.items().len(), 1);
        assert_eq!(store.items()[0].quantity, 3);
        assert_eq!(store.total(), Decimal::from(897));
    }

    #[test]
    fn zero_and_negative_quantity_remove_the_entry() {
        let mut store = fresh_store();
        store.add_item(&product(1, "299"), 2);
        store.update_quantity(1, 0);
        assert!(store.items().is_empty());

        store.add_item(&product(1, "299"), 2);
        store.update_quantity(1, -5);
        assert!(store.items().is_empty());
        assert_eq!(store.total(), Decimal::ZERO);
        assert_eq!(store.item_count(), 0);
    }

    #[test]
    fn clear_resets_everything() {
        let mut store = fresh_store();
        store.add_item(&product(1, "299"), 2);
        store.add_item(&product(2, "699"), 1);
        store.clear();

        assert!(store.items().is_empty());
        assert_eq!(store.total(), Decimal::ZERO);
        assert_eq!(store.item_count(), 0);
    }

    #[test]
    fn unknown_product_mutations_are_silent_noops() {
        let mut store = fresh_store();
        store.add_item(&product(1, "299"), 1);

        store.remove_item(42);
        store.update_quantity(42, 7);
        assert_eq!(store.items().len(), 1);
        assert_eq!(store.total(), Decimal::from(299));
    }

    #[test]
    fn unparsable_price_counts_as_zero() {
        let mut store = fresh_store();
        store.add_item(&product(1, "not-a-number"), 3);
        store.add_item(&product(2, "199"), 1);
        assert_eq!(store.total(), Decimal::from(199));
        assert_eq!(store.item_count(), 4);
    }

    #[test]
    fn entries_carry_a_denormalized_product_copy() {
        let mut store = fresh_store();
        store.add_item(&product(7, "449"), 1);

        let copy = store.items()[0].product.as_ref().unwrap();
        assert_eq!(copy.id, 7);
        assert_eq!(copy.price, "449");
        assert_eq!(copy.delivery_time, 10);
    }

    #[test]
    fn order_items_snapshot_the_cart() {
        let mut store = fresh_store();
        store.add_item(&product(1, "299"), 2);
        store.add_item(&product(2, "699"), 1);

        let lines = store.order_items();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].quantity, 2);
        assert_eq!(lines[0].price, "299");
        assert_eq!(store.total_string(), "1297");
    }

    #[test]
    fn open_flag_is_ephemeral_state() {
        let mut store = fresh_store();
        assert!(!store.is_open());
        store.toggle_open();
        assert!(store.is_open());
        store.set_open(false);
        assert!(!store.is_open());
    }
}
