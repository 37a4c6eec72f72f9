//! Session cart mirror
//!
//! Server-side copy of each browsing session's cart, keyed by the
//! client-generated session id. Lives in memory only: one session is one
//! browser's worth of state and the client's persisted copy is the source
//! of truth across restarts. Last write wins, no merge.

use std::sync::atomic::{AtomicI64, Ordering};

use dashmap::DashMap;
use shared::models::{CartItem, CartItemCreate};

/// In-memory cart store, one entry list per session.
///
/// At most one item per (session, product): duplicate adds merge by
/// incrementing the quantity. All operations are infallible; unknown
/// session or product ids are silent no-ops.
#[derive(Debug)]
pub struct SessionCarts {
    carts: DashMap<String, Vec<CartItem>>,
    next_id: AtomicI64,
}

impl SessionCarts {
    pub fn new() -> Self {
        Self {
            carts: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    /// Current entries for a session (empty when the session is unknown).
    pub fn items(&self, session_id: &str) -> Vec<CartItem> {
        self.carts
            .get(session_id)
            .map(|items| items.clone())
            .unwrap_or_default()
    }

    /// Add an item, merging into the existing entry for the same product.
    /// Returns the stored entry after the merge. No stock check happens
    /// here; over-commit is reconciled at checkout.
    pub fn add(&self, data: CartItemCreate) -> CartItem {
        let mut items = self.carts.entry(data.session_id.clone()).or_default();

        if let Some(existing) = items.iter_mut().find(|i| i.product_id == data.product_id) {
            existing.quantity += data.quantity;
            return existing.clone();
        }

        let item = CartItem {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            session_id: data.session_id,
            product_id: data.product_id,
            quantity: data.quantity,
            product: None,
        };
        items.push(item.clone());
        item
    }

    /// Replace the quantity for a product; `quantity <= 0` removes the
    /// entry entirely. Unknown product ids are a silent no-op.
    pub fn update_quantity(&self, session_id: &str, product_id: i64, quantity: i32) {
        if let Some(mut items) = self.carts.get_mut(session_id) {
            if quantity <= 0 {
                items.retain(|i| i.product_id != product_id);
            } else if let Some(item) = items.iter_mut().find(|i| i.product_id == product_id) {
                item.quantity = quantity;
            }
        }
    }

    /// Remove a product's entry, no-op if absent.
    pub fn remove(&self, session_id: &str, product_id: i64) {
        if let Some(mut items) = self.carts.get_mut(session_id) {
            items.retain(|i| i.product_id != product_id);
        }
    }

    /// Empty a session's cart. Invoked after a successful order placement,
    /// never on a failed one.
    pub fn clear(&self, session_id: &str) {
        if let Some(mut items) = self.carts.get_mut(session_id) {
            items.clear();
        }
    }
}

impl Default for SessionCarts {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add_to(carts: &SessionCarts, session: &str, product: i64, quantity: i32) -> CartItem {
        carts.add(CartItemCreate {
            session_id: session.into(),
            product_id: product,
            quantity,
        })
    }

    #[test]
    fn duplicate_add_merges_instead_of_duplicating() {
        let carts = SessionCarts::new();
        add_to(&carts, "s1", 4, 1);
        let merged = add_to(&carts, "s1", 4, 2);

        assert_eq!(merged.quantity, 3);
        let items = carts.items("s1");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 3);
    }

    #[test]
    fn sessions_are_isolated() {
        let carts = SessionCarts::new();
        add_to(&carts, "s1", 4, 1);
        add_to(&carts, "s2", 4, 5);

        assert_eq!(carts.items("s1")[0].quantity, 1);
        assert_eq!(carts.items("s2")[0].quantity, 5);
        assert!(carts.items("s3").is_empty());
    }

    #[test]
    fn zero_or_negative_quantity_removes_the_entry() {
        let carts = SessionCarts::new();
        add_to(&carts, "s1", 4, 2);
        carts.update_quantity("s1", 4, 0);
        assert!(carts.items("s1").is_empty());

        add_to(&carts, "s1", 4, 2);
        carts.update_quantity("s1", 4, -5);
        assert!(carts.items("s1").is_empty());
    }

    #[test]
    fn positive_quantity_replaces() {
        let carts = SessionCarts::new();
        add_to(&carts, "s1", 4, 2);
        carts.update_quantity("s1", 4, 7);
        assert_eq!(carts.items("s1")[0].quantity, 7);
    }

    #[test]
    fn unknown_ids_are_silent_noops() {
        let carts = SessionCarts::new();
        carts.update_quantity("s1", 4, 3);
        carts.remove("s1", 4);
        carts.clear("s1");
        assert!(carts.items("s1").is_empty());
    }

    #[test]
    fn clear_empties_only_that_session() {
        let carts = SessionCarts::new();
        add_to(&carts, "s1", 4, 2);
        add_to(&carts, "s1", 5, 1);
        add_to(&carts, "s2", 4, 1);

        carts.clear("s1");
        assert!(carts.items("s1").is_empty());
        assert_eq!(carts.items("s2").len(), 1);
    }
}
