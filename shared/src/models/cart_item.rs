//! Cart Item Model

use serde::{Deserialize, Serialize};

/// Denormalized product display copy carried by cart entries.
///
/// Captured at add-to-cart time so the cart can render without the catalog
/// being reachable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartProduct {
    pub id: i64,
    pub name: String,
    pub brand: String,
    /// Decimal string, e.g. "299"
    pub price: String,
    pub image: String,
    pub delivery_time: i32,
}

/// Cart item entity
///
/// At most one item exists per (sessionId, productId) pair; duplicate adds
/// merge by incrementing the quantity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: i64,
    pub session_id: String,
    pub product_id: i64,
    pub quantity: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<CartProduct>,
}

/// Add-to-cart payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemCreate {
    pub session_id: String,
    pub product_id: i64,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

fn default_quantity() -> i32 {
    1
}

/// Quantity update payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartQuantityUpdate {
    pub quantity: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_defaults_to_one() {
        let item: CartItemCreate =
            serde_json::from_str(r#"{"sessionId":"abc123def","productId":4}"#).unwrap();
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn product_is_omitted_when_absent() {
        let item = CartItem {
            id: 1,
            session_id: "abc123def".into(),
            product_id: 4,
            quantity: 2,
            product: None,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("product").is_none());
        assert!(json.get("sessionId").is_some());
    }
}
