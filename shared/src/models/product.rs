//! Product Model

use serde::{Deserialize, Serialize};

/// Stock display tier derived from the stock count.
///
/// The low-stock threshold is 5, inclusive: stock 5 is still low stock,
/// stock 6 is normal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StockLevel {
    OutOfStock,
    LowStock,
    InStock,
}

const LOW_STOCK_THRESHOLD: i32 = 5;

/// Product entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub brand: String,
    /// Decimal string, e.g. "299"
    pub price: String,
    pub original_price: Option<String>,
    /// Category slug (e.g. wellness, skincare, electronics)
    pub category: String,
    pub image: String,
    #[serde(default)]
    pub images: Vec<String>,
    /// Delivery time in minutes
    pub delivery_time: i32,
    pub stock: i32,
    /// Discount percentage
    pub discount: Option<i32>,
    /// Promotional labels, e.g. ["NEW", "BESTSELLER"]
    #[serde(default)]
    pub badges: Vec<String>,
    pub in_stock: bool,
}

impl Product {
    /// Display tier for the storefront. `in_stock` false forces the
    /// out-of-stock tier even if the count says otherwise.
    pub fn stock_level(&self) -> StockLevel {
        if !self.in_stock || self.stock == 0 {
            StockLevel::OutOfStock
        } else if self.stock <= LOW_STOCK_THRESHOLD {
            StockLevel::LowStock
        } else {
            StockLevel::InStock
        }
    }
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    pub name: String,
    pub brand: String,
    pub price: String,
    pub original_price: Option<String>,
    pub category: String,
    pub image: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub delivery_time: i32,
    pub stock: Option<i32>,
    pub discount: Option<i32>,
    #[serde(default)]
    pub badges: Vec<String>,
    pub in_stock: Option<bool>,
}

/// Update product payload (full replacement, admin form semantics)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub name: String,
    pub brand: String,
    pub price: String,
    pub original_price: Option<String>,
    pub category: String,
    pub image: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub delivery_time: i32,
    pub stock: Option<i32>,
    pub discount: Option<i32>,
    #[serde(default)]
    pub badges: Vec<String>,
    pub in_stock: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product_with_stock(stock: i32) -> Product {
        Product {
            id: 1,
            name: "Vitamin D3 Tablets".into(),
            brand: "HealthVit".into(),
            price: "299".into(),
            original_price: Some("399".into()),
            category: "wellness".into(),
            image: String::new(),
            images: vec![],
            delivery_time: 10,
            stock,
            discount: Some(25),
            badges: vec!["NEW".into()],
            in_stock: stock > 0,
        }
    }

    #[test]
    fn stock_tier_boundaries() {
        assert_eq!(product_with_stock(0).stock_level(), StockLevel::OutOfStock);
        assert_eq!(product_with_stock(1).stock_level(), StockLevel::LowStock);
        assert_eq!(product_with_stock(5).stock_level(), StockLevel::LowStock);
        assert_eq!(product_with_stock(6).stock_level(), StockLevel::InStock);
    }

    #[test]
    fn in_stock_flag_overrides_count() {
        let mut p = product_with_stock(12);
        p.in_stock = false;
        assert_eq!(p.stock_level(), StockLevel::OutOfStock);
    }

    #[test]
    fn wire_field_names_are_camel_case() {
        let p = product_with_stock(3);
        let json = serde_json::to_value(&p).unwrap();
        assert!(json.get("originalPrice").is_some());
        assert!(json.get("deliveryTime").is_some());
        assert!(json.get("inStock").is_some());
    }
}
