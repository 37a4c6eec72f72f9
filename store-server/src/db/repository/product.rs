//! Product Repository

use super::{RepoError, RepoResult};
use shared::models::{Product, ProductCreate, ProductUpdate};
use sqlx::{FromRow, SqlitePool};

const PRODUCT_COLUMNS: &str = "id, name, brand, price, original_price, category, image, images, \
     delivery_time, stock, discount, badges, in_stock";

/// Raw row with JSON TEXT columns still encoded
#[derive(Debug, Clone, FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    brand: String,
    price: String,
    original_price: Option<String>,
    category: String,
    image: String,
    images: String,
    delivery_time: i32,
    stock: i32,
    discount: Option<i32>,
    badges: String,
    in_stock: bool,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepoError;

    fn try_from(row: ProductRow) -> RepoResult<Product> {
        Ok(Product {
            id: row.id,
            name: row.name,
            brand: row.brand,
            price: row.price,
            original_price: row.original_price,
            category: row.category,
            image: row.image,
            images: serde_json::from_str(&row.images)?,
            delivery_time: row.delivery_time,
            stock: row.stock,
            discount: row.discount,
            badges: serde_json::from_str(&row.badges)?,
            in_stock: row.in_stock,
        })
    }
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Product>> {
    let rows = sqlx::query_as::<_, ProductRow>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM product ORDER BY id"
    ))
    .fetch_all(pool)
    .await?;
    rows.into_iter().map(Product::try_from).collect()
}

pub async fn find_by_category(pool: &SqlitePool, category: &str) -> RepoResult<Vec<Product>> {
    let rows = sqlx::query_as::<_, ProductRow>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM product WHERE category = ? ORDER BY id"
    ))
    .bind(category)
    .fetch_all(pool)
    .await?;
    rows.into_iter().map(Product::try_from).collect()
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Product>> {
    let row = sqlx::query_as::<_, ProductRow>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM product WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    row.map(Product::try_from).transpose()
}

/// Distinct categories of the catalog, alphabetical.
pub async fn distinct_categories(pool: &SqlitePool) -> RepoResult<Vec<String>> {
    let categories = sqlx::query_scalar::<_, String>(
        "SELECT DISTINCT category FROM product ORDER BY category",
    )
    .fetch_all(pool)
    .await?;
    Ok(categories)
}

pub async fn create(pool: &SqlitePool, data: ProductCreate) -> RepoResult<Product> {
    let stock = data.stock.unwrap_or(0);
    // in_stock mirrors the stock count unless the payload pins it
    let in_stock = data.in_stock.unwrap_or(stock > 0);

    let id = sqlx::query(
        "INSERT INTO product (name, brand, price, original_price, category, image, images, \
         delivery_time, stock, discount, badges, in_stock) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&data.name)
    .bind(&data.brand)
    .bind(&data.price)
    .bind(&data.original_price)
    .bind(&data.category)
    .bind(&data.image)
    .bind(serde_json::to_string(&data.images)?)
    .bind(data.delivery_time)
    .bind(stock)
    .bind(data.discount)
    .bind(serde_json::to_string(&data.badges)?)
    .bind(in_stock)
    .execute(pool)
    .await?
    .last_insert_rowid();

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create product".into()))
}

/// Full replacement, admin form semantics (original PUT behavior).
pub async fn update(pool: &SqlitePool, id: i64, data: ProductUpdate) -> RepoResult<Product> {
    let stock = data.stock.unwrap_or(0);
    let in_stock = data.in_stock.unwrap_or(stock > 0);

    let rows = sqlx::query(
        "UPDATE product SET name = ?, brand = ?, price = ?, original_price = ?, category = ?, \
         image = ?, images = ?, delivery_time = ?, stock = ?, discount = ?, badges = ?, \
         in_stock = ? WHERE id = ?",
    )
    .bind(&data.name)
    .bind(&data.brand)
    .bind(&data.price)
    .bind(&data.original_price)
    .bind(&data.category)
    .bind(&data.image)
    .bind(serde_json::to_string(&data.images)?)
    .bind(data.delivery_time)
    .bind(stock)
    .bind(data.discount)
    .bind(serde_json::to_string(&data.badges)?)
    .bind(in_stock)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Product {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Product {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM product WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Write the stock count, keeping `in_stock` consistent with it.
pub async fn update_stock(pool: &SqlitePool, id: i64, stock: i32) -> RepoResult<Product> {
    let rows = sqlx::query("UPDATE product SET stock = ?, in_stock = ? WHERE id = ?")
        .bind(stock)
        .bind(stock > 0)
        .bind(id)
        .execute(pool)
        .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Product {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Product {id} not found")))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    /// In-memory SQLite pool with the catalog schema.
    pub(crate) async fn test_pool() -> SqlitePool {
        // Single connection: every pooled connection would otherwise get
        // its own empty :memory: database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        sqlx::query(
            "CREATE TABLE product (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                brand TEXT NOT NULL,
                price TEXT NOT NULL,
                original_price TEXT,
                category TEXT NOT NULL,
                image TEXT NOT NULL,
                images TEXT NOT NULL DEFAULT '[]',
                delivery_time INTEGER NOT NULL,
                stock INTEGER NOT NULL DEFAULT 0,
                discount INTEGER,
                badges TEXT NOT NULL DEFAULT '[]',
                in_stock INTEGER NOT NULL DEFAULT 1
            )",
        )
        .execute(&pool)
        .await
        .unwrap();

        pool
    }

    pub(crate) fn sample_create(name: &str, category: &str, stock: i32) -> ProductCreate {
        ProductCreate {
            name: name.into(),
            brand: "HealthVit".into(),
            price: "299".into(),
            original_price: Some("399".into()),
            category: category.into(),
            image: "https://example.com/p.jpg".into(),
            images: vec!["https://example.com/p.jpg".into()],
            delivery_time: 10,
            stock: Some(stock),
            discount: Some(25),
            badges: vec!["NEW".into()],
            in_stock: None,
        }
    }

    #[tokio::test]
    async fn create_and_fetch_round_trip() {
        let pool = test_pool().await;
        let created = create(&pool, sample_create("Vitamin D3", "wellness", 45))
            .await
            .unwrap();
        assert!(created.in_stock);
        assert_eq!(created.badges, vec!["NEW".to_string()]);

        let fetched = find_by_id(&pool, created.id).await.unwrap().unwrap();
        assert_eq!(fetched.images.len(), 1);
        assert_eq!(fetched.category, "wellness");
    }

    #[tokio::test]
    async fn create_with_zero_stock_is_not_in_stock() {
        let pool = test_pool().await;
        let created = create(&pool, sample_create("Tea", "wellness", 0))
            .await
            .unwrap();
        assert!(!created.in_stock);
    }

    #[tokio::test]
    async fn category_filter_and_distinct() {
        let pool = test_pool().await;
        create(&pool, sample_create("Vitamin D3", "wellness", 5))
            .await
            .unwrap();
        create(&pool, sample_create("Serum", "skincare", 5))
            .await
            .unwrap();
        create(&pool, sample_create("Tea", "wellness", 5))
            .await
            .unwrap();

        let wellness = find_by_category(&pool, "wellness").await.unwrap();
        assert_eq!(wellness.len(), 2);

        let categories = distinct_categories(&pool).await.unwrap();
        assert_eq!(categories, vec!["skincare".to_string(), "wellness".to_string()]);
    }

    #[tokio::test]
    async fn update_stock_keeps_in_stock_consistent() {
        let pool = test_pool().await;
        let created = create(&pool, sample_create("Vitamin D3", "wellness", 45))
            .await
            .unwrap();

        let zeroed = update_stock(&pool, created.id, 0).await.unwrap();
        assert_eq!(zeroed.stock, 0);
        assert!(!zeroed.in_stock);

        let restocked = update_stock(&pool, created.id, 3).await.unwrap();
        assert_eq!(restocked.stock, 3);
        assert!(restocked.in_stock);
    }

    #[tokio::test]
    async fn delete_missing_product_returns_false() {
        let pool = test_pool().await;
        assert!(!delete(&pool, 404).await.unwrap());
    }
}
