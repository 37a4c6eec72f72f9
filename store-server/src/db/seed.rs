//! Sample data seeding
//!
//! Fills an empty database with a small catalog, a couple of orders, and the
//! default gating config so a fresh install renders a working storefront.

use shared::models::{
    AppConfigUpsert, ConfigValue, DeliveryAddress, OrderCreate, OrderItem, PaymentMethod,
    ProductCreate, ALLOWED_CATEGORIES_KEY, ALLOWED_PINCODES_KEY,
};
use sqlx::SqlitePool;

use super::repository::{app_config, order, product, RepoResult};

/// Seed sample data when the relevant tables are empty. Idempotent across
/// restarts: a non-empty table is left alone.
pub async fn seed_if_empty(pool: &SqlitePool) -> RepoResult<()> {
    let product_count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM product")
        .fetch_one(pool)
        .await?;
    if product_count == 0 {
        seed_products(pool).await?;
        tracing::info!("Sample products seeded");
    }

    let order_count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders")
        .fetch_one(pool)
        .await?;
    if order_count == 0 {
        seed_orders(pool).await?;
        tracing::info!("Sample orders seeded");
    }

    let config_count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM app_config")
        .fetch_one(pool)
        .await?;
    if config_count == 0 {
        seed_config(pool).await?;
        tracing::info!("Default config seeded");
    }

    Ok(())
}

async fn seed_products(pool: &SqlitePool) -> RepoResult<()> {
    let samples = vec![
        ProductCreate {
            name: "Vitamin D3 Tablets".into(),
            brand: "HealthVit".into(),
            price: "299".into(),
            original_price: Some("399".into()),
            category: "wellness".into(),
            image: "https://images.unsplash.com/photo-1559757148-5c350d0d3c56?w=400&h=300".into(),
            images: vec![
                "https://images.unsplash.com/photo-1559757148-5c350d0d3c56?w=400&h=300".into(),
                "https://images.unsplash.com/photo-1584362917165-526a968579e8?w=400&h=300".into(),
            ],
            delivery_time: 10,
            stock: Some(45),
            discount: Some(25),
            badges: vec!["NEW".into()],
            in_stock: None,
        },
        ProductCreate {
            name: "Vitamin C Serum".into(),
            brand: "GlowSkin".into(),
            price: "699".into(),
            original_price: Some("999".into()),
            category: "skincare".into(),
            image: "https://images.unsplash.com/photo-1570194065650-d99bf4d046f9?w=400&h=300".into(),
            images: vec![
                "https://images.unsplash.com/photo-1570194065650-d99bf4d046f9?w=400&h=300".into(),
                "https://images.unsplash.com/photo-1596755389378-c31d21fd1273?w=400&h=300".into(),
            ],
            delivery_time: 8,
            stock: Some(32),
            discount: Some(30),
            badges: vec!["BESTSELLER".into()],
            in_stock: None,
        },
        ProductCreate {
            name: "Hydrating Face Cream".into(),
            brand: "AquaGlow".into(),
            price: "699".into(),
            original_price: None,
            category: "skincare".into(),
            image: "https://images.unsplash.com/photo-1596755389378-c31d21fd1273?w=400&h=300".into(),
            images: vec![],
            delivery_time: 10,
            stock: Some(28),
            discount: None,
            badges: vec![],
            in_stock: None,
        },
        ProductCreate {
            name: "Immunity Tea Pack".into(),
            brand: "TeaFit".into(),
            price: "199".into(),
            original_price: Some("249".into()),
            category: "wellness".into(),
            image: "https://images.unsplash.com/photo-1563822249548-9a72b6353cd1?w=400&h=300".into(),
            images: vec![],
            delivery_time: 7,
            stock: Some(50),
            discount: Some(20),
            badges: vec!["TRENDING".into()],
            in_stock: None,
        },
        ProductCreate {
            name: "Power Bank 10000mAh".into(),
            brand: "TechCharge".into(),
            price: "1299".into(),
            original_price: Some("1799".into()),
            category: "electronics".into(),
            image: "https://images.unsplash.com/photo-1609592704166-2d4c6c6c9b3b?w=400&h=300".into(),
            images: vec![],
            delivery_time: 6,
            stock: Some(35),
            discount: Some(28),
            badges: vec!["BESTSELLER".into()],
            in_stock: None,
        },
        ProductCreate {
            name: "Bluetooth Earbuds Pro".into(),
            brand: "SoundMax".into(),
            price: "2999".into(),
            original_price: Some("3999".into()),
            category: "electronics".into(),
            image: "https://images.unsplash.com/photo-1590658268037-6bf12165a8df?w=400&h=300".into(),
            images: vec![],
            delivery_time: 8,
            stock: Some(3),
            discount: Some(25),
            badges: vec!["NEW".into(), "TRENDING".into()],
            in_stock: None,
        },
    ];

    for sample in samples {
        product::create(pool, sample).await?;
    }
    Ok(())
}

async fn seed_orders(pool: &SqlitePool) -> RepoResult<()> {
    let samples = vec![
        OrderCreate {
            session_id: "user-123".into(),
            items: vec![
                OrderItem {
                    id: 1,
                    name: "Vitamin D3 Tablets".into(),
                    brand: "HealthVit".into(),
                    price: "299".into(),
                    quantity: 2,
                    image: "https://images.unsplash.com/photo-1559757148-5c350d0d3c56?w=400&h=300"
                        .into(),
                },
                OrderItem {
                    id: 2,
                    name: "Vitamin C Serum".into(),
                    brand: "GlowSkin".into(),
                    price: "699".into(),
                    quantity: 1,
                    image: "https://images.unsplash.com/photo-1570194065650-d99bf4d046f9?w=400&h=300"
                        .into(),
                },
            ],
            total: "1297".into(),
            payment_method: PaymentMethod::Upi,
            delivery_address: DeliveryAddress {
                address: "123 MG Road, Koramangala, Bangalore".into(),
                phone: "+91 9876543210".into(),
            },
            estimated_delivery: 10,
            idempotency_key: None,
        },
        OrderCreate {
            session_id: "user-456".into(),
            items: vec![OrderItem {
                id: 6,
                name: "Bluetooth Earbuds Pro".into(),
                brand: "SoundMax".into(),
                price: "2999".into(),
                quantity: 1,
                image: "https://images.unsplash.com/photo-1590658268037-6bf12165a8df?w=400&h=300"
                    .into(),
            }],
            total: "2999".into(),
            payment_method: PaymentMethod::Card,
            delivery_address: DeliveryAddress {
                address: "456 Indiranagar, Bangalore".into(),
                phone: "+91 8765432109".into(),
            },
            estimated_delivery: 10,
            idempotency_key: None,
        },
    ];

    for sample in samples {
        order::create(pool, sample).await?;
    }
    Ok(())
}

async fn seed_config(pool: &SqlitePool) -> RepoResult<()> {
    app_config::upsert(
        pool,
        AppConfigUpsert {
            key: ALLOWED_CATEGORIES_KEY.into(),
            value: ConfigValue::StringList(vec![
                "wellness".into(),
                "skincare".into(),
                "electronics".into(),
            ]),
            description: Some("Categories visible on the storefront".into()),
        },
    )
    .await?;

    app_config::upsert(
        pool,
        AppConfigUpsert {
            key: ALLOWED_PINCODES_KEY.into(),
            value: ConfigValue::StringList(vec![
                "560001".into(),
                "560002".into(),
                "560025".into(),
                "560034".into(),
                "560066".into(),
                "560076".into(),
                "560095".into(),
                "560100".into(),
                "560102".into(),
                "560103".into(),
            ]),
            description: Some("Serviceable delivery pincodes".into()),
        },
    )
    .await?;

    Ok(())
}
