//! Product API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::product;
use crate::utils::validation::{
    validate_optional_text, validate_required_text, MAX_NAME_LEN, MAX_URL_LEN,
};
use crate::utils::{AppError, AppResult};
use shared::models::{Product, ProductCreate, ProductUpdate};

/// Storefront listing query
#[derive(Debug, Deserialize)]
pub struct ProductListQuery {
    /// Category slug; absent or "all" lists the whole catalog
    pub category: Option<String>,
}

/// GET /api/products - 获取商品列表 (可按分类过滤)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ProductListQuery>,
) -> AppResult<Json<Vec<Product>>> {
    let products = match query.category.as_deref() {
        Some(category) if category != "all" => {
            product::find_by_category(&state.pool, category)
                .await
                .map_err(|e| AppError::database(e.to_string()))?
        }
        _ => product::find_all(&state.pool)
            .await
            .map_err(|e| AppError::database(e.to_string()))?,
    };
    Ok(Json(products))
}

/// GET /api/products/:id - 获取单个商品
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Product>> {
    let product = product::find_by_id(&state.pool, id)
        .await
        .map_err(|e| AppError::database(e.to_string()))?
        .ok_or_else(|| AppError::not_found(format!("Product {id}")))?;
    Ok(Json(product))
}

/// POST /api/products - 创建商品
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<Json<Product>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.brand, "brand", MAX_NAME_LEN)?;
    validate_required_text(&payload.category, "category", MAX_NAME_LEN)?;
    validate_optional_text(Some(&payload.image), "image", MAX_URL_LEN)?;

    let created = product::create(&state.pool, payload)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
    tracing::info!(id = created.id, name = %created.name, "Product created");
    Ok(Json(created))
}

/// PUT /api/products/:id - 更新商品 (整体替换)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<Product>> {
    let updated = product::update(&state.pool, id, payload)
        .await
        .map_err(AppError::from)?;
    Ok(Json(updated))
}

/// DELETE /api/products/:id - 删除商品
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let deleted = product::delete(&state.pool, id)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
    Ok(Json(deleted))
}

/// Stock write payload
#[derive(Debug, Deserialize)]
pub struct StockUpdate {
    pub stock: i32,
}

/// PUT /api/products/:id/stock - 更新库存 (同步 inStock 标志)
pub async fn update_stock(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<StockUpdate>,
) -> AppResult<Json<Product>> {
    if payload.stock < 0 {
        return Err(AppError::validation("stock must be non-negative"));
    }
    let updated = product::update_stock(&state.pool, id, payload.stock)
        .await
        .map_err(AppError::from)?;
    Ok(Json(updated))
}
