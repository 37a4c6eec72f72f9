//! Cart API Handlers
//!
//! Thin HTTP surface over the in-memory session cart mirror. Responses
//! enrich entries with the live catalog product so the cart sidebar can
//! render without a second round trip.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::core::ServerState;
use crate::db::repository::product;
use crate::utils::{AppError, AppResult};
use shared::models::{CartItem, CartItemCreate, CartProduct, CartQuantityUpdate, Product};

/// Mutation acknowledgement
#[derive(Debug, Serialize)]
pub struct CartAck {
    pub success: bool,
}

fn to_cart_product(product: Product) -> CartProduct {
    CartProduct {
        id: product.id,
        name: product.name,
        brand: product.brand,
        price: product.price,
        image: product.image,
        delivery_time: product.delivery_time,
    }
}

/// GET /api/cart/:session_id - 获取会话购物车 (含商品信息)
pub async fn list(
    State(state): State<ServerState>,
    Path(session_id): Path<String>,
) -> AppResult<Json<Vec<CartItem>>> {
    let mut items = state.carts.items(&session_id);

    // Deleted catalog products leave the entry bare rather than failing
    for item in &mut items {
        let found = product::find_by_id(&state.pool, item.product_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;
        item.product = found.map(to_cart_product);
    }

    Ok(Json(items))
}

/// POST /api/cart - 添加购物车条目 (同商品合并数量)
pub async fn add(
    State(state): State<ServerState>,
    Json(payload): Json<CartItemCreate>,
) -> AppResult<Json<CartItem>> {
    if payload.quantity < 1 {
        return Err(AppError::validation("quantity must be at least 1"));
    }
    let item = state.carts.add(payload);
    Ok(Json(item))
}

/// PATCH /api/cart/:session_id/:product_id - 更新数量 (<=0 即删除)
pub async fn update_quantity(
    State(state): State<ServerState>,
    Path((session_id, product_id)): Path<(String, i64)>,
    Json(payload): Json<CartQuantityUpdate>,
) -> AppResult<Json<CartAck>> {
    state
        .carts
        .update_quantity(&session_id, product_id, payload.quantity);
    Ok(Json(CartAck { success: true }))
}

/// DELETE /api/cart/:session_id/:product_id - 删除条目
pub async fn remove(
    State(state): State<ServerState>,
    Path((session_id, product_id)): Path<(String, i64)>,
) -> AppResult<Json<CartAck>> {
    state.carts.remove(&session_id, product_id);
    Ok(Json(CartAck { success: true }))
}

/// DELETE /api/cart/:session_id - 清空会话购物车
pub async fn clear(
    State(state): State<ServerState>,
    Path(session_id): Path<String>,
) -> AppResult<Json<CartAck>> {
    state.carts.clear(&session_id);
    Ok(Json(CartAck { success: true }))
}
