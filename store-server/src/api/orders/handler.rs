//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::order::{self, OrderFilter};
use crate::utils::validation::{
    validate_required_text, MAX_ADDRESS_LEN, MAX_SHORT_TEXT_LEN,
};
use crate::utils::{AppError, AppResult};
use shared::models::{compute_total, Order, OrderCreate, OrderStatusUpdate};

/// POST /api/orders - 创建订单 (结账)
///
/// The session's cart mirror is cleared strictly after the insert
/// succeeded; a failed creation leaves the cart untouched.
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<Order>> {
    if payload.items.is_empty() {
        return Err(AppError::validation("order must contain at least one item"));
    }
    if payload.items.iter().any(|item| item.quantity < 1) {
        return Err(AppError::validation("item quantity must be at least 1"));
    }
    validate_required_text(&payload.session_id, "sessionId", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.delivery_address.address, "address", MAX_ADDRESS_LEN)?;
    validate_required_text(&payload.delivery_address.phone, "phone", MAX_SHORT_TEXT_LEN)?;

    // Totals are accepted as sent (original behavior); the recomputation
    // only surfaces drift in the log.
    let computed = compute_total(&payload.items);
    if payload.total.parse::<rust_decimal::Decimal>().ok() != Some(computed) {
        tracing::warn!(
            submitted = %payload.total,
            computed = %computed,
            "Order total does not match recomputed sum; storing as sent"
        );
    }

    let session_id = payload.session_id.clone();
    let created = order::create(&state.pool, payload)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    // Clear cart after successful order
    state.carts.clear(&session_id);

    tracing::info!(id = created.id, session = %created.session_id, "Order created");
    Ok(Json(created))
}

/// GET /api/orders/:session_id - 会话订单列表 (新→旧)
pub async fn list_by_session(
    State(state): State<ServerState>,
    Path(session_id): Path<String>,
) -> AppResult<Json<Vec<Order>>> {
    let orders = order::find_by_session(&state.pool, &session_id)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
    Ok(Json(orders))
}

/// Admin listing query. `date` and the `from`/`to` range are mutually
/// exclusive in the UI; when both arrive, `date` wins.
#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    pub status: Option<String>,
    /// YYYY-MM-DD creation day
    pub date: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

/// GET /api/admin/orders - 全部订单 (新→旧, 可过滤)
pub async fn list_all(
    State(state): State<ServerState>,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let status = query
        .status
        .as_deref()
        .map(|s| s.parse::<shared::models::OrderStatus>())
        .transpose()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let filter = OrderFilter {
        status,
        date: query.date,
        from: query.from,
        to: query.to,
    };

    let orders = order::find_all(&state.pool, &filter)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
    Ok(Json(orders))
}

/// PUT /api/orders/:id/status - 覆盖订单状态
///
/// Permissive by default: any enumerated status is accepted regardless of
/// the current one (admin correction workflows rely on this). With
/// `ENFORCE_STATUS_TRANSITIONS=true` the strict table applies instead.
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<OrderStatusUpdate>,
) -> AppResult<Json<Order>> {
    if state.config.enforce_status_transitions {
        let current = order::find_by_id(&state.pool, id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .ok_or_else(|| AppError::not_found(format!("Order {id}")))?;

        if !current.status.can_transition_to(payload.status) {
            return Err(AppError::BusinessRule(format!(
                "Cannot transition order from {} to {}",
                current.status.as_str(),
                payload.status.as_str()
            )));
        }
    }

    let updated = order::update_status(&state.pool, id, payload.status)
        .await
        .map_err(AppError::from)?;
    tracing::info!(id, status = updated.status.as_str(), "Order status updated");
    Ok(Json(updated))
}
