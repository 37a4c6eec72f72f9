//! Category API Handlers

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::db::repository::{app_config, product};
use crate::utils::{AppError, AppResult};
use shared::models::ALLOWED_CATEGORIES_KEY;

/// GET /api/categories - 店面可见分类
///
/// Distinct catalog categories intersected with the `allowed_categories`
/// config entry. Without the config entry every catalog category shows.
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<String>>> {
    let mut categories = product::distinct_categories(&state.pool)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    let allowed = app_config::get_value(&state.pool, ALLOWED_CATEGORIES_KEY)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    if let Some(value) = allowed {
        categories.retain(|category| value.contains(category));
    }

    Ok(Json(categories))
}
