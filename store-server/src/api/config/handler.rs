//! Admin Config API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::app_config;
use crate::utils::validation::{validate_required_text, MAX_SHORT_TEXT_LEN};
use crate::utils::{AppError, AppResult};
use shared::models::{AppConfig, AppConfigUpsert};

/// GET /api/admin/config - 获取全部配置
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<AppConfig>>> {
    let configs = app_config::get_all(&state.pool)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
    Ok(Json(configs))
}

/// GET /api/admin/config/:key - 获取单个配置
pub async fn get_by_key(
    State(state): State<ServerState>,
    Path(key): Path<String>,
) -> AppResult<Json<AppConfig>> {
    let config = app_config::get(&state.pool, &key)
        .await
        .map_err(|e| AppError::database(e.to_string()))?
        .ok_or_else(|| AppError::not_found(format!("Config {key}")))?;
    Ok(Json(config))
}

/// POST /api/admin/config - 写入配置 (按 key 覆盖, last write wins)
pub async fn upsert(
    State(state): State<ServerState>,
    Json(payload): Json<AppConfigUpsert>,
) -> AppResult<Json<AppConfig>> {
    validate_required_text(&payload.key, "key", MAX_SHORT_TEXT_LEN)?;

    let config = app_config::upsert(&state.pool, payload)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
    tracing::info!(key = %config.key, "Config updated");
    Ok(Json(config))
}
