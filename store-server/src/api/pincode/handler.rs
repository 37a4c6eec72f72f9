//! Pincode API Handlers

use axum::{Json, extract::State};
use serde::Deserialize;

use crate::core::ServerState;
use crate::services::delivery_area::{self, PincodeCheck};
use crate::utils::validation::{validate_required_text, MAX_SHORT_TEXT_LEN};
use crate::utils::{AppError, AppResult};

/// Pincode check payload. The UI restricts input to 6 digits; the server
/// only requires a non-empty string (unlisted values simply aren't
/// serviceable).
#[derive(Debug, Deserialize)]
pub struct PincodeCheckRequest {
    pub pincode: String,
}

/// POST /api/pincode/check - 配送区域检查
pub async fn check(
    State(state): State<ServerState>,
    Json(payload): Json<PincodeCheckRequest>,
) -> AppResult<Json<PincodeCheck>> {
    validate_required_text(&payload.pincode, "pincode", MAX_SHORT_TEXT_LEN)?;

    let result = delivery_area::check_pincode(&state.pool, &payload.pincode)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
    Ok(Json(result))
}
